//! Benchmarks for mesh construction and region growing.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;

use strata::field::ScalarField;
use strata::mesh::{build_from_polygons, VertexId};
use strata::region::{Criterion as GrowCriterion, Segment};

fn grid_soup(n: usize) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    (vertices, faces)
}

fn bench_mesh_construction(c: &mut Criterion) {
    let (vertices, faces) = grid_soup(30);

    c.bench_function("build_grid_30x30", |b| {
        b.iter(|| build_from_polygons(&vertices, &faces).unwrap())
    });
}

fn bench_compute_normals(c: &mut Criterion) {
    let (vertices, faces) = grid_soup(30);
    let mesh = build_from_polygons(&vertices, &faces).unwrap();

    c.bench_function("compute_normals_30x30", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut m| m.compute_normals().unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_region_growth(c: &mut Criterion) {
    let (vertices, faces) = grid_soup(30);
    let mesh = build_from_polygons(&vertices, &faces).unwrap();

    // Split the grid by height: the lower half shares one class.
    let values: Vec<f64> = mesh
        .vertices()
        .map(|(_, v)| if v.position.y < 15.0 { 0.0 } else { 1.0 })
        .collect();
    let field = ScalarField::from_values(values);

    c.bench_function("grow_equal_30x30", |b| {
        b.iter(|| {
            Segment::from_seed(&mesh, &field, VertexId::new(0), GrowCriterion::Equal).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_mesh_construction,
    bench_compute_normals,
    bench_region_growth
);
criterion_main!(benches);
