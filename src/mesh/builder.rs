//! Mesh construction from polygon soup.
//!
//! Builds half-edge topology from an unordered list of faces given as vertex
//! index lists, deduplicating shared edges so that the two opposite-winding
//! traversals of an interior edge reuse a single twin pair.

use nalgebra::Point3;
use tracing::{debug, warn};

use super::halfedge::{Face, HalfEdgeMesh};
use super::index::FaceId;
use crate::error::{Error, Result};

/// Build a half-edge mesh from vertices and polygonal faces.
///
/// Faces are ordered lists of 0-based vertex indices in winding order; each
/// consecutive index pair forms a boundary edge, and the loop closes from the
/// last index back to the first. For every pair, the tail vertex's outgoing
/// half-edges are scanned for an existing half-edge with the matching head:
/// when a prior face created the edge in opposite winding, that half-edge is
/// reused and the new face attached to it; otherwise a fresh twin pair is
/// created. An edge bordered by only one face ends with its twin carrying no
/// incident faces.
///
/// Empty face records are skipped without error; face records with fewer
/// than three vertices are skipped with a warning.
///
/// # Errors
///
/// [`Error::InvalidVertexIndex`] when a face references a vertex outside the
/// vertex list.
///
/// # Example
/// ```
/// use strata::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2]];
///
/// let mesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_halfedges(), 6);
/// ```
pub fn build_from_polygons(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<HalfEdgeMesh> {
    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= vertices.len() {
                return Err(Error::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
    }

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());

    for &pos in vertices {
        mesh.add_vertex(pos);
    }

    for (fi, face) in faces.iter().enumerate() {
        if face.is_empty() {
            continue;
        }
        if face.len() < 3 {
            warn!(face = fi, indices = face.len(), "skipping face with fewer than 3 vertices");
            continue;
        }

        let face_id = FaceId::new(mesh.num_faces());
        mesh.faces.push(Face::new());

        for i in 0..face.len() {
            let tail = face[i].into();
            let head = face[(i + 1) % face.len()].into();

            let he = match mesh.find_halfedge(tail, head) {
                // A neighboring face already created this edge while winding
                // the other way; reuse its half-edge.
                Some(he) => he,
                None => mesh.add_edge(tail, head),
            };

            mesh.halfedges[he.index()].faces.push(face_id);
            mesh.faces[face_id.index()].halfedges.push(he);
        }
    }

    debug!(
        vertices = mesh.num_vertices(),
        halfedges = mesh.num_halfedges(),
        faces = mesh.num_faces(),
        "built half-edge mesh"
    );

    Ok(mesh)
}
