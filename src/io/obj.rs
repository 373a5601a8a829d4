//! Minimal polygon OBJ support.
//!
//! Supports the subset of Wavefront OBJ used for plain polygon soup: `v`
//! records carrying three coordinates, followed by `f` records carrying
//! 1-indexed vertex lists. Comments and any other record types (`vn`, `vt`,
//! materials, ...) are skipped; texture/normal suffixes inside face indices
//! are not supported.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use tracing::warn;

use crate::error::{Error, Result};
use crate::mesh::{build_from_polygons, HalfEdgeMesh};

fn load_err(path: &Path, line: usize, message: impl Into<String>) -> Error {
    Error::LoadError {
        path: path.to_path_buf(),
        message: format!("line {}: {}", line, message.into()),
    }
}

/// Load a mesh from a polygon OBJ file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened, [`Error::LoadError`] for
/// malformed vertex coordinates or face indices (including the reserved
/// index 0), and [`Error::InvalidVertexIndex`] when a face references a
/// vertex past the end of the vertex list.
///
/// # Example
///
/// ```no_run
/// use strata::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// println!("{} vertices", mesh.num_vertices());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<HalfEdgeMesh> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = i + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut coords = [0.0f64; 3];
                for c in &mut coords {
                    let token = tokens
                        .next()
                        .ok_or_else(|| load_err(path, lineno, "vertex record needs 3 coordinates"))?;
                    *c = token.parse().map_err(|_| {
                        load_err(path, lineno, format!("invalid coordinate '{}'", token))
                    })?;
                }
                vertices.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let mut face = Vec::new();
                for token in tokens {
                    let index: usize = token.parse().map_err(|_| {
                        load_err(path, lineno, format!("invalid face index '{}'", token))
                    })?;
                    if index == 0 {
                        return Err(load_err(path, lineno, "face indices are 1-based"));
                    }
                    face.push(index - 1);
                }
                faces.push(face);
            }
            Some(record) => {
                warn!(record, line = lineno, "skipping unsupported OBJ record");
            }
            None => {}
        }
    }

    if vertices.is_empty() {
        return Err(Error::EmptyMesh);
    }

    build_from_polygons(&vertices, &faces)
}

/// Save a mesh to a polygon OBJ file.
///
/// Writes all vertices in id order, then each face as its loop's tail
/// vertices, 1-indexed, in winding order.
///
/// # Errors
///
/// [`Error::SaveError`] if the destination cannot be created, and
/// [`Error::Io`] if writing to it fails.
pub fn save<P: AsRef<Path>>(mesh: &HalfEdgeMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);

    for (_, v) in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }

    for (_, f) in mesh.faces() {
        write!(writer, "f")?;
        for &he in f.halfedges() {
            write!(writer, " {}", mesh.tail(he).index() + 1)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const CUBE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 3 4 8 7
f 2 3 7 6
f 4 1 5 8
";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_cube() {
        let file = write_temp(CUBE_OBJ);
        let mesh = load(file.path()).unwrap();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_halfedges(), 24);
        assert_eq!(mesh.num_faces(), 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_load_skips_blank_lines_and_comments() {
        let file = write_temp("# a comment\nv 0 0 0\n\nv 1 0 0\nv 0 1 0\n\nf 1 2 3\n\n");
        let mesh = load(file.path()).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/mesh.obj").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_malformed_coordinate() {
        let file = write_temp("v 0 zero 0\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::LoadError { .. }));
    }

    #[test]
    fn test_load_rejects_zero_face_index() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::LoadError { .. }));
    }

    #[test]
    fn test_load_face_index_out_of_range() {
        let file = write_temp("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidVertexIndex { .. }));
    }

    #[test]
    fn test_save_unwritable_destination() {
        let file = write_temp(CUBE_OBJ);
        let mesh = load(file.path()).unwrap();

        match save(&mesh, "/nonexistent/dir/mesh.obj") {
            Err(Error::SaveError { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/dir/mesh.obj"));
            }
            other => panic!("expected SaveError, got {:?}", other),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let file = write_temp(CUBE_OBJ);
        let mesh = load(file.path()).unwrap();

        let out = tempfile::NamedTempFile::new().unwrap();
        save(&mesh, out.path()).unwrap();
        let reloaded = load(out.path()).unwrap();

        assert_eq!(reloaded.num_vertices(), mesh.num_vertices());
        assert_eq!(reloaded.num_halfedges(), mesh.num_halfedges());
        assert_eq!(reloaded.num_faces(), mesh.num_faces());

        for (v_in, v_out) in mesh.vertices().zip(reloaded.vertices()) {
            assert_eq!(v_in.1.position, v_out.1.position);
        }
    }
}
