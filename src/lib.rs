//! # Strata
//!
//! A half-edge mesh library with per-vertex scalar fields and seeded region
//! growing, for scalar-field-driven mesh segmentation.
//!
//! Strata builds consistent half-edge topology from raw polygon soup,
//! derives face and vertex normals from that topology, and grows connected
//! vertex regions over the mesh graph under pluggable membership criteria.
//!
//! ## Features
//!
//! - **Half-edge topology from polygon soup**: shared edges are
//!   deduplicated into twin pairs during construction
//! - **Derived geometry**: face and vertex normals, bounding boxes,
//!   unit-box normalization
//! - **Scalar fields**: per-vertex value arrays with range remapping and
//!   discretization into classes
//! - **Region growing**: breadth-first segmentation from a seed vertex
//!   with equality and threshold criteria
//!
//! ## Quick Start
//!
//! ```no_run
//! use strata::prelude::*;
//!
//! // Load a mesh and a per-vertex scalar field.
//! let mut mesh = strata::io::obj::load("model.obj").unwrap();
//! let field = ScalarField::load("model.field").unwrap();
//!
//! mesh.compute_normals().unwrap();
//!
//! // Grow the region of vertices sharing the seed's value.
//! let seed = VertexId::new(0);
//! let segment = Segment::from_seed(&mesh, &field, seed, Criterion::Equal).unwrap();
//! println!("segment holds {} of {} vertices", segment.len(), mesh.num_vertices());
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use strata::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     vec![0, 2, 1], // bottom
//!     vec![0, 1, 3], // front
//!     vec![1, 2, 3], // right
//!     vec![2, 0, 3], // left
//! ];
//!
//! let mesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod io;
pub mod mesh;
pub mod region;

/// Prelude module for convenient imports.
///
/// ```
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::ScalarField;
    pub use crate::mesh::{
        build_from_polygons, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, Vertex, VertexId,
    };
    pub use crate::region::{Criterion, Segment};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
