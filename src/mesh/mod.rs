//! Half-edge mesh data structures and construction.
//!
//! The [`HalfEdgeMesh`] owns arenas of vertices, half-edges, and faces;
//! [`build_from_polygons`] assembles one from a polygon soup. See
//! [`halfedge`] for the data structure and [`index`] for the typed ids.

pub mod builder;
pub mod halfedge;
pub mod index;

pub use builder::build_from_polygons;
pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, VertexId};
