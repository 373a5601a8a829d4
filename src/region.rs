//! Seeded region growing over the mesh vertex graph.
//!
//! A [`Segment`] is a connected subset of mesh vertices grown outward from a
//! seed by breadth-first traversal. Candidate vertices are admitted by a
//! [`Criterion`] comparing their scalar-field value against the seed's; a
//! vertex that fails the test is marked but never explored through, so it
//! acts as a boundary of the region.

use std::collections::VecDeque;

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::ScalarField;
use crate::mesh::{HalfEdgeMesh, VertexId};

/// Membership predicate for region growing, evaluated against the seed's
/// scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Exact numeric equality with the seed value. No tolerance is applied,
    /// so this is fragile under floating-point noise; it is intended for
    /// discretized fields (see [`ScalarField::segment`]).
    Equal,

    /// Candidate value `>=` seed value.
    GreaterEqual,

    /// Candidate value `<=` seed value.
    LesserEqual,
}

impl Criterion {
    /// Test a candidate value against the seed value.
    #[inline]
    pub fn accepts(self, candidate: f64, seed: f64) -> bool {
        match self {
            Criterion::Equal => candidate == seed,
            Criterion::GreaterEqual => candidate >= seed,
            Criterion::LesserEqual => candidate <= seed,
        }
    }
}

/// A connected vertex subset grown from a seed.
///
/// Membership is fixed at construction. The id, depth, and color are
/// bookkeeping for the consumer (a viewer, typically) and are never
/// interpreted by this crate.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    id: usize,
    depth: f64,
    color: Vector3<f64>,
    verts: Vec<VertexId>,
}

impl Segment {
    /// Grow a segment from `seed` over `mesh`, guided by `field`.
    ///
    /// Starting from the seed, which is included unconditionally and never
    /// tested against the criterion, a breadth-first traversal visits the
    /// head of every half-edge outgoing from each accepted vertex. An
    /// unvisited head is marked visited regardless of outcome, then tested;
    /// only accepting heads are collected and explored further. The result
    /// is exactly the connected component of the seed within the subgraph
    /// of vertices satisfying the criterion.
    ///
    /// # Errors
    ///
    /// [`Error::FieldSizeMismatch`] when the field is not index-aligned
    /// with the mesh, and [`Error::VertexOutOfRange`] for a seed outside
    /// the vertex arena.
    pub fn from_seed(
        mesh: &HalfEdgeMesh,
        field: &ScalarField,
        seed: VertexId,
        criterion: Criterion,
    ) -> Result<Segment> {
        if field.len() != mesh.num_vertices() {
            return Err(Error::FieldSizeMismatch {
                field: field.len(),
                mesh: mesh.num_vertices(),
            });
        }
        if seed.index() >= mesh.num_vertices() {
            return Err(Error::VertexOutOfRange {
                vertex: seed.index(),
                len: mesh.num_vertices(),
            });
        }

        let seed_value = field.value(seed.index());

        let mut visited = vec![false; mesh.num_vertices()];
        let mut queue = VecDeque::new();
        let mut verts = Vec::new();

        visited[seed.index()] = true;
        verts.push(seed);
        queue.push_back(seed);

        while let Some(v) = queue.pop_front() {
            for &he in mesh.vertex(v).outgoing() {
                let head = mesh.head(he);
                if visited[head.index()] {
                    continue;
                }
                // Marked whether or not it passes: a rejected vertex is a
                // boundary and must not be re-examined from another side.
                visited[head.index()] = true;

                if criterion.accepts(field.value(head.index()), seed_value) {
                    verts.push(head);
                    queue.push_back(head);
                }
            }
        }

        debug!(seed = seed.index(), ?criterion, size = verts.len(), "grew segment");

        Ok(Segment {
            id: 0,
            depth: 0.0,
            color: Vector3::zeros(),
            verts,
        })
    }

    /// The segment's id (caller-assigned).
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Set the segment's id.
    #[inline]
    pub fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    /// The segment's depth value (caller-assigned, not computed here).
    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Set the segment's depth value.
    #[inline]
    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth;
    }

    /// The segment's display color (caller-assigned).
    #[inline]
    pub fn color(&self) -> &Vector3<f64> {
        &self.color
    }

    /// Set the segment's display color.
    #[inline]
    pub fn set_color(&mut self, color: Vector3<f64>) {
        self.color = color;
    }

    /// The member vertices, in traversal order (the seed first).
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.verts
    }

    /// The number of member vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Check if the segment has no members. Never true for a segment built
    /// by [`Segment::from_seed`], which always contains its seed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Test whether a vertex belongs to this segment.
    pub fn contains(&self, v: VertexId) -> bool {
        self.verts.contains(&v)
    }
}
