//! Half-edge mesh data structure.
//!
//! Each geometric edge is represented by a pair of oppositely directed
//! half-edges linked as mutual twins. Faces store their boundary loop as an
//! ordered list of half-edge ids in winding order, half-edges store the faces
//! incident to them, and vertices store their outgoing half-edges. All
//! cross-references are plain indices into arenas owned by [`HalfEdgeMesh`].
//!
//! # Boundary Handling
//!
//! A face attaches itself to the half-edge that follows its own winding, so
//! the twin of an edge bordered by a single face carries zero incident faces.
//! [`HalfEdge::is_boundary`] tests exactly that.

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use super::index::{FaceId, HalfEdgeId, VertexId};
use crate::error::{Error, Result};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// The vertex normal, derived by [`HalfEdgeMesh::compute_normals`].
    /// Zero until normals have been computed.
    pub normal: Vector3<f64>,

    /// A display color, assigned by the consumer. Never interpreted by this
    /// crate.
    pub color: Vector3<f64>,

    /// Outgoing half-edges, in the order they were attached.
    pub(crate) outgoing: Vec<HalfEdgeId>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            color: Vector3::zeros(),
            outgoing: Vec::new(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// The outgoing half-edges of this vertex.
    #[inline]
    pub fn outgoing(&self) -> &[HalfEdgeId] {
        &self.outgoing
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    /// The vertex this half-edge originates from.
    pub tail: VertexId,

    /// The vertex this half-edge points to.
    pub head: VertexId,

    /// The opposite half-edge (same geometric edge, reversed direction).
    pub twin: HalfEdgeId,

    /// Faces incident to this half-edge. Zero for boundary twins, one for
    /// interior half-edges of a manifold mesh.
    pub(crate) faces: Vec<FaceId>,
}

impl HalfEdge {
    pub(crate) fn new(tail: VertexId, head: VertexId, twin: HalfEdgeId) -> Self {
        Self {
            tail,
            head,
            twin,
            faces: Vec::new(),
        }
    }

    /// The faces incident to this half-edge.
    #[inline]
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Check if this half-edge has no incident face.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Face {
    /// The face normal, derived by [`HalfEdgeMesh::compute_normals`].
    /// Zero until normals have been computed.
    pub normal: Vector3<f64>,

    /// The boundary loop, in winding order. Each half-edge's head equals the
    /// next half-edge's tail, and the loop closes from last back to first.
    pub(crate) halfedges: Vec<HalfEdgeId>,
}

impl Face {
    pub(crate) fn new() -> Self {
        Self {
            normal: Vector3::zeros(),
            halfedges: Vec::new(),
        }
    }

    /// The boundary loop of this face, in winding order.
    #[inline]
    pub fn halfedges(&self) -> &[HalfEdgeId] {
        &self.halfedges
    }
}

/// A half-edge mesh for polygonal faces.
///
/// The mesh owns three arenas (vertices, half-edges, faces); an element's id
/// is its position in its arena. Topology is fixed once built; positions,
/// normals, and colors remain mutable in place.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex>,

    /// All half-edges in the mesh. Twins are adjacent (forward at even
    /// offsets from their creation point, twin immediately after).
    pub(crate) halfedges: Vec<HalfEdge>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face>,
}

impl HalfEdgeMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // For a closed triangle mesh E = 3F/2, so 3F half-edges; polygon
        // faces and boundaries shift this, but it is a fine starting guess.
        let num_halfedges = num_faces * 3;

        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by id.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by id.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by id.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[id.index()]
    }

    /// Get a face by id.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    /// Get the normal of a vertex.
    #[inline]
    pub fn normal(&self, v: VertexId) -> &Vector3<f64> {
        &self.vertex(v).normal
    }

    /// Get the display color of a vertex.
    #[inline]
    pub fn color(&self, v: VertexId) -> &Vector3<f64> {
        &self.vertex(v).color
    }

    /// Set the display color of a vertex.
    #[inline]
    pub fn set_color(&mut self, v: VertexId, color: Vector3<f64>) {
        self.vertex_mut(v).color = color;
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).twin
    }

    /// Get the tail (origin) vertex of a half-edge.
    #[inline]
    pub fn tail(&self, he: HalfEdgeId) -> VertexId {
        self.halfedge(he).tail
    }

    /// Get the head (destination) vertex of a half-edge.
    #[inline]
    pub fn head(&self, he: HalfEdgeId) -> VertexId {
        self.halfedge(he).head
    }

    /// Find the half-edge from `tail` to `head`, if it exists.
    ///
    /// This is a linear scan over the tail vertex's outgoing half-edges,
    /// which is cheap for the low valences of typical polygon meshes.
    pub fn find_halfedge(&self, tail: VertexId, head: VertexId) -> Option<HalfEdgeId> {
        self.vertex(tail)
            .outgoing
            .iter()
            .copied()
            .find(|&he| self.halfedge(he).head == head)
    }

    /// Iterate over vertices adjacent to a vertex.
    pub fn vertex_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex(v).outgoing.iter().map(|&he| self.head(he))
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their ids.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all half-edge ids.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all half-edges with their ids.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all faces with their ids.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its id.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    /// Add a half-edge from `tail` to `head` together with its twin.
    ///
    /// Both half-edges are appended to the arena and registered as outgoing
    /// on their respective tail vertices. Returns the forward half-edge; its
    /// twin is reachable through [`HalfEdgeMesh::twin`].
    pub fn add_edge(&mut self, tail: VertexId, head: VertexId) -> HalfEdgeId {
        let he = HalfEdgeId::new(self.halfedges.len());
        let tw = HalfEdgeId::new(self.halfedges.len() + 1);

        self.halfedges.push(HalfEdge::new(tail, head, tw));
        self.halfedges.push(HalfEdge::new(head, tail, he));

        self.vertices[tail.index()].outgoing.push(he);
        self.vertices[head.index()].outgoing.push(tw);

        he
    }

    // ==================== Geometry ====================

    /// The edge vector of a half-edge (head position minus tail position).
    pub fn edge_vector(&self, he: HalfEdgeId) -> Vector3<f64> {
        let e = self.halfedge(he);
        self.position(e.head) - self.position(e.tail)
    }

    /// Compute the normal of a face.
    ///
    /// The normal is the normalized cross product of the face's first two
    /// boundary edge vectors, so it follows the face winding. Collinear or
    /// degenerate leading edges yield a non-unit (possibly NaN) result; this
    /// is not validated.
    pub fn face_normal(&self, f: FaceId) -> Vector3<f64> {
        let loop_ = &self.face(f).halfedges;
        let e0 = self.edge_vector(loop_[0]);
        let e1 = self.edge_vector(loop_[1]);
        e0.cross(&e1).normalize()
    }

    /// Compute and store normals for every face and every vertex.
    ///
    /// Face normals come from [`HalfEdgeMesh::face_normal`]. A vertex normal
    /// averages the normals of all faces reachable through the vertex's
    /// outgoing half-edges, then normalizes. A vertex with no incident face
    /// has no defined normal and aborts with [`Error::IsolatedVertex`].
    pub fn compute_normals(&mut self) -> Result<()> {
        for i in 0..self.faces.len() {
            self.faces[i].normal = self.face_normal(FaceId::new(i));
        }

        for vi in 0..self.vertices.len() {
            let mut normal = Vector3::zeros();
            let mut count = 0usize;

            for &he in &self.vertices[vi].outgoing {
                for &f in &self.halfedges[he.index()].faces {
                    normal += self.faces[f.index()].normal;
                    count += 1;
                }
            }

            if count == 0 {
                return Err(Error::IsolatedVertex { vertex: vi });
            }

            self.vertices[vi].normal = (normal / count as f64).normalize();
        }

        debug!(
            faces = self.faces.len(),
            vertices = self.vertices.len(),
            "computed normals"
        );

        Ok(())
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = self.vertices[0].position;
        let mut max = self.vertices[0].position;

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }

    /// Scale the mesh so its dominant bounding-box axis has unit extent.
    ///
    /// Every position is divided by the extent of the strictly largest axis,
    /// preserving aspect ratio. The mesh is not re-centered. Returns the
    /// scale factor that was applied.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyMesh`] for a mesh with no vertices, and
    /// [`Error::DegenerateExtent`] when no axis is strictly largest (tied or
    /// collapsed bounding boxes leave the scale factor undefined).
    pub fn normalize(&mut self) -> Result<f64> {
        let (min, max) = self.bounding_box().ok_or(Error::EmptyMesh)?;
        let extent = max - min;
        let (x, y, z) = (extent.x, extent.y, extent.z);

        let scale = if x > y && x > z {
            x
        } else if y > x && y > z {
            y
        } else if z > x && z > y {
            z
        } else {
            return Err(Error::DegenerateExtent { x, y, z });
        };

        for v in &mut self.vertices {
            v.position = Point3::from(v.position.coords / scale);
        }

        Ok(scale)
    }

    // ==================== Validation ====================

    /// Check that the mesh's connectivity is consistent.
    ///
    /// Verifies twin involution, twin endpoint reversal, uniqueness of
    /// (tail, head) pairs, outgoing-list tails, and face loop closure.
    pub fn is_valid(&self) -> bool {
        let mut seen = HashSet::new();

        for (id, he) in self.halfedges() {
            let twin = self.halfedge(he.twin);
            if twin.twin != id {
                return false;
            }
            if twin.tail != he.head || twin.head != he.tail {
                return false;
            }
            if !seen.insert((he.tail, he.head)) {
                return false;
            }
        }

        for (vid, v) in self.vertices() {
            for &he in &v.outgoing {
                if self.halfedge(he).tail != vid {
                    return false;
                }
            }
        }

        for (_, f) in self.faces() {
            let n = f.halfedges.len();
            if n < 3 {
                return false;
            }
            for i in 0..n {
                let here = self.halfedge(f.halfedges[i]);
                let next = self.halfedge(f.halfedges[(i + 1) % n]);
                if here.head != next.tail {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_polygons;
    use approx::assert_relative_eq;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert!(v.outgoing().is_empty());
        assert_eq!(v.normal, Vector3::zeros());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_edge_links_twins() {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(Point3::origin());
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));

        let he = mesh.add_edge(v0, v1);
        let tw = mesh.twin(he);

        assert_eq!(mesh.num_halfedges(), 2);
        assert_eq!(mesh.twin(tw), he);
        assert_eq!(mesh.tail(he), v0);
        assert_eq!(mesh.head(he), v1);
        assert_eq!(mesh.tail(tw), v1);
        assert_eq!(mesh.head(tw), v0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_find_halfedge() {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(Point3::origin());
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));

        let he = mesh.add_edge(v0, v1);

        assert_eq!(mesh.find_halfedge(v0, v1), Some(he));
        assert_eq!(mesh.find_halfedge(v1, v0), Some(mesh.twin(he)));
        assert_eq!(mesh.find_halfedge(v0, v2), None);
    }

    #[test]
    fn test_vertex_neighbors() {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(Point3::origin());
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));

        mesh.add_edge(v0, v1);
        mesh.add_edge(v0, v2);

        let neighbors: Vec<_> = mesh.vertex_neighbors(v0).collect();
        assert_eq!(neighbors, vec![v1, v2]);
        // Twins give the reverse adjacency.
        let back: Vec<_> = mesh.vertex_neighbors(v1).collect();
        assert_eq!(back, vec![v0]);
    }

    #[test]
    fn test_quad_face_normal() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2, 3]];
        let mesh = build_from_polygons(&vertices, &faces).unwrap();

        let n = mesh.face_normal(FaceId::new(0));

        // Unit length, +z for counter-clockwise winding in the xy plane.
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);

        // Orthogonal to the first two edge vectors.
        let f = mesh.face(FaceId::new(0));
        assert_relative_eq!(n.dot(&mesh.edge_vector(f.halfedges()[0])), 0.0, epsilon = 1e-12);
        assert_relative_eq!(n.dot(&mesh.edge_vector(f.halfedges()[1])), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compute_normals_isolated_vertex() {
        let mut mesh = HalfEdgeMesh::new();
        mesh.add_vertex(Point3::origin());

        match mesh.compute_normals() {
            Err(Error::IsolatedVertex { vertex: 0 }) => {}
            other => panic!("expected IsolatedVertex error, got {:?}", other),
        }
    }

    #[test]
    fn test_bounding_box() {
        let mut mesh = HalfEdgeMesh::new();
        mesh.add_vertex(Point3::new(-1.0, 2.0, 0.5));
        mesh.add_vertex(Point3::new(3.0, -2.0, 0.0));

        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3::new(3.0, 2.0, 0.5));
    }

    #[test]
    fn test_normalize_scales_dominant_axis() {
        let mut mesh = HalfEdgeMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(4.0, 2.0, 1.0));

        let scale = mesh.normalize().unwrap();
        assert_relative_eq!(scale, 4.0);

        // Aspect ratio preserved, no re-centering.
        assert_eq!(*mesh.position(VertexId::new(1)), Point3::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_normalize_empty_mesh() {
        let mut mesh = HalfEdgeMesh::new();
        assert!(matches!(mesh.normalize(), Err(Error::EmptyMesh)));
    }

    #[test]
    fn test_normalize_tied_extents() {
        let mut mesh = HalfEdgeMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.5));

        match mesh.normalize() {
            Err(Error::DegenerateExtent { .. }) => {}
            other => panic!("expected DegenerateExtent error, got {:?}", other),
        }
    }
}
