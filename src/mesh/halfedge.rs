//! Half-edge mesh data structure with cached attributes.
//!
//! This module provides a half-edge representation for triangle meshes in
//! which each element record carries its differential-geometry attributes
//! alongside its connectivity: vertices cache their ordered neighbor ring,
//! valence, and area-weighted normal; half-edges cache their length; faces
//! cache their area and unit normal.
//!
//! The cached attributes are *not* kept up to date automatically. After an
//! edit, the editing layer hands the touched element indices to the
//! [`crate::attrib`] refresh routines, which recompute only those elements.
//!
//! # Structure
//!
//! - Each edge is split into two **half-edges** pointing in opposite
//!   directions. Each half-edge knows the **vertex it points to**, its
//!   **twin**, the **next**/**prev** half-edges around its face, and the
//!   **face** it borders.
//! - Each vertex stores one outgoing half-edge.
//! - Each face stores one bounding half-edge.
//!
//! # Boundary Handling
//!
//! There are no dedicated boundary half-edge records: a half-edge on an
//! open boundary simply has an invalid `twin`. Ring traversal reverses
//! direction when it runs into such an edge (see
//! [`crate::attrib::refresh_vertex_neighbors`]).

use nalgebra::{Point3, Vector3};

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};

/// Fixed capacity of the per-vertex neighbor ring storage.
///
/// Vertices of higher valence keep their full valence count and normal, but
/// only the first `NEIGHBOR_CAPACITY` ring half-edges are stored by index;
/// the refresh routine logs a warning when this happens.
pub const NEIGHBOR_CAPACITY: usize = 20;

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Cached area-weighted unit normal, or zero if never refreshed or
    /// degenerate.
    pub normal: Vector3<f64>,

    /// Cached ring half-edges in rotational order, invalid-padded.
    pub neighbors: [HalfEdgeId<I>; NEIGHBOR_CAPACITY],

    /// Cached ring step count (may exceed [`NEIGHBOR_CAPACITY`]).
    pub valence: usize,

    /// One outgoing half-edge from this vertex.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new vertex at the given position, with empty attributes.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            neighbors: [HalfEdgeId::invalid(); NEIGHBOR_CAPACITY],
            valence: 0,
            halfedge: HalfEdgeId::invalid(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge points to (its destination).
    pub vertex: VertexId<I>,

    /// The face this half-edge borders.
    pub face: FaceId<I>,

    /// The opposite half-edge, or invalid on an open boundary.
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    /// Redundant with `next` but speeds up reverse traversal.
    pub prev: HalfEdgeId<I>,

    /// Cached edge length, shared with the twin.
    pub length: f64,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new uninitialized half-edge.
    pub fn new() -> Self {
        Self {
            vertex: VertexId::invalid(),
            face: FaceId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            length: 0.0,
        }
    }

    /// Check if this half-edge lies on an open boundary (has no twin).
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.twin.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,

    /// Cached unit normal, or zero if never refreshed or degenerate.
    pub normal: Vector3<f64>,

    /// Cached triangle area.
    pub area: f64,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge and empty attributes.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self {
            halfedge,
            normal: Vector3::zeros(),
            area: 0.0,
        }
    }
}

impl<I: MeshIndex> Default for Face<I> {
    fn default() -> Self {
        Self::new(HalfEdgeId::invalid())
    }
}

/// A half-edge triangle mesh with per-element attribute caches.
///
/// Elements live in three densely-indexed arenas. The mesh owns its
/// storage; refresh calls borrow it exclusively (`&mut`), so there is no
/// locking and no interior mutability anywhere.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices in the mesh.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// All half-edges in the mesh.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// All faces in the mesh.
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // Three half-edges per triangle; boundary edges have no extra record
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_faces * 3),
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

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    /// Get a mutable half-edge by ID.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    ///
    /// The cached attributes of the surrounding elements become stale; hand
    /// the incident faces and vertices to the refresh routines afterwards.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge, invalid on a boundary.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).vertex
    }

    /// Get the origin vertex of a half-edge.
    ///
    /// The origin is the destination of `prev`, which is always valid on a
    /// well-formed triangle face.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.dest(self.prev(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on an open boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all half-edges with their IDs.
    pub fn halfedges(&self) -> impl Iterator<Item = (HalfEdgeId<I>, &HalfEdge<I>)> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId::new(i), he))
    }

    /// Get the three vertices of a face, in winding order.
    pub fn face_triangle(&self, f: FaceId<I>) -> [VertexId<I>; 3] {
        let he0 = self.face(f).halfedge;
        let he1 = self.next(he0);
        let he2 = self.next(he1);
        // The origin of each half-edge is the destination of the one before
        [self.dest(he2), self.dest(he0), self.dest(he1)]
    }

    /// Get the positions of the three vertices of a face.
    pub fn face_positions(&self, f: FaceId<I>) -> [Point3<f64>; 3] {
        let [v0, v1, v2] = self.face_triangle(f);
        [*self.position(v0), *self.position(v1), *self.position(v2)]
    }

    // ==================== Cached Attributes ====================

    /// Cached unit normal of a face (zero if unrefreshed or degenerate).
    #[inline]
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        self.face(f).normal
    }

    /// Cached area of a face.
    #[inline]
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        self.face(f).area
    }

    /// Cached area-weighted unit normal of a vertex.
    #[inline]
    pub fn vertex_normal(&self, v: VertexId<I>) -> Vector3<f64> {
        self.vertex(v).normal
    }

    /// Cached valence (ring step count) of a vertex.
    #[inline]
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex(v).valence
    }

    /// Cached length of an edge.
    #[inline]
    pub fn edge_length(&self, he: HalfEdgeId<I>) -> f64 {
        self.halfedge(he).length
    }

    /// Iterate over the stored ring half-edges of a vertex, in rotational
    /// order.
    ///
    /// Yields at most [`NEIGHBOR_CAPACITY`] entries; compare with
    /// [`valence`](Self::valence) to detect truncated rings.
    pub fn neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.vertex(v)
            .neighbors
            .iter()
            .copied()
            .take_while(|he| he.is_valid())
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    // ==================== Validation ====================

    /// Check if the mesh connectivity is consistent.
    pub fn is_valid(&self) -> bool {
        // Check vertices: the stored half-edge must originate here
        for (i, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() {
                if v.halfedge.index() >= self.halfedges.len() {
                    return false;
                }
                let prev = self.prev(v.halfedge);
                if !prev.is_valid() || self.dest(prev).index() != i {
                    return false;
                }
            }
        }

        // Check half-edges
        for (heid, he) in self.halfedges() {
            // Twin consistency
            if he.twin.is_valid() {
                if self.halfedge(he.twin).twin != heid {
                    return false;
                }
            }

            // Next/prev consistency
            if he.next.is_valid() && self.halfedge(he.next).prev != heid {
                return false;
            }
            if he.prev.is_valid() && self.halfedge(he.prev).next != heid {
                return false;
            }
        }

        // Check faces: bounding loop must close after exactly three steps
        for f in self.face_ids() {
            let he0 = self.face(f).halfedge;
            if !he0.is_valid() {
                return false;
            }
            if self.next(self.next(self.next(he0))) != he0 {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::<u32>::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, Vector3::zeros());
        assert_eq!(v.valence, 0);
        assert!(!v.halfedge.is_valid());
        assert!(v.neighbors.iter().all(|he| !he.is_valid()));
    }

    #[test]
    fn test_halfedge_boundary() {
        let he = HalfEdge::<u32>::new();
        assert!(he.is_boundary());
        assert_eq!(he.length, 0.0);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));

        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(v0.index(), 0);
        assert_eq!(v1.index(), 1);
    }
}
