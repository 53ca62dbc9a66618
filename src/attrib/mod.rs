//! Incremental attribute refresh.
//!
//! After a local mesh edit (vertex move, edge flip, subdivision), the
//! editing layer knows which elements were touched. Rather than rescanning
//! the whole mesh, it hands those indices to the two routines here:
//!
//! 1. [`refresh_face_attributes`] - recompute `area` and `normal` of the
//!    named faces from current vertex positions.
//! 2. [`refresh_vertex_neighbors`] - rebuild the ordered neighbor ring,
//!    `valence`, and area-weighted `normal` of the named vertices, writing
//!    incident edge `length`s along the way.
//!
//! The order matters: vertex normals are accumulated from the cached face
//! attributes, so faces go first. [`refresh_all`] packages that ordering
//! for a whole-mesh refresh.
//!
//! Both routines are synchronous, single-threaded, and take the mesh by
//! exclusive borrow. Element index lists may contain sentinel
//! (invalid) entries and duplicates; malformed per-element topology is
//! skipped leniently rather than reported, so a single bad element never
//! aborts a batch. See the individual functions for the two error cases
//! that *are* hard failures.

mod face;
mod vertex;

pub use face::refresh_face_attributes;
pub use vertex::refresh_vertex_neighbors;

use crate::error::Result;
use crate::mesh::{FaceId, HalfEdgeMesh, MeshIndex, VertexId};

/// Refresh the attributes of every face, then every vertex.
///
/// Equivalent to calling [`refresh_face_attributes`] with all face ids
/// followed by [`refresh_vertex_neighbors`] with all vertex ids; the
/// natural call after building a mesh or a non-local edit.
///
/// # Example
/// ```
/// use lamella::attrib::refresh_all;
/// use lamella::mesh::{build_from_triangles, HalfEdgeMesh, VertexId};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
///
/// refresh_all(&mut mesh).unwrap();
/// assert!(mesh.vertex_normal(VertexId::new(0)).z > 0.99);
/// ```
pub fn refresh_all<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let faces: Vec<FaceId<I>> = mesh.face_ids().collect();
    refresh_face_attributes(mesh, &faces)?;
    let vertices: Vec<VertexId<I>> = mesh.vertex_ids().collect();
    refresh_vertex_neighbors(mesh, &vertices)
}
