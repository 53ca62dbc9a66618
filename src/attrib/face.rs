//! Face attribute refresh.
//!
//! Recomputes the cached area and unit normal of a set of faces from the
//! current vertex positions. Must run before
//! [`refresh_vertex_neighbors`](crate::attrib::refresh_vertex_neighbors)
//! for the same edit, since vertex normals are accumulated from the cached
//! face attributes.

use nalgebra::Vector3;

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, HalfEdgeMesh, MeshIndex};

/// Recompute the cached `area` and `normal` of each listed face.
///
/// Invalid (sentinel) entries and duplicates in `face_ids` are allowed:
/// sentinels are skipped, duplicates are recomputed idempotently. A face
/// whose connectivity is incomplete (unset `halfedge`, `prev`, or `next`)
/// is left untouched rather than reported; callers needing to detect
/// malformed topology must validate separately.
///
/// # Errors
///
/// Returns [`MeshError::FaceOutOfRange`] if any valid id lies beyond the
/// face arena. The list is validated up front, so on error no face has
/// been modified.
///
/// # Example
/// ```
/// use lamella::attrib::refresh_face_attributes;
/// use lamella::mesh::{build_from_triangles, FaceId, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
///
/// refresh_face_attributes(&mut mesh, &[FaceId::new(0)]).unwrap();
/// assert!((mesh.face_area(FaceId::new(0)) - 0.5).abs() < 1e-12);
/// ```
pub fn refresh_face_attributes<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    face_ids: &[FaceId<I>],
) -> Result<()> {
    // Validate the whole list before touching anything
    for &f in face_ids {
        if f.is_valid() && f.index() >= mesh.num_faces() {
            return Err(MeshError::FaceOutOfRange {
                face: f.index(),
                num_faces: mesh.num_faces(),
            });
        }
    }

    for &f in face_ids {
        if !f.is_valid() {
            continue;
        }

        let e0 = mesh.face(f).halfedge;
        if !e0.is_valid() {
            continue;
        }
        let prev = mesh.prev(e0);
        let next = mesh.next(e0);
        if !prev.is_valid() || !next.is_valid() {
            continue;
        }

        // Triangle corners: each half-edge contributes the vertex it
        // points to
        let curr = *mesh.position(mesh.dest(e0));
        let u = mesh.position(mesh.dest(prev)) - curr;
        let v = mesh.position(mesh.dest(next)) - curr;

        let n = u.cross(&v);
        let nn = n.norm();

        let face = mesh.face_mut(f);
        face.area = 0.5 * nn;
        face.normal = if nn > 0.0 { n / nn } else { Vector3::zeros() };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_triangles, HalfEdgeId};
    use nalgebra::Point3;

    fn unit_right_triangle() -> HalfEdgeMesh<u32> {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_area_and_normal() {
        let mut mesh = unit_right_triangle();
        let f = FaceId::new(0);

        refresh_face_attributes(&mut mesh, &[f]).unwrap();

        assert!((mesh.face_area(f) - 0.5).abs() < 1e-12);
        let n = mesh.face_normal(f);
        // CCW winding in the xy-plane gives +z
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_face_zeroes_attributes() {
        // All three corners coincide
        let vertices = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        let mut mesh: HalfEdgeMesh<u32> = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        let f = FaceId::new(0);

        refresh_face_attributes(&mut mesh, &[f]).unwrap();

        assert_eq!(mesh.face_area(f), 0.0);
        assert_eq!(mesh.face_normal(f), Vector3::zeros());
    }

    #[test]
    fn test_sentinel_and_duplicates() {
        let mut mesh = unit_right_triangle();
        let f = FaceId::new(0);

        refresh_face_attributes(&mut mesh, &[FaceId::invalid(), f, f]).unwrap();
        let area_once = mesh.face_area(f);
        let normal_once = mesh.face_normal(f);

        refresh_face_attributes(&mut mesh, &[f]).unwrap();
        assert_eq!(mesh.face_area(f), area_once);
        assert_eq!(mesh.face_normal(f), normal_once);
    }

    #[test]
    fn test_out_of_range_is_hard_error() {
        let mut mesh = unit_right_triangle();
        let good = FaceId::new(0);
        let bad = FaceId::new(7);

        // Listed after a good index, but nothing may be mutated
        let err = refresh_face_attributes(&mut mesh, &[good, bad]).unwrap_err();
        assert!(matches!(err, MeshError::FaceOutOfRange { face: 7, .. }));
        assert_eq!(mesh.face_area(good), 0.0);
    }

    #[test]
    fn test_incomplete_face_left_untouched() {
        let mut mesh = unit_right_triangle();
        let f = FaceId::new(0);
        refresh_face_attributes(&mut mesh, &[f]).unwrap();
        let area = mesh.face_area(f);

        // Sever the face's bounding loop; the stale attributes must survive
        let e0 = mesh.face(f).halfedge;
        mesh.halfedge_mut(e0).next = HalfEdgeId::invalid();
        mesh.set_position(crate::mesh::VertexId::new(1), Point3::new(5.0, 0.0, 0.0));

        refresh_face_attributes(&mut mesh, &[f]).unwrap();
        assert_eq!(mesh.face_area(f), area);
    }
}
