//! # Lamella
//!
//! Incremental maintenance of differential-geometry attributes on
//! half-edge triangle meshes.
//!
//! Lamella keeps per-element attribute caches - vertex normals and ordered
//! neighbor rings, edge lengths, face areas and normals - attached to a
//! half-edge mesh, and recomputes them for just the elements an edit
//! touched instead of rescanning the whole mesh.
//!
//! ## Features
//!
//! - **Half-edge data structure**: arena-backed records with type-safe
//!   indices (`u16`/`u32`/`u64` widths)
//! - **Incremental refresh**: callers pass the face and vertex index sets
//!   to recompute; everything else is left alone
//! - **Boundary-aware ring traversal**: open boundaries are detected
//!   mid-walk and the traversal reverses direction to cover the whole fan
//! - **Lenient by default**: malformed per-element topology is skipped,
//!   never aborts a batch; corrupted ring cycles are reported instead of
//!   hanging
//!
//! ## Quick Start
//!
//! ```
//! use lamella::prelude::*;
//! use nalgebra::Point3;
//!
//! // A tetrahedron
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![
//!     [0, 2, 1], // bottom
//!     [0, 1, 3], // front
//!     [1, 2, 3], // right
//!     [2, 0, 3], // left
//! ];
//! let mut mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! // Populate every attribute cache once
//! refresh_all(&mut mesh).unwrap();
//!
//! // After an edit, refresh only what the edit touched
//! let moved = VertexId::new(3);
//! mesh.set_position(moved, Point3::new(0.5, 0.5, 2.0));
//! let touched_faces: Vec<FaceId> = vec![FaceId::new(1), FaceId::new(2), FaceId::new(3)];
//! refresh_face_attributes(&mut mesh, &touched_faces).unwrap();
//! refresh_vertex_neighbors(&mut mesh, &[moved]).unwrap();
//!
//! assert_eq!(mesh.valence(moved), 3);
//! ```
//!
//! ## Division of labor
//!
//! Lamella deliberately does *not* edit topology: creating or destroying
//! vertices, half-edges, and faces (flips, splits, collapses) is the
//! caller's job, as is deciding which indices need refreshing afterwards.
//! The refresh routines only read connectivity and rewrite the attribute
//! fields of the elements they are handed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attrib;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use lamella::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attrib::{refresh_all, refresh_face_attributes, refresh_vertex_neighbors};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_triangles, to_face_vertex, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh,
        MeshIndex, Vertex, VertexId, NEIGHBOR_CAPACITY,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
