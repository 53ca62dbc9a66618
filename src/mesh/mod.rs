//! Core mesh data structures.
//!
//! This module provides the half-edge mesh representation used by the
//! attribute refresh routines in [`crate::attrib`].
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], a half-edge (doubly-connected edge
//! list) triangle mesh whose element records carry cached
//! differential-geometry attributes: vertex normals, ordered neighbor
//! rings, valences, edge lengths, face areas and face normals.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These are generic over the underlying integer type ([`MeshIndex`]
//! trait), allowing `u16`, `u32`, or `u64` depending on mesh size. Each
//! carries an invalid sentinel standing in for "absent/unset".
//!
//! # Construction
//!
//! ```
//! use lamella::mesh::{HalfEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! ```

mod builder;
mod halfedge;
mod index;

pub use builder::{build_from_triangles, to_face_vertex};
pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, Vertex, NEIGHBOR_CAPACITY};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
