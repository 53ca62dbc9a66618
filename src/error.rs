//! Error types for lamella.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh construction or attribute refresh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A requested face index lies beyond the face arena.
    #[error("face index {face} out of range (mesh has {num_faces} faces)")]
    FaceOutOfRange {
        /// The requested face index.
        face: usize,
        /// Number of faces in the mesh.
        num_faces: usize,
    },

    /// A requested vertex index lies beyond the vertex arena.
    #[error("vertex index {vertex} out of range (mesh has {num_vertices} vertices)")]
    VertexOutOfRange {
        /// The requested vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A ring walk around a vertex failed to terminate within the
    /// half-edge count, indicating corrupted connectivity.
    #[error("ring walk around vertex {vertex} took {steps} steps without terminating (corrupt connectivity)")]
    RingOverrun {
        /// The vertex whose ring walk overran.
        vertex: usize,
        /// Number of steps taken before giving up.
        steps: usize,
    },
}
