//! Vertex ring refresh.
//!
//! Recomputes, for a set of vertices, the cached ordered neighbor ring,
//! valence, area-weighted vertex normal, and the lengths of all incident
//! edges, by walking the half-edge ring around each vertex.
//!
//! # Ring walk
//!
//! The walk starts at the vertex's stored outgoing half-edge and rotates
//! via `twin`/`next`. On a closed (interior) ring it returns to the start
//! and the forward pass is the whole ring. If it runs into an open
//! boundary (a half-edge without a twin) instead, the neighbors recorded
//! so far are flipped in place (keeping slot 0 as the ring start) and the
//! walk restarts from the original half-edge in the opposite rotational
//! sense, via `prev`/`twin`, so the final ring reads as one rotational
//! sweep rather than two opposite-direction runs.
//!
//! Both passes share one loop body; only the advance rule differs.
//!
//! # Caveats
//!
//! - Face attributes must already be current
//!   ([`refresh_face_attributes`](crate::attrib::refresh_face_attributes)
//!   first): the vertex normal is accumulated from the cached face
//!   `normal * area` products.
//! - The valence counts ring *steps*: on a closed ring it equals the
//!   number of ring half-edges, on an open-boundary ring it is one less
//!   than the number of stored ring half-edges.
//! - Rings larger than [`NEIGHBOR_CAPACITY`] keep their full valence and
//!   normal but store only the first [`NEIGHBOR_CAPACITY`] ring edges; a
//!   warning is logged once per affected vertex.

use log::warn;
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId, NEIGHBOR_CAPACITY};

/// Recompute the cached ring attributes of each listed vertex.
///
/// For every valid id in `vertex_ids`, rebuilds `neighbors`, `valence`,
/// and `normal` on the vertex record and writes the `length` of every ring
/// edge onto both half-edge records of the edge. Invalid (sentinel)
/// entries are skipped; duplicates are recomputed idempotently. A vertex
/// with no half-edge is skipped; a ring whose backward restart is blocked
/// by missing connectivity keeps whatever was accumulated up to that
/// point.
///
/// # Errors
///
/// - [`MeshError::VertexOutOfRange`] if any valid id lies beyond the
///   vertex arena; the list is validated up front, so on error no element
///   has been modified.
/// - [`MeshError::RingOverrun`] if a ring walk takes more steps than the
///   mesh has half-edges, which can only happen on corrupted
///   connectivity; elements refreshed earlier in the list keep their new
///   values.
pub fn refresh_vertex_neighbors<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    vertex_ids: &[VertexId<I>],
) -> Result<()> {
    // Validate the whole list before touching anything
    for &v in vertex_ids {
        if v.is_valid() && v.index() >= mesh.num_vertices() {
            return Err(MeshError::VertexOutOfRange {
                vertex: v.index(),
                num_vertices: mesh.num_vertices(),
            });
        }
    }

    for &v in vertex_ids {
        if !v.is_valid() {
            continue;
        }
        refresh_one(mesh, v)?;
    }

    Ok(())
}

/// Rotational sense of a ring walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Rotate via `twin` then `next`.
    Forward,
    /// Rotate via `prev` then `twin`.
    Backward,
}

/// How a ring pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkEnd {
    /// Returned to the starting half-edge: interior ring, fully covered.
    Closed,
    /// Ran into an open boundary (or, backward, into missing
    /// connectivity).
    Boundary,
    /// Advanced onto an unset half-edge index: ring terminated mid-walk.
    Dead,
}

/// One advance around the ring, in either rotational sense.
#[derive(Debug, Clone, Copy)]
enum Step<I: MeshIndex> {
    /// The next ring half-edge (possibly invalid, possibly the start).
    To(HalfEdgeId<I>),
    /// The ring stops here in this direction.
    Stop,
}

/// Working state of one vertex refresh, carried across both passes.
struct RingWalk<I: MeshIndex> {
    vertex: VertexId<I>,
    position: Point3<f64>,
    neighbors: [HalfEdgeId<I>; NEIGHBOR_CAPACITY],
    normal: Vector3<f64>,
    /// Ring position counter; becomes the valence.
    i: usize,
    /// Total half-edges visited across both passes, for the overrun cap.
    steps: usize,
    truncated: bool,
}

impl<I: MeshIndex> RingWalk<I> {
    fn new(vertex: VertexId<I>, position: Point3<f64>) -> Self {
        Self {
            vertex,
            position,
            neighbors: [HalfEdgeId::invalid(); NEIGHBOR_CAPACITY],
            normal: Vector3::zeros(),
            i: 0,
            steps: 0,
            truncated: false,
        }
    }

    /// The loop body shared by both passes: record the ring edge, pick up
    /// the face's area-weighted normal contribution, and write the edge
    /// length to this half-edge and its twin.
    fn visit(&mut self, mesh: &mut HalfEdgeMesh<I>, curr: HalfEdgeId<I>) {
        if self.i < NEIGHBOR_CAPACITY {
            self.neighbors[self.i] = curr;
        } else if !self.truncated {
            self.truncated = true;
            warn!(
                "ring of vertex {} exceeds neighbor capacity {}; \
                 further ring edges are counted but not stored",
                self.vertex.index(),
                NEIGHBOR_CAPACITY
            );
        }

        // Larger incident faces pull the vertex normal harder
        let f = mesh.face_of(curr);
        if f.is_valid() {
            let face = mesh.face(f);
            self.normal += face.normal * face.area;
        }

        // One length per edge, mirrored onto the twin when there is one
        let other = mesh.dest(curr);
        if other.is_valid() {
            let length = (self.position - *mesh.position(other)).norm();
            mesh.halfedge_mut(curr).length = length;
            let twin = mesh.twin(curr);
            if twin.is_valid() {
                mesh.halfedge_mut(twin).length = length;
            }
        }
    }

    /// Rotate one step around the vertex.
    fn advance(&self, mesh: &HalfEdgeMesh<I>, curr: HalfEdgeId<I>, dir: Direction) -> Step<I> {
        match dir {
            Direction::Forward => {
                let twin = mesh.twin(curr);
                if !twin.is_valid() {
                    return Step::Stop;
                }
                Step::To(mesh.next(twin))
            }
            Direction::Backward => {
                let prev = mesh.prev(curr);
                if !prev.is_valid() {
                    return Step::Stop;
                }
                let next = mesh.twin(prev);
                if !next.is_valid() {
                    return Step::Stop;
                }
                Step::To(next)
            }
        }
    }

    /// Walk the ring from `start` in direction `dir` until it closes at
    /// `orig`, stops at a boundary, or dies on unset connectivity.
    ///
    /// The ring counter advances between visits on the forward pass and
    /// after the closure check on the backward pass, so the final count
    /// matches the per-element record semantics described in the module
    /// docs.
    fn walk(
        &mut self,
        mesh: &mut HalfEdgeMesh<I>,
        start: HalfEdgeId<I>,
        orig: HalfEdgeId<I>,
        dir: Direction,
    ) -> Result<WalkEnd> {
        let cap = mesh.num_halfedges();
        let mut curr = start;

        loop {
            self.steps += 1;
            if self.steps > cap {
                return Err(MeshError::RingOverrun {
                    vertex: self.vertex.index(),
                    steps: self.steps,
                });
            }

            self.visit(mesh, curr);

            let next = match self.advance(mesh, curr, dir) {
                Step::Stop => return Ok(WalkEnd::Boundary),
                Step::To(next) => next,
            };

            match dir {
                Direction::Forward => {
                    self.i += 1;
                    if !next.is_valid() {
                        return Ok(WalkEnd::Dead);
                    }
                    if next == orig {
                        return Ok(WalkEnd::Closed);
                    }
                }
                Direction::Backward => {
                    if !next.is_valid() {
                        return Ok(WalkEnd::Dead);
                    }
                    if next == orig {
                        return Ok(WalkEnd::Closed);
                    }
                    self.i += 1;
                }
            }

            curr = next;
        }
    }
}

/// Refresh the ring attributes of a single vertex.
fn refresh_one<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, v: VertexId<I>) -> Result<()> {
    let orig = mesh.vertex(v).halfedge;
    if !orig.is_valid() {
        return Ok(());
    }

    let mut ring = RingWalk::new(v, *mesh.position(v));

    if ring.walk(mesh, orig, orig, Direction::Forward)? == WalkEnd::Boundary {
        // Open boundary: flip the forward run in place (slot 0 stays the
        // ring start) so that appending the backward run yields one
        // rotational sweep instead of two opposite-direction runs.
        let last = ring.i.min(NEIGHBOR_CAPACITY - 1);
        ring.neighbors[1..=last].reverse();

        // Restart on the far side of the starting half-edge. Missing
        // connectivity here aborts the backward pass; whatever was
        // accumulated so far is kept.
        let prev = mesh.prev(orig);
        if prev.is_valid() {
            let back = mesh.twin(prev);
            if back.is_valid() {
                ring.i += 1;
                ring.walk(mesh, back, orig, Direction::Backward)?;
            }
        }
    }

    let nn = ring.normal.norm();
    let vertex = mesh.vertex_mut(v);
    vertex.neighbors = ring.neighbors;
    vertex.valence = ring.i;
    vertex.normal = if nn > 0.0 {
        ring.normal / nn
    } else {
        Vector3::zeros()
    };

    Ok(())
}
