//! Entity records of the half-edge mesh
//!
//! Every record carries its own id (equal to its position in the owning
//! arena) and an `exists` flag. Records are never removed while an algorithm
//! runs; they are flagged dead and dropped by [`HalfEdgeMesh::compact`].
//! Cross references are typed indices into the arenas of the owning mesh.
//!
//! [`HalfEdgeMesh::compact`]: crate::HalfEdgeMesh::compact

use crate::point::Point3f;
use nalgebra::Matrix4;
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            /// Position of the record in its arena
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Type-safe vertex identifier
    VertexId,
    "v"
);
entity_id!(
    /// Type-safe half-edge identifier
    HalfEdgeId,
    "h"
);
entity_id!(
    /// Type-safe undirected edge identifier
    EdgeId,
    "e"
);
entity_id!(
    /// Type-safe face identifier
    FaceId,
    "f"
);

/// A mesh vertex
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Point3f,
    /// One outgoing half-edge, used as the anchor for one-ring traversal
    pub he: HalfEdgeId,
    /// Accumulated plane quadric of the incident faces
    pub quadric: Matrix4<f64>,
    pub exists: bool,
}

/// A directed half-edge owned by exactly one face
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub id: HalfEdgeId,
    /// The vertex this half-edge originates from
    pub vertex: VertexId,
    /// The next half-edge around the same face
    pub next: HalfEdgeId,
    /// The oppositely directed half-edge of the same undirected edge
    pub twin: HalfEdgeId,
    pub edge: EdgeId,
    pub face: FaceId,
    pub exists: bool,
}

/// An undirected edge and its cached contraction state
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    /// Canonical half-edge of the twin pair
    pub he: HalfEdgeId,
    /// The cached cost is stale and must be recomputed before use
    pub visited: bool,
    /// Position minimizing the combined endpoint quadric
    pub target: Point3f,
    /// Quadric error at `target`
    pub cost: f64,
    pub exists: bool,
}

/// A triangular face
#[derive(Debug, Clone)]
pub struct Face {
    pub id: FaceId,
    /// One of the three half-edges; the others follow via `next`
    pub he: HalfEdgeId,
    pub exists: bool,
}

impl Vertex {
    pub fn new(id: VertexId, position: Point3f, he: HalfEdgeId) -> Self {
        Self {
            id,
            position,
            he,
            quadric: Matrix4::zeros(),
            exists: true,
        }
    }
}

impl Edge {
    pub fn new(id: EdgeId, he: HalfEdgeId) -> Self {
        Self {
            id,
            he,
            visited: false,
            target: Point3f::origin(),
            cost: 0.0,
            exists: true,
        }
    }
}

impl Face {
    pub fn new(id: FaceId, he: HalfEdgeId) -> Self {
        Self { id, he, exists: true }
    }
}
