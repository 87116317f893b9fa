//! Mesh simplification for half-edge meshes
//!
//! This crate reduces the face count of a closed triangle mesh by greedy
//! edge contraction:
//! - Quadric error metrics to score each contraction
//! - A lazily invalidated min-cost queue to pick the next edge
//! - In-place half-edge surgery for the contraction itself

pub mod quadric;
pub mod edge_collapse;
pub mod quadric_error;

pub use quadric::*;
pub use edge_collapse::*;
pub use quadric_error::*;

use simplize_core::{HalfEdgeMesh, Result};

/// Simplify a half-edge mesh in place
pub trait MeshSimplifier {
    /// Reduce the live face count to `round(faces * ratio)` where
    /// `0 < ratio <= 1`, or as close as the mesh allows.
    fn simplify(&self, mesh: &mut HalfEdgeMesh, ratio: f32) -> Result<SimplificationStats>;
}
