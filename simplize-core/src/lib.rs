//! Core data structures for simplize
//!
//! This crate provides the half-edge triangle mesh used by the simplification
//! algorithms: typed entity records stored in dense arenas, construction from
//! an indexed triangle soup, invariant checking, compaction and the basic
//! geometric measures of a closed surface.

pub mod point;
pub mod soup;
pub mod entity;
pub mod mesh;
pub mod builder;
pub mod validation;
pub mod measure;
pub mod primitives;
pub mod error;

pub use point::*;
pub use soup::*;
pub use entity::*;
pub use mesh::*;
pub use validation::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
