//! Core scene and geometry types for repivot
//!
//! This crate provides the fundamental types shared across the repivot
//! workspace: points and transforms, triangle meshes, axis-aligned bounds,
//! and a scene model with selection, a 3D cursor, and undo history. The
//! origin relocation primitive lives on [`Scene`]; the batch operations
//! that drive it live in the `repivot-ops` crate.

pub mod bounds;
pub mod error;
pub mod history;
pub mod mesh;
pub mod point;
pub mod scene;
pub mod transform;

pub use bounds::*;
pub use error::*;
pub use history::*;
pub use mesh::*;
pub use point::*;
pub use scene::*;
pub use transform::*;

// Re-export commonly used nalgebra types
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
