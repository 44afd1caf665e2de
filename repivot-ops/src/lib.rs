//! Batch origin placement operations for repivot scenes
//!
//! This crate drives the origin primitive in `repivot-core` over whole
//! selections: pick a bounding box face center per object, relocate every
//! eligible origin, report what was skipped, and leave one undo step
//! behind. The `actions` module exposes the same operations behind stable
//! string ids for front ends.

pub mod actions;
pub mod origin;

pub use origin::*;
