//! # Primitives
//!
//! Closed convex solids used as source meshes and as tessellation
//! containers.

pub mod cube;

pub use cube::{create_box, create_cube};
