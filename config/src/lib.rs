//! # Config Crate
//!
//! Centralized configuration constants for the Voronoi fracture pipeline.
//! All tolerances, retry limits and tunable defaults are defined here so the
//! engine crates never carry literal magic numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CLIP_EPSILON, FractureSettings};
//!
//! // Distances inside the clip band are treated as on-plane
//! let distance: f64 = 1e-5;
//! assert!(distance.abs() <= CLIP_EPSILON);
//!
//! // Validate user tunables before handing them to the engine
//! let settings = FractureSettings::new(CLIP_EPSILON, 5.0, 50.0, None).unwrap();
//! assert_eq!(settings.flux_percent, 5.0);
//! ```

pub mod constants;

#[cfg(test)]
mod tests;
