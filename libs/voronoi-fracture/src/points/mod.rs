//! # Sample Point Generators
//!
//! Seed points for the cell partition. Every strategy draws from a
//! caller-seeded generator, so equal seeds give equal point sequences.
//!
//! ## Strategies
//!
//! - [`UniformGenerator`]: points scattered over the whole box
//! - [`CurveGenerator`]: points along a cubic Bezier crack line
//! - [`ClusterGenerator`]: jittered groups around primary points

mod bezier;
mod cluster;
mod curve;
pub mod sampling;
mod uniform;

pub use bezier::CubicBezier;
pub use cluster::ClusterGenerator;
pub use curve::CurveGenerator;
pub use uniform::UniformGenerator;

use crate::bounds::BoundingBox;
use config::constants::{DEFAULT_CURVE_SAMPLES, DEFAULT_MIN_ENDPOINT_DISTANCE_PERCENT};
use glam::DVec3;
use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

// =============================================================================
// PARAMETERS
// =============================================================================

/// Range of the per-axis jitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluxMode {
    /// Offsets in `[-flux, +flux]`.
    #[default]
    Symmetric,
    /// Offsets in `[0, +flux]`.
    Positive,
}

/// How points are taken from the crack curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveSampling {
    /// Equally spaced curve parameters.
    #[default]
    Uniform,
    /// Recursive subdivision where the curve bends.
    Adaptive,
}

/// Inputs shared by all strategies. Fields a strategy does not use are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointGenParams {
    /// Random seed.
    pub seed: u64,
    /// Extra uniformly scattered points.
    pub uniform_count: u32,
    /// Random primary points added to the user-supplied ones (cluster).
    pub primary_count: u32,
    /// Jittered points emitted around each primary (cluster).
    pub secondary_count: u32,
    /// Number of curve parameter steps (curve).
    pub samples: u32,
    /// Jitter magnitude as a percentage of the box diagonal.
    pub flux_percent: f64,
    /// Jitter range.
    pub flux_mode: FluxMode,
    /// Minimum separation of generated curve endpoints, percent of the
    /// diagonal (curve).
    pub min_endpoint_distance_percent: f64,
    /// Curve sampling method (curve).
    pub curve_sampling: CurveSampling,
    /// Strategy-specific user points: curve control points or cluster
    /// primaries.
    pub user_points: Vec<DVec3>,
}

impl Default for PointGenParams {
    fn default() -> Self {
        Self {
            seed: 0,
            uniform_count: 0,
            primary_count: 0,
            secondary_count: 0,
            samples: DEFAULT_CURVE_SAMPLES,
            flux_percent: 0.0,
            flux_mode: FluxMode::default(),
            min_endpoint_distance_percent: DEFAULT_MIN_ENDPOINT_DISTANCE_PERCENT,
            curve_sampling: CurveSampling::default(),
            user_points: Vec::new(),
        }
    }
}

// =============================================================================
// GENERATORS
// =============================================================================

/// A seed point strategy.
pub trait PointGenerator: Send + Sync {
    /// Generates points for `bounds` drawing all randomness from `rng`.
    fn generate(
        &self,
        bounds: &BoundingBox,
        params: &PointGenParams,
        rng: &mut dyn RngCore,
    ) -> Vec<DVec3>;
}

/// Selects a built-in strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointGenKind {
    /// [`UniformGenerator`]
    #[default]
    Uniform,
    /// [`CurveGenerator`]
    Curve,
    /// [`ClusterGenerator`]
    Cluster,
}

impl PointGenKind {
    /// The strategy implementation.
    pub fn generator(self) -> &'static dyn PointGenerator {
        match self {
            PointGenKind::Uniform => &UniformGenerator,
            PointGenKind::Curve => &CurveGenerator,
            PointGenKind::Cluster => &ClusterGenerator,
        }
    }
}

/// Runs a strategy with a generator seeded from `params.seed`.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::points::{generate_points, PointGenKind, PointGenParams};
/// use voronoi_fracture::BoundingBox;
/// use glam::DVec3;
///
/// let bounds = BoundingBox::from_min_max(DVec3::NEG_ONE, DVec3::ONE);
/// let params = PointGenParams { seed: 42, uniform_count: 5, ..Default::default() };
/// let points = generate_points(PointGenKind::Uniform, &bounds, &params);
/// assert_eq!(points.len(), 5);
/// assert_eq!(points, generate_points(PointGenKind::Uniform, &bounds, &params));
/// ```
pub fn generate_points(
    kind: PointGenKind,
    bounds: &BoundingBox,
    params: &PointGenParams,
) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let points = kind.generator().generate(bounds, params, &mut rng);
    debug!("{kind:?} generator produced {} points", points.len());
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_scenario_reproducible() {
        let bounds = BoundingBox::from_min_max(DVec3::NEG_ONE, DVec3::ONE);
        let params = PointGenParams {
            seed: 42,
            uniform_count: 5,
            ..Default::default()
        };

        let first = generate_points(PointGenKind::Uniform, &bounds, &params);
        let second = generate_points(PointGenKind::Uniform, &bounds, &params);

        assert_eq!(first.len(), 5);
        for p in &first {
            assert!(p.cmpge(DVec3::NEG_ONE).all() && p.cmple(DVec3::ONE).all());
        }
        let bits = |points: &[DVec3]| -> Vec<[u64; 3]> {
            points.iter().map(|p| p.to_array().map(f64::to_bits)).collect()
        };
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn test_every_strategy_reproducible() {
        let bounds = BoundingBox::from_min_max(DVec3::ZERO, DVec3::new(4.0, 2.0, 1.0));
        let params = PointGenParams {
            seed: 9,
            uniform_count: 3,
            primary_count: 2,
            secondary_count: 4,
            flux_percent: 5.0,
            ..Default::default()
        };
        for kind in [PointGenKind::Uniform, PointGenKind::Curve, PointGenKind::Cluster] {
            assert_eq!(
                generate_points(kind, &bounds, &params),
                generate_points(kind, &bounds, &params)
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let bounds = BoundingBox::from_min_max(DVec3::NEG_ONE, DVec3::ONE);
        let a = PointGenParams {
            seed: 1,
            uniform_count: 4,
            ..Default::default()
        };
        let b = PointGenParams { seed: 2, ..a.clone() };
        assert_ne!(
            generate_points(PointGenKind::Uniform, &bounds, &a),
            generate_points(PointGenKind::Uniform, &bounds, &b)
        );
    }
}
