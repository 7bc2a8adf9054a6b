//! # Configuration Constants
//!
//! Centralized constants for the fracture pipeline. Clip tolerances,
//! tessellation container padding, point generation defaults and the
//! validated [`FractureSettings`] snapshot are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Voronoi container padding and seed deduplication
//! - **Point Generation**: Curve sampling and retry limits
//! - **Settings**: Validated user tunables

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for general floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance band around a clipping plane treated as "on the plane".
///
/// Vertices whose signed distance falls inside `[-CLIP_EPSILON, CLIP_EPSILON]`
/// are snapped to exactly zero during half-space clipping. Distances beyond
/// the band are kept (positive) or discarded (negative).
///
/// # Example
///
/// ```rust
/// use config::constants::CLIP_EPSILON;
///
/// let distance: f64 = 5e-5;
/// let on_plane = distance.abs() <= CLIP_EPSILON;
/// assert!(on_plane);
/// ```
pub const CLIP_EPSILON: f64 = 1e-4;

/// Minimum cross-product length for three points to define a plane.
///
/// Below this the points are considered collinear and no plane is fitted.
pub const PLANE_FIT_EPSILON: f64 = 1e-12;

/// Minimum number of points a polygon loop needs before a plane is fitted.
pub const MIN_FACE_POINTS: usize = 3;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Padding added to each side of the bounding box before tessellation.
///
/// Expanding the Voronoi container keeps cells of seeds that lie on the
/// surface of the source mesh from sharing faces with the container itself.
///
/// # Example
///
/// ```rust
/// use config::constants::VORONOI_BOUNDS_EXPANSION;
///
/// let min_x = -1.0 - VORONOI_BOUNDS_EXPANSION;
/// assert!(min_x < -1.0);
/// ```
pub const VORONOI_BOUNDS_EXPANSION: f64 = 0.1;

/// Seeds closer than this are treated as the same site when building
/// bisector planes.
pub const SEED_MERGE_EPSILON: f64 = 1e-9;

/// Scale applied to world offsets in raw tessellation vertex buffers.
///
/// Raw cells store vertex positions relative to their seed multiplied by
/// this factor; consumers multiply by its reciprocal to recover world space.
pub const RAW_VERTEX_SCALE: f64 = 2.0;

// =============================================================================
// POINT GENERATION CONSTANTS
// =============================================================================

/// Maximum attempts when placing the second curve endpoint.
///
/// After this many candidates the last one is accepted regardless of its
/// distance to the first endpoint.
pub const CURVE_ENDPOINT_MAX_ATTEMPTS: u32 = 10;

/// Default number of curve samples for curve-guided generation.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CURVE_SAMPLES;
///
/// let user_samples: Option<u32> = None;
/// let samples = user_samples.unwrap_or(DEFAULT_CURVE_SAMPLES);
/// assert_eq!(samples, 10);
/// ```
pub const DEFAULT_CURVE_SAMPLES: u32 = 10;

/// Default minimum separation between curve endpoints, as a percentage of
/// the bounding box diagonal.
pub const DEFAULT_MIN_ENDPOINT_DISTANCE_PERCENT: f64 = 50.0;

/// Minimum squared spacing between adaptively sampled curve points, as a
/// fraction of the squared bounding box diagonal.
pub const ADAPTIVE_MIN_SPACING_FRACTION: f64 = 1e-4;

/// Cosine threshold for adaptive curve subdivision.
///
/// A midpoint whose two chords meet at an angle with cosine above this value
/// (roughly 172 degrees or sharper) is subdivided further.
pub const ADAPTIVE_COLLINEAR_COSINE: f64 = -0.99;

/// Hard cap on adaptive subdivision depth.
pub const ADAPTIVE_MAX_DEPTH: u32 = 12;

// =============================================================================
// SETTINGS
// =============================================================================

/// Validated snapshot of user-tunable fracture settings.
///
/// # Examples
/// ```
/// use config::constants::FractureSettings;
/// let settings = FractureSettings::default();
/// assert!(settings.clip_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractureSettings {
    /// On-plane tolerance used while clipping.
    pub clip_epsilon: f64,
    /// Jitter magnitude as a percentage of the bounding box diagonal.
    pub flux_percent: f64,
    /// Minimum curve endpoint separation as a percentage of the diagonal.
    pub min_endpoint_distance_percent: f64,
    /// Optional cap on slicing worker threads.
    pub max_threads: Option<usize>,
}

impl FractureSettings {
    /// Builds settings, rejecting values the engine cannot work with.
    ///
    /// # Examples
    /// ```
    /// use config::constants::FractureSettings;
    /// let settings = FractureSettings::new(1.0e-4, 10.0, 50.0, Some(4)).expect("valid settings");
    /// assert_eq!(settings.max_threads, Some(4));
    /// ```
    pub fn new(
        clip_epsilon: f64,
        flux_percent: f64,
        min_endpoint_distance_percent: f64,
        max_threads: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if clip_epsilon.is_nan() || clip_epsilon <= 0.0 {
            return Err(ConfigError::InvalidTolerance(clip_epsilon));
        }
        if !(0.0..=100.0).contains(&flux_percent) {
            return Err(ConfigError::InvalidPercent(flux_percent));
        }
        if !(0.0..=100.0).contains(&min_endpoint_distance_percent) {
            return Err(ConfigError::InvalidPercent(min_endpoint_distance_percent));
        }
        if max_threads == Some(0) {
            return Err(ConfigError::InvalidThreadCount(0));
        }
        Ok(Self {
            clip_epsilon,
            flux_percent,
            min_endpoint_distance_percent,
            max_threads,
        })
    }
}

impl Default for FractureSettings {
    fn default() -> Self {
        Self {
            clip_epsilon: CLIP_EPSILON,
            flux_percent: 0.0,
            min_endpoint_distance_percent: DEFAULT_MIN_ENDPOINT_DISTANCE_PERCENT,
            max_threads: None,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when a percentage lies outside `0..=100`.
    InvalidPercent(f64),
    /// Raised when a thread cap of zero is requested.
    InvalidThreadCount(usize),
    /// Raised when a distance is negative or NaN.
    InvalidDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidPercent(value) => {
                write!(f, "percentage must be within 0..=100: {value}")
            }
            ConfigError::InvalidThreadCount(value) => {
                write!(f, "thread cap must be at least 1: {value}")
            }
            ConfigError::InvalidDistance(value) => {
                write!(f, "distance must be non-negative: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Accepts zero or positive distances.
///
/// # Example
///
/// ```rust
/// use config::constants::non_negative_distance;
///
/// assert_eq!(non_negative_distance(0.5), Ok(0.5));
/// assert!(non_negative_distance(-1.0).is_err());
/// ```
pub fn non_negative_distance(value: f64) -> Result<f64, ConfigError> {
    if value.is_nan() || value < 0.0 {
        return Err(ConfigError::InvalidDistance(value));
    }
    Ok(value)
}

/// Converts a percentage of `total` into an absolute amount.
///
/// # Example
///
/// ```rust
/// use config::constants::percent_of;
///
/// assert_eq!(percent_of(200.0, 10.0), 20.0);
/// ```
#[inline]
pub fn percent_of(total: f64, percent: f64) -> f64 {
    total * percent / 100.0
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
