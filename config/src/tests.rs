//! # Tests for Config Constants
//!
//! Unit tests verifying the configuration constants and the settings
//! validation.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_clip_epsilon_matches_clipper_band() {
    assert_eq!(CLIP_EPSILON, 1e-4);
}

#[test]
fn test_clip_epsilon_larger_than_epsilon() {
    assert!(
        CLIP_EPSILON >= EPSILON,
        "CLIP_EPSILON should be >= EPSILON"
    );
}

#[test]
fn test_plane_fit_needs_a_triangle() {
    assert_eq!(MIN_FACE_POINTS, 3);
}

// =============================================================================
// TESSELLATION TESTS
// =============================================================================

#[test]
fn test_voronoi_expansion_is_small_and_positive() {
    assert!(VORONOI_BOUNDS_EXPANSION > 0.0);
    assert!(VORONOI_BOUNDS_EXPANSION < 1.0);
}

#[test]
fn test_raw_vertex_scale_round_trips() {
    let offset = 0.75;
    let raw = offset * RAW_VERTEX_SCALE;
    assert_eq!(raw / RAW_VERTEX_SCALE, offset);
}

// =============================================================================
// POINT GENERATION TESTS
// =============================================================================

#[test]
fn test_curve_endpoint_attempts() {
    assert_eq!(CURVE_ENDPOINT_MAX_ATTEMPTS, 10);
}

#[test]
fn test_adaptive_threshold_is_near_straight() {
    assert!(ADAPTIVE_COLLINEAR_COSINE > -1.0);
    assert!(ADAPTIVE_COLLINEAR_COSINE < -0.9);
}

// =============================================================================
// SETTINGS TESTS
// =============================================================================

#[test]
fn test_default_settings_are_valid() {
    let defaults = FractureSettings::default();
    let rebuilt = FractureSettings::new(
        defaults.clip_epsilon,
        defaults.flux_percent,
        defaults.min_endpoint_distance_percent,
        defaults.max_threads,
    );
    assert_eq!(rebuilt, Ok(defaults));
}

#[test]
fn test_settings_reject_bad_tolerance() {
    assert_eq!(
        FractureSettings::new(0.0, 0.0, 50.0, None).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert!(FractureSettings::new(f64::NAN, 0.0, 50.0, None).is_err());
}

#[test]
fn test_settings_reject_bad_percent() {
    assert_eq!(
        FractureSettings::new(1e-4, -1.0, 50.0, None).unwrap_err(),
        ConfigError::InvalidPercent(-1.0)
    );
    assert_eq!(
        FractureSettings::new(1e-4, 5.0, 150.0, None).unwrap_err(),
        ConfigError::InvalidPercent(150.0)
    );
}

#[test]
fn test_settings_reject_zero_threads() {
    assert_eq!(
        FractureSettings::new(1e-4, 5.0, 50.0, Some(0)).unwrap_err(),
        ConfigError::InvalidThreadCount(0)
    );
}

#[test]
fn test_config_error_display() {
    let message = ConfigError::InvalidPercent(120.0).to_string();
    assert!(message.contains("120"));
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_percent_of() {
    assert_eq!(percent_of(50.0, 10.0), 5.0);
    assert_eq!(percent_of(50.0, 0.0), 0.0);
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(!approx_zero(1e-3));
}

#[test]
fn test_non_negative_distance() {
    assert_eq!(non_negative_distance(0.0), Ok(0.0));
    assert_eq!(
        non_negative_distance(-0.5),
        Err(ConfigError::InvalidDistance(-0.5))
    );
    assert!(non_negative_distance(f64::NAN).is_err());
}
