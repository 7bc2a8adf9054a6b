use super::bezier::CubicBezier;
use super::sampling::{jitter, point_in_box, point_on_box_face};
use super::{CurveSampling, PointGenParams, PointGenerator};
use crate::bounds::BoundingBox;
use config::constants::{approx_zero, ADAPTIVE_MIN_SPACING_FRACTION, CURVE_ENDPOINT_MAX_ATTEMPTS};
use glam::DVec3;
use log::{debug, warn};
use rand::RngCore;

/// Samples points along a cubic Bezier curve to imitate a running crack.
///
/// Control points depend on how many user points are given:
/// - 4: used as-is
/// - 2: used as endpoints, handles drawn inside the box
/// - otherwise: the start lies on a random box face, the handles inside the
///   box and the end on a different face, retried until it is far enough
///   from the start (best effort)
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveGenerator;

impl CurveGenerator {
    /// Resolves the four control points.
    pub fn control_points(
        &self,
        bounds: &BoundingBox,
        params: &PointGenParams,
        rng: &mut dyn RngCore,
    ) -> CubicBezier {
        match params.user_points.as_slice() {
            &[p0, p1, p2, p3] => CubicBezier::new(p0, p1, p2, p3),
            &[start, end] => {
                let p1 = point_in_box(bounds, rng);
                let p2 = point_in_box(bounds, rng);
                CubicBezier::new(start, p1, p2, end)
            }
            other => {
                if !other.is_empty() {
                    debug!("Ignoring {} user points for the curve", other.len());
                }
                self.random_control_points(bounds, params, rng)
            }
        }
    }

    fn random_control_points(
        &self,
        bounds: &BoundingBox,
        params: &PointGenParams,
        rng: &mut dyn RngCore,
    ) -> CubicBezier {
        let min_distance = bounds.percent_of_diagonal(params.min_endpoint_distance_percent);

        let (start_face, p0) = point_on_box_face(bounds, None, rng);
        let p1 = point_in_box(bounds, rng);
        let p2 = point_in_box(bounds, rng);

        let mut attempt = 1;
        let p3 = loop {
            let (_, candidate) = point_on_box_face(bounds, Some(start_face), rng);
            let distance = candidate.distance(p0);
            if distance >= min_distance {
                break candidate;
            }
            if attempt >= CURVE_ENDPOINT_MAX_ATTEMPTS {
                debug!(
                    "Accepting curve end at distance {distance:.4} after {attempt} attempts \
                     (wanted {min_distance:.4})"
                );
                break candidate;
            }
            attempt += 1;
        };

        CubicBezier::new(p0, p1, p2, p3)
    }
}

impl PointGenerator for CurveGenerator {
    fn generate(
        &self,
        bounds: &BoundingBox,
        params: &PointGenParams,
        rng: &mut dyn RngCore,
    ) -> Vec<DVec3> {
        let mut points = Vec::new();

        if params.samples == 0 {
            warn!("Curve samples are zero; the curve contributes no points");
        } else {
            let curve = self.control_points(bounds, params, rng);
            points = match params.curve_sampling {
                CurveSampling::Uniform => curve.uniform_points(params.samples),
                CurveSampling::Adaptive => curve
                    .adaptive_points(bounds.diagonal() * ADAPTIVE_MIN_SPACING_FRACTION.sqrt()),
            };

            let flux = bounds.percent_of_diagonal(params.flux_percent);
            if !approx_zero(flux) {
                for point in &mut points {
                    *point = jitter(*point, flux, params.flux_mode, rng);
                }
            }
        }

        points.extend((0..params.uniform_count).map(|_| point_in_box(bounds, rng)));
        points
    }
}
