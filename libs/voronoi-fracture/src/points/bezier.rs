//! # Cubic Bezier Curve
//!
//! Evaluation and sampling of a single cubic segment.

use config::constants::{ADAPTIVE_COLLINEAR_COSINE, ADAPTIVE_MAX_DEPTH};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A cubic Bezier segment defined by four control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    /// Start, two handles, end.
    pub control: [DVec3; 4],
}

impl CubicBezier {
    /// Creates a curve from its control points.
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        Self {
            control: [p0, p1, p2, p3],
        }
    }

    /// Evaluates `(1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`.
    pub fn point_at(&self, t: f64) -> DVec3 {
        let [p0, p1, p2, p3] = self.control;
        let u = 1.0 - t;
        let (uu, tt) = (u * u, t * t);
        p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
    }

    /// Points at `t = 0` and `t = j / samples` for `j = 1..=samples`.
    ///
    /// Returns an empty list for zero samples.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voronoi_fracture::points::CubicBezier;
    /// use glam::DVec3;
    ///
    /// let curve = CubicBezier::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE);
    /// let points = curve.uniform_points(4);
    /// assert_eq!(points.len(), 5);
    /// assert_eq!(points[4], DVec3::ONE);
    /// ```
    pub fn uniform_points(&self, samples: u32) -> Vec<DVec3> {
        if samples == 0 {
            return Vec::new();
        }
        std::iter::once(self.point_at(0.0))
            .chain((1..=samples).map(|j| self.point_at(f64::from(j) / f64::from(samples))))
            .collect()
    }

    /// Recursively subdivides where the curve bends.
    ///
    /// A span is split while its endpoints are at least `min_spacing` apart
    /// and its midpoint turns the curve noticeably. The first split always
    /// happens so that S-shaped curves are not mistaken for lines.
    pub fn adaptive_points(&self, min_spacing: f64) -> Vec<DVec3> {
        let mut points = vec![self.point_at(0.0)];
        self.subdivide(0.0, 1.0, min_spacing * min_spacing, 0, &mut points);
        points.push(self.point_at(1.0));
        points
    }

    fn subdivide(&self, t0: f64, t1: f64, min_sq: f64, depth: u32, out: &mut Vec<DVec3>) {
        if depth >= ADAPTIVE_MAX_DEPTH {
            return;
        }
        let left = self.point_at(t0);
        let right = self.point_at(t1);
        if left.distance_squared(right) < min_sq {
            return;
        }

        let t_mid = (t0 + t1) * 0.5;
        let mid = self.point_at(t_mid);
        let bend = (left - mid)
            .normalize_or_zero()
            .dot((right - mid).normalize_or_zero());

        if depth == 0 || bend > ADAPTIVE_COLLINEAR_COSINE {
            self.subdivide(t0, t_mid, min_sq, depth + 1, out);
            out.push(mid);
            self.subdivide(t_mid, t1, min_sq, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        let curve = CubicBezier::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(2.0, 3.0, 4.0));
        assert_eq!(curve.point_at(0.0), DVec3::ZERO);
        assert_eq!(curve.point_at(1.0), DVec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_midpoint_formula() {
        let curve = CubicBezier::new(DVec3::ZERO, DVec3::X * 3.0, DVec3::Y * 3.0, DVec3::Z);
        let mid = curve.point_at(0.5);
        // 3 * 0.25 * 0.5 = 0.375 per handle, 0.125 for the end
        assert_relative_eq!(mid.x, 1.125);
        assert_relative_eq!(mid.y, 1.125);
        assert_relative_eq!(mid.z, 0.125);
    }

    #[test]
    fn test_zero_samples() {
        let curve = CubicBezier::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE);
        assert!(curve.uniform_points(0).is_empty());
    }

    #[test]
    fn test_adaptive_straight_line_splits_once() {
        let curve = CubicBezier::new(
            DVec3::ZERO,
            DVec3::X,
            DVec3::X * 2.0,
            DVec3::X * 3.0,
        );
        let points = curve.adaptive_points(0.01);
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[1].x, 1.5);
    }

    #[test]
    fn test_adaptive_bends_get_more_points() {
        let curve = CubicBezier::new(
            DVec3::ZERO,
            DVec3::new(0.0, 4.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        );
        let points = curve.adaptive_points(0.01);
        assert!(points.len() > 3);
        assert_eq!(points[0], DVec3::ZERO);
        assert_eq!(*points.last().unwrap(), DVec3::new(4.0, 0.0, 0.0));
    }
}
