//! # Cutting Plane
//!
//! Oriented plane with point classification. The positive side is the kept
//! half-space during clipping.

use config::constants::{CLIP_EPSILON, MIN_FACE_POINTS, PLANE_FIT_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Point is in front of the plane (kept side).
    Front,
    /// Point is behind the plane (discarded side).
    Back,
    /// Point is within the clip band of the plane.
    OnPlane,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane defined by a unit normal and an offset along it.
///
/// The signed distance of `p` is `normal · p - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: DVec3,
    offset: f64,
}

impl Plane {
    /// Creates a plane from a normal and an offset. The normal is normalized.
    pub fn new(normal: DVec3, offset: f64) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            offset,
        }
    }

    /// Fits a plane through a polygon loop.
    ///
    /// The normal follows the loop's winding (Newell's method) and the plane
    /// passes through the loop centroid. Returns `None` for fewer than three
    /// points or a collinear loop.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voronoi_fracture::Plane;
    /// use glam::DVec3;
    ///
    /// let plane = Plane::from_points(&[DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
    /// assert_eq!(plane.normal(), DVec3::Z);
    /// assert!(Plane::from_points(&[DVec3::ZERO, DVec3::X, DVec3::X * 2.0]).is_none());
    /// ```
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        if points.len() < MIN_FACE_POINTS {
            return None;
        }

        let mut normal = DVec3::ZERO;
        for (i, current) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }

        if normal.length() < PLANE_FIT_EPSILON {
            return None;
        }
        let normal = normal.normalize();

        let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        Some(Self {
            normal,
            offset: centroid.dot(normal),
        })
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Offset along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Reverse the kept side.
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    /// Classify a point using the clip band.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > CLIP_EPSILON {
            Classification::Front
        } else if dist < -CLIP_EPSILON {
            Classification::Back
        } else {
            Classification::OnPlane
        }
    }

    /// Orthogonal projection of a point onto the plane.
    pub fn project_point(&self, point: DVec3) -> DVec3 {
        point - self.normal * self.signed_distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fit_places_points_on_plane() {
        let points = [
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-2.0, 0.5, 1.0),
            DVec3::new(0.3, -1.0, 4.0),
        ];
        let plane = Plane::from_points(&points).unwrap();

        let e1 = points[1] - points[0];
        let e2 = points[2] - points[0];
        assert_abs_diff_eq!(plane.normal().dot(e1), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(plane.normal().dot(e2), 0.0, epsilon = 1e-12);
        for point in points {
            assert_abs_diff_eq!(plane.signed_distance(point), 0.0, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(plane.normal().length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_follows_winding() {
        let ccw = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let cw = [DVec3::ZERO, DVec3::Y, DVec3::X];
        assert_eq!(Plane::from_points(&ccw).unwrap().normal(), DVec3::Z);
        assert_eq!(Plane::from_points(&cw).unwrap().normal(), DVec3::NEG_Z);
    }

    #[test]
    fn test_fit_rejects_degenerate() {
        assert!(Plane::from_points(&[DVec3::ZERO, DVec3::X]).is_none());
        assert!(Plane::from_points(&[DVec3::ZERO, DVec3::X, DVec3::X * 3.0]).is_none());
    }

    #[test]
    fn test_classify_point() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Front);
        assert_eq!(plane.classify_point(DVec3::NEG_Z), Classification::Back);
        assert_eq!(
            plane.classify_point(DVec3::new(1.0, 1.0, 5e-5)),
            Classification::OnPlane
        );
    }

    #[test]
    fn test_flipped_and_projection() {
        let plane = Plane::new(DVec3::new(0.0, 0.0, 2.0), 5.0);
        let flipped = plane.flipped();
        assert_eq!(flipped.normal(), DVec3::NEG_Z);
        assert_eq!(flipped.offset(), -5.0);

        let p = DVec3::new(1.0, 2.0, 9.0);
        assert_eq!(plane.project_point(p), DVec3::new(1.0, 2.0, 5.0));
        assert_eq!(flipped.signed_distance(p), -plane.signed_distance(p));
    }
}
