//! Random sampling helpers shared by the point generators.

use super::FluxMode;
use crate::bounds::{BoundingBox, BoxFace};
use glam::DVec3;
use rand::{Rng, RngCore};

/// Uniformly random point inside the box.
pub fn point_in_box(bounds: &BoundingBox, rng: &mut dyn RngCore) -> DVec3 {
    let (min, max) = (bounds.min(), bounds.max());
    DVec3::new(
        rng.random_range(min.x..=max.x),
        rng.random_range(min.y..=max.y),
        rng.random_range(min.z..=max.z),
    )
}

/// Uniformly random point on a random box face other than `excluded`.
pub fn point_on_box_face(
    bounds: &BoundingBox,
    excluded: Option<BoxFace>,
    rng: &mut dyn RngCore,
) -> (BoxFace, DVec3) {
    let candidates: Vec<BoxFace> = BoxFace::ALL
        .into_iter()
        .filter(|face| Some(*face) != excluded)
        .collect();
    let face = candidates[rng.random_range(0..candidates.len())];

    let mut point = point_in_box(bounds, rng);
    let axis = face.axis();
    point[axis] = if face.is_max() {
        bounds.max()[axis]
    } else {
        bounds.min()[axis]
    };
    (face, point)
}

/// Offsets each axis of `point` by a random amount up to `amount`.
pub fn jitter(point: DVec3, amount: f64, mode: FluxMode, rng: &mut dyn RngCore) -> DVec3 {
    let amount = amount.abs();
    let low = match mode {
        FluxMode::Symmetric => -amount,
        FluxMode::Positive => 0.0,
    };
    point
        + DVec3::new(
            rng.random_range(low..=amount),
            rng.random_range(low..=amount),
            rng.random_range(low..=amount),
        )
}
