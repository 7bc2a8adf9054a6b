use super::sampling::point_in_box;
use super::{PointGenParams, PointGenerator};
use crate::bounds::BoundingBox;
use glam::DVec3;
use rand::RngCore;

/// Scatters `uniform_count` points over the box.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformGenerator;

impl PointGenerator for UniformGenerator {
    fn generate(
        &self,
        bounds: &BoundingBox,
        params: &PointGenParams,
        rng: &mut dyn RngCore,
    ) -> Vec<DVec3> {
        (0..params.uniform_count)
            .map(|_| point_in_box(bounds, rng))
            .collect()
    }
}
