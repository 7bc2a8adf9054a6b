use super::sampling::{jitter, point_in_box};
use super::{PointGenParams, PointGenerator};
use crate::bounds::BoundingBox;
use config::constants::approx_zero;
use glam::DVec3;
use log::warn;
use rand::RngCore;

/// Emits tight groups of points around primary points.
///
/// Primaries are the user points followed by `primary_count` random ones.
/// Each primary is emitted, then `secondary_count` jittered copies of it;
/// `uniform_count` scattered points come last.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterGenerator;

impl PointGenerator for ClusterGenerator {
    fn generate(
        &self,
        bounds: &BoundingBox,
        params: &PointGenParams,
        rng: &mut dyn RngCore,
    ) -> Vec<DVec3> {
        let mut primaries = params.user_points.clone();
        primaries.extend((0..params.primary_count).map(|_| point_in_box(bounds, rng)));
        if primaries.is_empty() {
            warn!("Cluster generation has no primary points");
        }

        let flux = bounds.percent_of_diagonal(params.flux_percent);
        if approx_zero(flux) && params.secondary_count > 0 {
            warn!("Cluster flux is zero; secondary points will coincide with their primary");
        }

        let per_primary = 1 + params.secondary_count as usize;
        let mut points =
            Vec::with_capacity(primaries.len() * per_primary + params.uniform_count as usize);
        for primary in primaries {
            points.push(primary);
            for _ in 0..params.secondary_count {
                points.push(jitter(primary, flux, params.flux_mode, rng));
            }
        }

        points.extend((0..params.uniform_count).map(|_| point_in_box(bounds, rng)));
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> BoundingBox {
        BoundingBox::from_min_max(DVec3::ZERO, DVec3::splat(10.0))
    }

    #[test]
    fn test_cluster_layout() {
        let user = vec![DVec3::splat(2.0), DVec3::splat(8.0)];
        let params = PointGenParams {
            user_points: user.clone(),
            primary_count: 1,
            secondary_count: 3,
            uniform_count: 2,
            flux_percent: 2.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let points = ClusterGenerator.generate(&bounds(), &params, &mut rng);

        assert_eq!(points.len(), 3 * 4 + 2);
        assert_eq!(points[0], user[0]);
        assert_eq!(points[4], user[1]);

        let flux = bounds().percent_of_diagonal(2.0);
        for group in points[..12].chunks(4) {
            let primary = group[0];
            for secondary in &group[1..] {
                assert!((*secondary - primary).abs().max_element() <= flux + 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_flux_still_generates() {
        let params = PointGenParams {
            user_points: vec![DVec3::splat(5.0)],
            secondary_count: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let points = ClusterGenerator.generate(&bounds(), &params, &mut rng);
        assert_eq!(points, vec![DVec3::splat(5.0); 3]);
    }

    #[test]
    fn test_no_primaries_only_uniform() {
        let params = PointGenParams {
            secondary_count: 5,
            uniform_count: 3,
            flux_percent: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ClusterGenerator.generate(&bounds(), &params, &mut rng).len(), 3);
    }
}
