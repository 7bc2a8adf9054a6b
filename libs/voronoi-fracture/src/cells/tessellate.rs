//! # Tessellation Boundary
//!
//! The [`Tessellator`] trait is the seam to a Voronoi container routine. Raw
//! cells come back in the layout classic container libraries use: vertex
//! offsets from the seed scaled by [`RAW_VERTEX_SCALE`], and faces encoded
//! as `[count, i0, i1, ..., count, ...]`.

use super::polyhedron::ConvexPolyhedron;
use crate::bounds::BoundingBox;
use crate::plane::Plane;
use config::constants::{RAW_VERTEX_SCALE, SEED_MERGE_EPSILON};
use glam::DVec3;
use log::debug;
use rayon::prelude::*;

/// One Voronoi region as reported by a tessellator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell {
    /// Index of the seed in the input slice.
    pub seed_index: usize,
    /// Seed position in world space.
    pub seed: DVec3,
    /// Flat `[x, y, z, ...]` offsets from the seed, scaled.
    pub vertices: Vec<f64>,
    /// Face-vertex adjacency, `[count, i0, ..., count, ...]`.
    pub faces: Vec<usize>,
}

impl RawCell {
    /// Vertex positions in world space.
    pub fn world_vertices(&self) -> Vec<DVec3> {
        self.vertices
            .chunks_exact(3)
            .map(|c| self.seed + DVec3::new(c[0], c[1], c[2]) / RAW_VERTEX_SCALE)
            .collect()
    }
}

/// Partitions a box into Voronoi regions around seed points.
pub trait Tessellator: Send + Sync {
    /// Returns one raw cell per seed that yields a non-empty region.
    fn tessellate(&self, seeds: &[DVec3], container: &BoundingBox) -> Vec<RawCell>;
}

/// Builds each cell by clipping the container with perpendicular bisectors.
///
/// Other seeds are visited nearest first; once a bisector lies beyond the
/// cell's farthest vertex no later seed can cut it. Seeds outside the
/// container are ignored entirely, so the cells still tile it.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::{BoundingBox, BisectorTessellator, Tessellator};
/// use glam::DVec3;
///
/// let container = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
/// let seeds = [DVec3::new(-0.5, 0.0, 0.0), DVec3::new(0.5, 0.0, 0.0)];
/// let cells = BisectorTessellator::default().tessellate(&seeds, &container);
/// assert_eq!(cells.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BisectorTessellator {
    /// Seeds closer than this to the current seed contribute no bisector.
    pub merge_epsilon: f64,
}

impl Default for BisectorTessellator {
    fn default() -> Self {
        Self {
            merge_epsilon: SEED_MERGE_EPSILON,
        }
    }
}

impl BisectorTessellator {
    fn cell_for(
        &self,
        index: usize,
        seeds: &[DVec3],
        container: &BoundingBox,
    ) -> Option<ConvexPolyhedron> {
        let seed = seeds[index];
        if !container.contains(seed) {
            debug!("Seed {index} lies outside the container, no cell");
            return None;
        }

        let mut others: Vec<(f64, DVec3)> = seeds
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != index && container.contains(*other))
            .map(|(_, other)| (other.distance_squared(seed), *other))
            .filter(|&(dist_sq, _)| dist_sq > self.merge_epsilon * self.merge_epsilon)
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut cell = ConvexPolyhedron::from_box(container);
        let mut radius_sq = cell.max_radius_sq(seed);

        for (dist_sq, other) in others {
            // Bisector distance from the seed is half the seed spacing
            if dist_sq * 0.25 > radius_sq {
                break;
            }

            let normal = seed - other;
            let midpoint = (seed + other) * 0.5;
            let plane = Plane::new(normal, normal.normalize().dot(midpoint));

            if cell.clip(&plane) {
                if cell.is_empty() {
                    return None;
                }
                radius_sq = cell.max_radius_sq(seed);
            }
        }

        Some(cell)
    }
}

impl Tessellator for BisectorTessellator {
    fn tessellate(&self, seeds: &[DVec3], container: &BoundingBox) -> Vec<RawCell> {
        seeds
            .par_iter()
            .enumerate()
            .filter_map(|(index, &seed)| {
                self.cell_for(index, seeds, container)
                    .map(|cell| cell.to_raw(index, seed))
            })
            .collect()
    }
}
