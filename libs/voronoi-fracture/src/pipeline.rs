//! # Fracture Pipeline
//!
//! End-to-end driver: mesh import, seed generation, cell partition and
//! parallel slicing.
//!
//! ```text
//! Mesh → SourceMesh → BoundingBox → seeds → cells → slice_all → fragments
//! ```

use crate::bounds::BoundingBox;
use crate::cells::partition_cells;
use crate::error::FractureError;
use crate::mesh::Mesh;
use crate::points::{generate_points, PointGenKind, PointGenParams};
use crate::slicer::{slice_all, Fragment, SkippedCell};
use crate::topology::SourceMesh;
use config::constants::{non_negative_distance, FractureSettings, CLIP_EPSILON};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Everything a fracture run needs besides the mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractureConfig {
    /// Seed point strategy.
    pub point_kind: PointGenKind,
    /// Strategy parameters.
    pub params: PointGenParams,
    /// On-plane tolerance used while clipping.
    pub clip_epsilon: f64,
    /// Optional cap on slicing worker threads.
    pub max_threads: Option<usize>,
    /// Inward offset applied to every fragment, leaving gaps between them.
    pub separation_distance: f64,
}

impl Default for FractureConfig {
    fn default() -> Self {
        Self {
            point_kind: PointGenKind::default(),
            params: PointGenParams::default(),
            clip_epsilon: CLIP_EPSILON,
            max_threads: None,
            separation_distance: 0.0,
        }
    }
}

impl FractureConfig {
    /// Validates the tunables.
    pub fn settings(&self) -> Result<FractureSettings, FractureError> {
        non_negative_distance(self.separation_distance)?;
        Ok(FractureSettings::new(
            self.clip_epsilon,
            self.params.flux_percent,
            self.params.min_endpoint_distance_percent,
            self.max_threads,
        )?)
    }
}

/// Result of a fracture run.
#[derive(Debug, Clone)]
pub struct FractureReport {
    /// Fragments in cell order.
    pub fragments: Vec<Fragment>,
    /// Cells that produced no fragment.
    pub skipped: Vec<SkippedCell>,
    /// Number of seed points generated.
    pub seed_count: usize,
    /// Number of cells partitioned.
    pub cell_count: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl FractureReport {
    /// Fragment meshes without their cell indices.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        self.fragments.iter().map(|fragment| &fragment.mesh)
    }
}

/// Fractures `mesh` into convex fragments.
///
/// # Errors
///
/// - [`FractureError::Config`] for rejected tunables
/// - [`FractureError::Mesh`] if the mesh is not a closed 2-manifold
/// - [`FractureError::NoSeedPoints`] / [`FractureError::NoCells`] when
///   nothing can be partitioned
/// - [`FractureError::ThreadPool`] if a capped pool cannot be built
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::{fracture, FractureConfig};
/// use voronoi_fracture::points::PointGenParams;
/// use voronoi_fracture::primitives::create_cube;
/// use glam::DVec3;
///
/// let cube = create_cube(DVec3::splat(2.0), true).unwrap();
/// let config = FractureConfig {
///     params: PointGenParams { seed: 7, uniform_count: 6, ..Default::default() },
///     ..Default::default()
/// };
/// let report = fracture(cube, &config).unwrap();
/// assert!(!report.fragments.is_empty());
/// ```
pub fn fracture(mesh: Mesh, config: &FractureConfig) -> Result<FractureReport, FractureError> {
    let start = Instant::now();
    let settings = config.settings()?;

    let source = SourceMesh::new(mesh)?;
    let bounds = BoundingBox::from_mesh(source.mesh());
    debug!(
        "Source mesh: {} vertices, {} triangles, {} edges",
        source.mesh().vertex_count(),
        source.mesh().triangle_count(),
        source.topology().edge_count()
    );

    let seeds = generate_points(config.point_kind, &bounds, &config.params);
    if seeds.is_empty() {
        return Err(FractureError::NoSeedPoints);
    }

    let cells = partition_cells(&bounds, &seeds);
    if cells.is_empty() {
        return Err(FractureError::NoCells);
    }
    debug!("{} seeds partitioned into {} cells", seeds.len(), cells.len());

    let report = slice_all(&source, &cells, &settings)?;
    let mut fragments = report.fragments;
    if config.separation_distance > 0.0 {
        for fragment in &mut fragments {
            fragment.mesh.offset_along_normals(-config.separation_distance);
        }
    }

    let elapsed = start.elapsed();
    info!(
        "{}/{} fragments generated in {:.2?}",
        fragments.len(),
        cells.len(),
        elapsed
    );

    Ok(FractureReport {
        fragments,
        skipped: report.skipped,
        seed_count: seeds.len(),
        cell_count: cells.len(),
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::FluxMode;
    use crate::primitives::create_cube;
    use approx::assert_relative_eq;
    use config::constants::ConfigError;
    use glam::DVec3;

    fn cube() -> Mesh {
        create_cube(DVec3::splat(2.0), true).unwrap()
    }

    fn uniform_config(seed: u64, count: u32) -> FractureConfig {
        FractureConfig {
            params: PointGenParams {
                seed,
                uniform_count: count,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fracture_conserves_volume() {
        let report = fracture(cube(), &uniform_config(11, 8)).unwrap();

        assert_eq!(report.seed_count, 8);
        assert_eq!(
            report.fragments.len() + report.skipped.len(),
            report.cell_count
        );
        let total: f64 = report.meshes().map(Mesh::volume).sum();
        assert_relative_eq!(total, 8.0, epsilon = 1e-6);
        for mesh in report.meshes() {
            assert!(mesh.is_closed());
        }
    }

    #[test]
    fn test_fracture_is_reproducible() {
        let config = FractureConfig {
            point_kind: PointGenKind::Cluster,
            params: PointGenParams {
                seed: 3,
                primary_count: 2,
                secondary_count: 3,
                flux_percent: 10.0,
                flux_mode: FluxMode::Symmetric,
                ..Default::default()
            },
            ..Default::default()
        };
        let a = fracture(cube(), &config).unwrap();
        let b = fracture(cube(), &config).unwrap();
        assert_eq!(a.fragments, b.fragments);
    }

    #[test]
    fn test_single_seed_yields_nothing() {
        let report = fracture(cube(), &uniform_config(0, 1)).unwrap();
        assert!(report.fragments.is_empty());
        assert_eq!(report.cell_count, 1);
    }

    #[test]
    fn test_no_seeds_rejected() {
        let result = fracture(cube(), &uniform_config(0, 0));
        assert!(matches!(result, Err(FractureError::NoSeedPoints)));
    }

    #[test]
    fn test_open_mesh_rejected() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_triangle(0, 1, 2);
        let result = fracture(mesh, &uniform_config(0, 4));
        assert!(matches!(result, Err(FractureError::Mesh(_))));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let config = FractureConfig {
            separation_distance: -1.0,
            ..uniform_config(0, 4)
        };
        assert!(matches!(
            fracture(cube(), &config),
            Err(FractureError::Config(ConfigError::InvalidDistance(_)))
        ));

        let config = FractureConfig {
            max_threads: Some(0),
            ..uniform_config(0, 4)
        };
        assert!(matches!(
            fracture(cube(), &config),
            Err(FractureError::Config(ConfigError::InvalidThreadCount(0)))
        ));
    }

    #[test]
    fn test_separation_shrinks_fragments() {
        let plain = fracture(cube(), &uniform_config(5, 4)).unwrap();
        let config = FractureConfig {
            separation_distance: 0.01,
            ..uniform_config(5, 4)
        };
        let separated = fracture(cube(), &config).unwrap();

        let total = |report: &FractureReport| report.meshes().map(Mesh::volume).sum::<f64>();
        assert_eq!(plain.fragments.len(), separated.fragments.len());
        assert!(total(&separated) < total(&plain));
    }
}
