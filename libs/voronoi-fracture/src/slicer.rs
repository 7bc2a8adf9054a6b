//! # Slicing Orchestrator
//!
//! Clips the shared source mesh against every cell in parallel. Each cell
//! owns a fresh [`ClipMesh`]; the source is only read.

use crate::cells::Cell;
use crate::clip::{ClipMesh, ClipOutcome};
use crate::error::{FractureError, SliceError};
use crate::mesh::Mesh;
use crate::topology::SourceMesh;
use config::constants::{FractureSettings, CLIP_EPSILON};
use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

/// A fragment and the cell that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Index of the cell in the sliced cell list.
    pub cell_index: usize,
    /// Closed fragment mesh.
    pub mesh: Mesh,
}

/// A cell that produced no fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCell {
    /// Index of the cell in the sliced cell list.
    pub cell_index: usize,
    /// Why it was skipped.
    pub reason: SliceError,
}

/// Outcome of slicing a list of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceReport {
    /// Fragments in cell order.
    pub fragments: Vec<Fragment>,
    /// Cells without a fragment, in cell order.
    pub skipped: Vec<SkippedCell>,
}

/// Clips `source` by every plane of `cell` with the default clip band.
///
/// # Errors
///
/// - [`SliceError::EmptyCell`] if the cell has no planes
/// - [`SliceError::Culled`] as soon as the mesh falls outside one plane
/// - [`SliceError::NotDissected`] if no plane cut the mesh
/// - [`SliceError::Clip`] on a topology failure
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::{partition_cells, slice, BoundingBox, SourceMesh};
/// use voronoi_fracture::primitives::create_cube;
/// use glam::DVec3;
///
/// let source = SourceMesh::new(create_cube(DVec3::splat(2.0), true).unwrap()).unwrap();
/// let bounds = BoundingBox::from_mesh(source.mesh());
/// let cells = partition_cells(&bounds, &[DVec3::splat(-0.5), DVec3::splat(0.5)]);
/// let fragment = slice(&source, &cells[0]).unwrap();
/// assert!(fragment.is_closed());
/// ```
pub fn slice(source: &SourceMesh, cell: &Cell) -> Result<Mesh, SliceError> {
    slice_with_epsilon(source, cell, CLIP_EPSILON)
}

/// Like [`slice`] with a custom on-plane band.
pub fn slice_with_epsilon(
    source: &SourceMesh,
    cell: &Cell,
    epsilon: f64,
) -> Result<Mesh, SliceError> {
    if cell.plane_count() == 0 {
        return Err(SliceError::EmptyCell);
    }

    let mut clip = ClipMesh::with_epsilon(source, epsilon);
    let mut dissected = false;
    for plane in cell.planes() {
        match clip.clip_once(plane)? {
            ClipOutcome::Invisible => return Err(SliceError::Culled),
            ClipOutcome::Visible => {}
            ClipOutcome::Dissected => dissected = true,
        }
    }

    if !dissected {
        return Err(SliceError::NotDissected);
    }
    Ok(clip.convert_to_mesh()?)
}

/// Slices every cell on a rayon pool.
///
/// Uses the global pool unless `settings.max_threads` caps the worker count.
/// Per-cell failures are recorded in the report, never returned.
///
/// # Errors
///
/// Only fails when a capped worker pool cannot be built.
pub fn slice_all(
    source: &SourceMesh,
    cells: &[Cell],
    settings: &FractureSettings,
) -> Result<SliceReport, FractureError> {
    let epsilon = settings.clip_epsilon;
    let run = || -> Vec<(usize, Result<Mesh, SliceError>)> {
        cells
            .par_iter()
            .enumerate()
            .map(|(index, cell)| (index, slice_with_epsilon(source, cell, epsilon)))
            .collect()
    };

    let results = match settings.max_threads {
        Some(threads) => ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| FractureError::ThreadPool {
                message: e.to_string(),
            })?
            .install(run),
        None => run(),
    };

    let mut report = SliceReport::default();
    for (cell_index, result) in results {
        match result {
            Ok(mesh) => report.fragments.push(Fragment { cell_index, mesh }),
            Err(reason) => {
                match &reason {
                    SliceError::Clip(err) => warn!("Skipping cell {cell_index}: {err}"),
                    other => debug!("Skipping cell {cell_index}: {other}"),
                }
                report.skipped.push(SkippedCell { cell_index, reason });
            }
        }
    }

    Ok(report)
}
