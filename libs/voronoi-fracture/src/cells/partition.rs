//! # Cell Partition
//!
//! Converts raw tessellator output into [`Cell`]s of oriented cutting planes.

use super::tessellate::{BisectorTessellator, RawCell, Tessellator};
use crate::bounds::BoundingBox;
use crate::mesh::Mesh;
use crate::plane::Plane;
use config::constants::VORONOI_BOUNDS_EXPANSION;
use glam::DVec3;
use log::{debug, warn};
use std::collections::HashMap;

/// One face of a cell: its cutting plane and the polygon it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFace {
    /// Plane whose positive side contains the cell.
    pub plane: Plane,
    /// Face polygon in world space, in tessellator order.
    pub points: Vec<DVec3>,
}

/// A convex region described by its bounding planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Faces in tessellator order.
    pub faces: Vec<CellFace>,
    /// Average of the face centroids.
    pub center: DVec3,
    /// Seed point the region belongs to.
    pub seed: DVec3,
}

impl Cell {
    /// The cutting planes, in face order.
    pub fn planes(&self) -> impl Iterator<Item = &Plane> + '_ {
        self.faces.iter().map(|face| &face.plane)
    }

    /// Number of cutting planes.
    pub fn plane_count(&self) -> usize {
        self.faces.len()
    }

    /// Triangulates the cell itself into a closed mesh with outward winding.
    ///
    /// Face polygons sharing a corner share the vertex.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        let mut shared: HashMap<[u64; 3], u32> = HashMap::new();

        for face in &self.faces {
            let mut indices: Vec<u32> = face
                .points
                .iter()
                .map(|p| {
                    *shared
                        .entry(p.to_array().map(f64::to_bits))
                        .or_insert_with(|| mesh.add_vertex(*p))
                })
                .collect();

            // Planes face inward; the loop should wind around the outward normal
            let winding = Plane::from_points(&face.points).map(|p| p.normal());
            if winding.is_some_and(|n| n.dot(face.plane.normal()) > 0.0) {
                indices.reverse();
            }

            for i in 1..indices.len().saturating_sub(1) {
                mesh.add_triangle(indices[0], indices[i], indices[i + 1]);
            }
        }

        mesh
    }
}

/// Partitions the bounding box around `seeds` with the built-in tessellator.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::{partition_cells, BoundingBox};
/// use glam::DVec3;
///
/// let bounds = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
/// let cells = partition_cells(&bounds, &[DVec3::splat(-0.5), DVec3::splat(0.5)]);
/// assert_eq!(cells.len(), 2);
/// ```
pub fn partition_cells(bounds: &BoundingBox, seeds: &[DVec3]) -> Vec<Cell> {
    partition_cells_with(&BisectorTessellator::default(), bounds, seeds)
}

/// Partitions the bounding box around `seeds` with any tessellator.
///
/// The container is the bounding box grown by a small margin. Cells with no
/// usable face are discarded; an empty result means nothing can be sliced.
pub fn partition_cells_with(
    tessellator: &dyn Tessellator,
    bounds: &BoundingBox,
    seeds: &[DVec3],
) -> Vec<Cell> {
    if seeds.is_empty() {
        warn!("No seed points to partition");
        return Vec::new();
    }

    let container = bounds.expanded(VORONOI_BOUNDS_EXPANSION);
    let raw = tessellator.tessellate(seeds, &container);

    let cells: Vec<Cell> = raw.iter().filter_map(cell_from_raw).collect();
    debug!("Partitioned {} seeds into {} cells", seeds.len(), cells.len());
    cells
}

fn cell_from_raw(raw: &RawCell) -> Option<Cell> {
    let points = raw.world_vertices();
    let mut faces = Vec::new();
    let mut center_sum = DVec3::ZERO;
    let mut face_count = 0usize;

    let mut cursor = 0;
    while cursor < raw.faces.len() {
        let count = raw.faces[cursor];
        let Some(loop_indices) = raw.faces.get(cursor + 1..cursor + 1 + count) else {
            warn!("Truncated face list for seed {}", raw.seed_index);
            break;
        };
        cursor += count + 1;

        let Some(face_points) = loop_indices
            .iter()
            .map(|&i| points.get(i).copied())
            .collect::<Option<Vec<DVec3>>>()
        else {
            warn!("Face of seed {} references a missing vertex", raw.seed_index);
            continue;
        };
        if face_points.is_empty() {
            continue;
        }

        center_sum += face_points.iter().copied().sum::<DVec3>() / face_points.len() as f64;
        face_count += 1;

        if let Some(plane) = Plane::from_points(&face_points) {
            let plane = if plane.signed_distance(raw.seed) < 0.0 {
                plane.flipped()
            } else {
                plane
            };
            faces.push(CellFace {
                plane,
                points: face_points,
            });
        }
    }

    if faces.is_empty() {
        debug!("Discarding cell of seed {} with no planes", raw.seed_index);
        return None;
    }

    Some(Cell {
        faces,
        center: center_sum / face_count as f64,
        seed: raw.seed,
    })
}
