//! # Convex Cell Partitioner
//!
//! Splits the (slightly expanded) bounding box into one convex cell per seed
//! point. Each cell is a list of planes whose positive sides contain it.
//!
//! ## Pipeline
//!
//! 1. A [`Tessellator`] reports raw Voronoi regions over the container.
//! 2. Raw vertex offsets are converted back to world space.
//! 3. Each face loop is fitted with a plane oriented toward the seed.

mod partition;
mod polyhedron;
mod tessellate;

pub use partition::{partition_cells, partition_cells_with, Cell, CellFace};
pub use polyhedron::ConvexPolyhedron;
pub use tessellate::{BisectorTessellator, RawCell, Tessellator};
