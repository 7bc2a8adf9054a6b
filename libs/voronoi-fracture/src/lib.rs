//! # Voronoi Fracture
//!
//! Breaks a closed triangle mesh into convex fragments along the cells of a
//! Voronoi partition of its bounding box.
//!
//! ## Architecture
//!
//! ```text
//! Mesh → SourceMesh (edge topology)
//!      → BoundingBox → seed points (uniform | curve | cluster)
//!      → Cells (convex plane sets)
//!      → ClipMesh per cell, in parallel → fragment meshes
//! ```
//!
//! ## Algorithms
//!
//! Pure Rust, no native dependencies:
//! - **Partition**: bisector-plane clipping of a container box per seed
//! - **Slicing**: half-space clipping of a polyhedral edge/face structure
//!   with cap faces
//! - **Triangulation**: fan triangulation of convex face loops
//!
//! ## Usage
//!
//! ```rust
//! use voronoi_fracture::{fracture, FractureConfig};
//! use voronoi_fracture::points::{PointGenKind, PointGenParams};
//! use voronoi_fracture::primitives::create_cube;
//! use glam::DVec3;
//!
//! let cube = create_cube(DVec3::splat(10.0), true).unwrap();
//! let config = FractureConfig {
//!     point_kind: PointGenKind::Uniform,
//!     params: PointGenParams { seed: 1, uniform_count: 10, ..Default::default() },
//!     ..Default::default()
//! };
//! let report = fracture(cube, &config).unwrap();
//! for mesh in report.meshes() {
//!     assert!(mesh.is_closed());
//! }
//! ```

pub mod bounds;
pub mod cells;
pub mod clip;
pub mod error;
pub mod mesh;
pub mod pipeline;
pub mod plane;
pub mod points;
pub mod primitives;
pub mod slicer;
pub mod topology;

pub use bounds::{BoundingBox, BoxFace, Corner};
pub use cells::{
    partition_cells, partition_cells_with, BisectorTessellator, Cell, CellFace, RawCell,
    Tessellator,
};
pub use clip::{ClipMesh, ClipOutcome};
pub use error::{ClipError, FractureError, MeshError, SliceError};
pub use mesh::Mesh;
pub use pipeline::{fracture, FractureConfig, FractureReport};
pub use plane::{Classification, Plane};
pub use slicer::{slice, slice_all, slice_with_epsilon, Fragment, SkippedCell, SliceReport};
pub use topology::{MeshTopology, SourceMesh, TopoEdge};
