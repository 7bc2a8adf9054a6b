//! # Fracture Errors
//!
//! Error types for mesh import, per-cell clipping and the fracture pipeline.
//!
//! ## Error Policy
//!
//! - Per-cell failures ([`ClipError`], [`SliceError`]) are local: the cell is
//!   skipped and every other cell continues.
//! - Only [`FractureError`] aborts a whole run.

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// MESH ERRORS
// =============================================================================

/// Errors raised while importing a mesh or deriving its topology.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Index buffer length is not a multiple of three.
    #[error("Index count {count} is not a multiple of 3")]
    NotTriangulated {
        /// Number of indices supplied
        count: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    /// The mesh is not a closed 2-manifold.
    #[error("Invalid topology: {message}")]
    InvalidTopology {
        /// Description of the defect
        message: String,
    },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the defect
        message: String,
    },
}

impl MeshError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

// =============================================================================
// CLIP ERRORS
// =============================================================================

/// Topology failures inside a single half-space clip or conversion.
///
/// These abort the current cell only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// A surviving face kept fewer than two edges.
    #[error("Face {face} kept only {edges} edge(s) after clipping")]
    FaceTooSmall {
        /// Face index
        face: usize,
        /// Number of edges left
        edges: usize,
    },

    /// A surviving face references an edge that was already removed.
    #[error("Face {face} references removed edge {edge}")]
    StaleEdge {
        /// Face index
        face: usize,
        /// Edge index
        edge: usize,
    },

    /// A vertex occurs more than twice, or more than two polyline endpoints
    /// were found. Usually a non-convex or needle-like face.
    #[error("Face {face} has an ambiguous open boundary")]
    AmbiguousBoundary {
        /// Face index
        face: usize,
    },

    /// Exactly one polyline endpoint was found.
    #[error("Face {face} has an unterminated open boundary")]
    UnterminatedBoundary {
        /// Face index
        face: usize,
    },

    /// The cap face contains the same vertex pair three or more times.
    #[error("Cap face holds edge ({v0}, {v1}) more than twice")]
    DuplicateEdgeOverflow {
        /// Lower vertex index
        v0: usize,
        /// Higher vertex index
        v1: usize,
    },

    /// A duplicate cap edge was not attached to the cap face.
    #[error("Edge {edge} is not attached to the cap face")]
    DetachedCapEdge {
        /// Edge index
        edge: usize,
    },

    /// Boundary walk could not close the vertex cycle of a face.
    #[error("Face {face} boundary does not form a single cycle")]
    OpenCycle {
        /// Face index
        face: usize,
    },

    /// Fewer than three vertices survived the clip.
    #[error("Only {count} vertices survived clipping")]
    TooFewVertices {
        /// Number of visible vertices
        count: usize,
    },

    /// A triangle references a vertex that is no longer visible.
    #[error("Vertex {index} is not part of the fragment")]
    IndexOutOfRange {
        /// Original vertex index
        index: usize,
    },
}

// =============================================================================
// SLICE ERRORS
// =============================================================================

/// Why a single cell produced no fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    /// The cell has no planes.
    #[error("Cell has no planes")]
    EmptyCell,

    /// No plane of the cell cut through the mesh.
    #[error("No plane of the cell dissected the mesh")]
    NotDissected,

    /// The mesh lies entirely outside one of the cell's planes.
    #[error("Mesh lies outside the cell")]
    Culled,

    /// The clip or the conversion failed topologically.
    #[error(transparent)]
    Clip(#[from] ClipError),
}

// =============================================================================
// FRACTURE ERRORS
// =============================================================================

/// Fatal errors for a whole fracture run.
#[derive(Debug, Error)]
pub enum FractureError {
    /// The source mesh could not be prepared.
    #[error("Source mesh rejected: {0}")]
    Mesh(#[from] MeshError),

    /// Configuration values were rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Point generation produced nothing to partition.
    #[error("No seed points were generated")]
    NoSeedPoints,

    /// Partitioning produced no usable cells.
    #[error("Tessellation produced no usable cells")]
    NoCells,

    /// The slicing worker pool could not be created.
    #[error("Failed to build worker pool: {message}")]
    ThreadPool {
        /// Message from the pool builder
        message: String,
    },
}
