//! # Bounding Volume
//!
//! Axis-aligned box stored as center plus half-extents. Used to place seed
//! points, to size the tessellation container and to turn percentages of
//! the model size into absolute distances.

use crate::mesh::Mesh;
use config::constants::percent_of;
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// CORNERS AND FACES
// =============================================================================

/// One of the eight box corners, selected by the sign of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    /// Take the maximum x instead of the minimum.
    pub max_x: bool,
    /// Take the maximum y instead of the minimum.
    pub max_y: bool,
    /// Take the maximum z instead of the minimum.
    pub max_z: bool,
}

impl Corner {
    /// Builds a corner from a 3-bit index (bit 0 = x, bit 1 = y, bit 2 = z).
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self {
            max_x: index & 1 != 0,
            max_y: index & 2 != 0,
            max_z: index & 4 != 0,
        }
    }

    /// The 3-bit index of this corner.
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.max_x) | usize::from(self.max_y) << 1 | usize::from(self.max_z) << 2
    }
}

/// One of the six box faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxFace {
    /// Face at minimum x.
    NegX,
    /// Face at maximum x.
    PosX,
    /// Face at minimum y.
    NegY,
    /// Face at maximum y.
    PosY,
    /// Face at minimum z.
    NegZ,
    /// Face at maximum z.
    PosZ,
}

impl BoxFace {
    /// All faces in axis order.
    pub const ALL: [BoxFace; 6] = [
        BoxFace::NegX,
        BoxFace::PosX,
        BoxFace::NegY,
        BoxFace::PosY,
        BoxFace::NegZ,
        BoxFace::PosZ,
    ];

    /// Axis index (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            BoxFace::NegX | BoxFace::PosX => 0,
            BoxFace::NegY | BoxFace::PosY => 1,
            BoxFace::NegZ | BoxFace::PosZ => 2,
        }
    }

    /// True for the faces at the maximum of their axis.
    #[inline]
    pub fn is_max(self) -> bool {
        matches!(self, BoxFace::PosX | BoxFace::PosY | BoxFace::PosZ)
    }

    /// Outward unit normal.
    pub fn normal(self) -> DVec3 {
        let mut normal = DVec3::ZERO;
        normal[self.axis()] = if self.is_max() { 1.0 } else { -1.0 };
        normal
    }

    /// Corner indices of the face, counter-clockwise seen from outside.
    pub fn corner_loop(self) -> [usize; 4] {
        match self {
            BoxFace::NegX => [0, 4, 6, 2],
            BoxFace::PosX => [1, 3, 7, 5],
            BoxFace::NegY => [0, 1, 5, 4],
            BoxFace::PosY => [2, 6, 7, 3],
            BoxFace::NegZ => [0, 2, 3, 1],
            BoxFace::PosZ => [4, 5, 7, 6],
        }
    }
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounding box.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::BoundingBox;
/// use glam::DVec3;
///
/// let bounds = BoundingBox::from_min_max(DVec3::splat(-1.0), DVec3::splat(1.0));
/// assert_eq!(bounds.center(), DVec3::ZERO);
/// assert!((bounds.diagonal() - 12f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    center: DVec3,
    half_extents: DVec3,
}

impl BoundingBox {
    /// Creates a box from its center and half-extents.
    pub fn new(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Creates a box spanning two corners.
    pub fn from_min_max(min: DVec3, max: DVec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self {
            center: (lo + hi) * 0.5,
            half_extents: (hi - lo) * 0.5,
        }
    }

    /// Creates the tight box around a mesh's vertices.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let (min, max) = mesh.bounding_box();
        Self::from_min_max(min, max)
    }

    /// Box center.
    #[inline]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Half the size along each axis.
    #[inline]
    pub fn half_extents(&self) -> DVec3 {
        self.half_extents
    }

    /// Full size along each axis.
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.half_extents * 2.0
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> DVec3 {
        self.center - self.half_extents
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> DVec3 {
        self.center + self.half_extents
    }

    /// Minimum x.
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min().x
    }

    /// Maximum x.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max().x
    }

    /// Minimum y.
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min().y
    }

    /// Maximum y.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max().y
    }

    /// Minimum z.
    #[inline]
    pub fn min_z(&self) -> f64 {
        self.min().z
    }

    /// Maximum z.
    #[inline]
    pub fn max_z(&self) -> f64 {
        self.max().z
    }

    /// Position of one corner.
    pub fn corner(&self, corner: Corner) -> DVec3 {
        let sign = |positive: bool| if positive { 1.0 } else { -1.0 };
        self.center
            + self.half_extents
                * DVec3::new(sign(corner.max_x), sign(corner.max_y), sign(corner.max_z))
    }

    /// All eight corners, ordered by [`Corner::index`].
    pub fn corners(&self) -> [DVec3; 8] {
        std::array::from_fn(|index| self.corner(Corner::from_index(index)))
    }

    /// Distance between opposite corners.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.size().length()
    }

    /// Converts a percentage of the diagonal into an absolute distance.
    #[inline]
    pub fn percent_of_diagonal(&self, percent: f64) -> f64 {
        percent_of(self.diagonal(), percent)
    }

    /// Enclosed volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Returns a copy grown by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> Self {
        Self::new(self.center, self.half_extents + DVec3::splat(amount))
    }

    /// True when the point lies inside or on the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }
}
