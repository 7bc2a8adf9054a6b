//! # Box Primitive
//!
//! Generates closed box meshes from a [`BoundingBox`].

use crate::bounds::{BoundingBox, BoxFace};
use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a closed box mesh filling `bounds`.
///
/// Eight shared corner vertices, two counter-clockwise triangles per face.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::{BoundingBox, primitives::create_box};
/// use glam::DVec3;
///
/// let bounds = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
/// let mesh = create_box(&bounds).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert!(mesh.is_closed());
/// ```
pub fn create_box(bounds: &BoundingBox) -> Result<Mesh, MeshError> {
    let half = bounds.half_extents();
    if half.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Box extents must be positive: {:?}",
            bounds.size()
        )));
    }

    let mut mesh = Mesh::new();
    for corner in bounds.corners() {
        mesh.add_vertex(corner);
    }

    for face in BoxFace::ALL {
        let [a, b, c, d] = face.corner_loop().map(|i| i as u32);
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
    }

    Ok(mesh)
}

/// Creates a cube or rectangular prism mesh.
///
/// * `size` - Dimensions [x, y, z]
/// * `center` - If true, center at origin; if false, corner at origin
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::primitives::create_cube;
/// use glam::DVec3;
///
/// let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_cube(size: DVec3, center: bool) -> Result<Mesh, MeshError> {
    let half = size * 0.5;
    let origin = if center { DVec3::ZERO } else { half };
    if size.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Cube size must be positive: {size:?}"
        )));
    }
    create_box(&BoundingBox::new(origin, half))
}
