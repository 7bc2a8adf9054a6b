//! # Mesh Data Structure
//!
//! Indexed triangle mesh used both for the source object and for every
//! fragment. Hosts exchange it as flat position and index buffers.

use crate::error::MeshError;
use config::constants::EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A triangle mesh with vertices and indices.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::ZERO);
/// let b = mesh.add_vertex(DVec3::X);
/// let c = mesh.add_vertex(DVec3::Y);
/// mesh.add_triangle(a, b, c);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    /// Counter-clockwise seen from outside
    triangles: Vec<[u32; 3]>,
    /// Carried for hosts, ignored by clipping
    normals: Option<Vec<DVec3>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from a host vertex list and a flat index buffer.
    ///
    /// # Errors
    ///
    /// Fails when the index count is not a multiple of 3 or an index is out
    /// of range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voronoi_fracture::Mesh;
    /// use glam::DVec3;
    ///
    /// let mesh = Mesh::from_buffers(vec![DVec3::ZERO, DVec3::X, DVec3::Y], &[0, 1, 2]).unwrap();
    /// assert_eq!(mesh.triangle_count(), 1);
    /// assert!(Mesh::from_buffers(vec![DVec3::ZERO], &[0, 0]).is_err());
    /// ```
    pub fn from_buffers(positions: Vec<DVec3>, indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangulated {
                count: indices.len(),
            });
        }

        let vertex_count = positions.len();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        Ok(Self {
            vertices: positions,
            triangles: indices
                .chunks_exact(3)
                .map(|tri| [tri[0], tri[1], tri[2]])
                .collect(),
            normals: None,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    /// Appends a triangle.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Triangle index triples.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Position of one vertex.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Per-vertex normals, if computed.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    fn corners(&self, tri: &[u32; 3]) -> [DVec3; 3] {
        tri.map(|i| self.vertices[i as usize])
    }

    /// Computes area-weighted vertex normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];
        for tri in &self.triangles {
            let [a, b, c] = self.corners(tri);
            let weighted = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += weighted;
            }
        }
        self.normals = Some(normals.into_iter().map(DVec3::normalize_or_zero).collect());
    }

    /// Axis-aligned `(min, max)`; both zero for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((&first, rest)) = self.vertices.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        rest.iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
    }

    /// Moves every vertex along its averaged normal.
    ///
    /// Positive distances push outward for a mesh with outward winding;
    /// negative distances shrink it. Normals are recomputed afterwards.
    pub fn offset_along_normals(&mut self, distance: f64) {
        self.compute_normals();
        if let Some(normals) = &self.normals {
            for (v, n) in self.vertices.iter_mut().zip(normals) {
                *v += *n * distance;
            }
        }
        self.compute_normals();
    }

    /// Signed volume enclosed by the mesh.
    ///
    /// Positive for a closed mesh with outward winding.
    pub fn volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = self.corners(tri);
                a.dot(b.cross(c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// True when every directed edge has exactly one reversed twin, which
    /// makes the mesh watertight and consistently wound.
    pub fn is_closed(&self) -> bool {
        if self.triangles.is_empty() {
            return false;
        }

        let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in &self.triangles {
            for i in 0..3 {
                *directed.entry((tri[i], tri[(i + 1) % 3])).or_insert(0) += 1;
            }
        }

        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Checks indices and rejects degenerate triangles.
    ///
    /// # Errors
    ///
    /// - [`MeshError::IndexOutOfRange`] for a dangling index
    /// - [`MeshError::InvalidTopology`] for a triangle repeating a vertex
    /// - [`MeshError::DegenerateGeometry`] for a zero-area triangle
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (t, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return Err(MeshError::invalid_topology(format!(
                    "Triangle {t} repeats a vertex: {tri:?}"
                )));
            }
            let [a, b, c] = self.corners(tri);
            if (b - a).cross(c - a).length() < EPSILON {
                return Err(MeshError::degenerate(format!("Triangle {t} has zero area")));
            }
        }
        Ok(())
    }

    /// Positions as `[x, y, z, x, y, z, ...]`.
    pub fn positions_flat(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Indices as `[i0, i1, i2, ...]`.
    pub fn indices_flat(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
