//! # Convex Polyhedron
//!
//! Vertex list plus ordered face loops, clipped one half-space at a time.
//! Used to grow a Voronoi cell from its container box.

use crate::bounds::{BoundingBox, BoxFace};
use crate::plane::Plane;
use config::constants::{EPSILON, MIN_FACE_POINTS, RAW_VERTEX_SCALE};
use glam::DVec3;
use std::collections::HashMap;

use super::tessellate::RawCell;

/// A convex polyhedron with counter-clockwise (outward) face loops.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolyhedron {
    vertices: Vec<DVec3>,
    faces: Vec<Vec<usize>>,
}

impl ConvexPolyhedron {
    /// The polyhedron filling a box.
    pub fn from_box(bounds: &BoundingBox) -> Self {
        Self {
            vertices: bounds.corners().to_vec(),
            faces: BoxFace::ALL
                .iter()
                .map(|face| face.corner_loop().to_vec())
                .collect(),
        }
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Face loops as vertex indices.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// True once clipping removed everything.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Squared distance from `center` to the farthest vertex.
    pub fn max_radius_sq(&self, center: DVec3) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.distance_squared(center))
            .fold(0.0, f64::max)
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| {
                let p0 = self.vertices[face[0]];
                face.windows(2)
                    .skip(1)
                    .map(|w| p0.dot(self.vertices[w[0]].cross(self.vertices[w[1]])))
                    .sum::<f64>()
            })
            .sum::<f64>()
            / 6.0
    }

    /// Keeps the positive side of `plane`.
    ///
    /// Returns true when the polyhedron changed.
    pub fn clip(&mut self, plane: &Plane) -> bool {
        let distances: Vec<f64> = self
            .vertices
            .iter()
            .map(|v| {
                let d = plane.signed_distance(*v);
                if d.abs() < EPSILON {
                    0.0
                } else {
                    d
                }
            })
            .collect();

        if distances.iter().all(|&d| d >= 0.0) {
            return false;
        }
        if distances.iter().all(|&d| d <= 0.0) {
            self.vertices.clear();
            self.faces.clear();
            return true;
        }

        let mut crossings: HashMap<(usize, usize), usize> = HashMap::new();
        let mut cap: Vec<usize> = Vec::new();
        let mut faces = Vec::with_capacity(self.faces.len() + 1);

        for face in &self.faces {
            let mut kept = Vec::with_capacity(face.len() + 1);
            for (i, &current) in face.iter().enumerate() {
                let next = face[(i + 1) % face.len()];
                let (dc, dn) = (distances[current], distances[next]);

                if dc >= 0.0 {
                    kept.push(current);
                    if dc == 0.0 && !cap.contains(&current) {
                        cap.push(current);
                    }
                }

                if (dc > 0.0 && dn < 0.0) || (dc < 0.0 && dn > 0.0) {
                    let key = (current.min(next), current.max(next));
                    let vertex = *crossings.entry(key).or_insert_with(|| {
                        let (a, b) = (self.vertices[key.0], self.vertices[key.1]);
                        let (da, db) = (distances[key.0], distances[key.1]);
                        self.vertices.push(a + (b - a) * (da / (da - db)));
                        self.vertices.len() - 1
                    });
                    kept.push(vertex);
                    if !cap.contains(&vertex) {
                        cap.push(vertex);
                    }
                }
            }

            if kept.len() >= MIN_FACE_POINTS {
                faces.push(kept);
            }
        }

        if cap.len() >= MIN_FACE_POINTS {
            faces.push(self.order_loop(&cap, -plane.normal()));
        }

        self.faces = faces;
        self.compact();
        true
    }

    /// Sorts coplanar vertices counter-clockwise around `axis`.
    fn order_loop(&self, indices: &[usize], axis: DVec3) -> Vec<usize> {
        let center = indices.iter().map(|&i| self.vertices[i]).sum::<DVec3>()
            / indices.len() as f64;
        let u = axis.any_orthonormal_vector();
        let v = axis.cross(u);

        let mut keyed: Vec<(f64, usize)> = indices
            .iter()
            .map(|&i| {
                let offset = self.vertices[i] - center;
                (offset.dot(v).atan2(offset.dot(u)), i)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, i)| i).collect()
    }

    /// Drops vertices no face references.
    fn compact(&mut self) {
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut vertices = Vec::new();
        for face in &mut self.faces {
            for index in face.iter_mut() {
                if remap[*index] == usize::MAX {
                    remap[*index] = vertices.len();
                    vertices.push(self.vertices[*index]);
                }
                *index = remap[*index];
            }
        }
        self.vertices = vertices;
    }

    /// Encodes the polyhedron the way a container tessellator reports cells.
    pub fn to_raw(&self, seed_index: usize, seed: DVec3) -> RawCell {
        let vertices = self
            .vertices
            .iter()
            .flat_map(|v| ((*v - seed) * RAW_VERTEX_SCALE).to_array())
            .collect();

        let mut faces = Vec::new();
        for face in &self.faces {
            faces.push(face.len());
            faces.extend_from_slice(face);
        }

        RawCell {
            seed_index,
            seed,
            vertices,
            faces,
        }
    }
}
