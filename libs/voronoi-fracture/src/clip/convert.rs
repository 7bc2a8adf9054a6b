//! Conversion of clip state back into a triangle mesh.

use super::{CFace, ClipMesh};
use crate::error::ClipError;
use crate::mesh::Mesh;
use glam::DVec3;

impl ClipMesh {
    /// Triangulates the visible faces into a fragment mesh.
    ///
    /// Vertices referenced by visible faces are remapped to a dense index
    /// space in their original order. Each face loop is fan-triangulated
    /// with winding that agrees with the face normal.
    ///
    /// # Errors
    ///
    /// Fails when fewer than three vertices survive, a face has fewer than
    /// three edges, or a face boundary does not close into one cycle.
    pub fn convert_to_mesh(&self) -> Result<Mesh, ClipError> {
        let mut loops = Vec::new();
        for (index, face) in self.faces.iter().enumerate() {
            if !face.visible {
                continue;
            }
            if face.edges.len() < 3 {
                return Err(ClipError::FaceTooSmall {
                    face: index,
                    edges: face.edges.len(),
                });
            }
            loops.push((face, self.order_vertices(index, face)?));
        }

        let mut remap: Vec<Option<u32>> = vec![None; self.vertices.len()];
        for (_, ordered) in &loops {
            for &v in ordered {
                if !self.vertices[v].visible {
                    return Err(ClipError::IndexOutOfRange { index: v });
                }
                remap[v] = Some(0);
            }
        }

        let mut mesh = Mesh::new();
        for (old, slot) in remap.iter_mut().enumerate() {
            if slot.is_some() {
                *slot = Some(mesh.add_vertex(self.vertices[old].point));
            }
        }

        if mesh.vertex_count() < 3 {
            return Err(ClipError::TooFewVertices {
                count: mesh.vertex_count(),
            });
        }

        let index_of = |v: usize| remap[v].ok_or(ClipError::IndexOutOfRange { index: v });

        for (face, ordered) in &loops {
            let n = ordered.len();
            // Newell normal of the loop; collinear runs on cap loops are common
            let winding = (0..n)
                .map(|i| {
                    let a = self.vertices[ordered[i]].point;
                    let b = self.vertices[ordered[(i + 1) % n]].point;
                    a.cross(b)
                })
                .sum::<DVec3>();
            let clockwise = face.normal.dot(winding) < 0.0;

            let v0 = index_of(ordered[0])?;
            for i in 1..n - 1 {
                let a = index_of(ordered[i])?;
                let b = index_of(ordered[i + 1])?;
                if clockwise {
                    mesh.add_triangle(v0, b, a);
                } else {
                    mesh.add_triangle(v0, a, b);
                }
            }
        }

        Ok(mesh)
    }

    /// Walks a face's unordered edge set into a closed vertex cycle.
    ///
    /// Starts at the first edge and repeatedly takes the unused edge that
    /// shares the current far vertex.
    fn order_vertices(&self, index: usize, face: &CFace) -> Result<Vec<usize>, ClipError> {
        let edges: Vec<[usize; 2]> = face
            .edges
            .iter()
            .map(|&e| self.edges[e].vertices)
            .collect();

        let mut used = vec![false; edges.len()];
        used[0] = true;
        let start = edges[0][0];
        let mut current = edges[0][1];
        let mut ordered = Vec::with_capacity(edges.len());
        ordered.push(start);

        for _ in 1..edges.len() {
            ordered.push(current);
            let next = edges
                .iter()
                .enumerate()
                .find(|(i, edge)| !used[*i] && edge.contains(&current))
                .map(|(i, edge)| (i, if edge[0] == current { edge[1] } else { edge[0] }));

            let (i, far) = next.ok_or(ClipError::OpenCycle { face: index })?;
            used[i] = true;
            current = far;
        }

        if current != start {
            return Err(ClipError::OpenCycle { face: index });
        }

        Ok(ordered)
    }
}
