//! # Half-Space Clipper
//!
//! Clips a closed convex mesh by a sequence of planes, keeping the positive
//! side of each plane and capping the cut with a new face.
//!
//! ## Algorithm Overview
//!
//! Each [`ClipMesh::clip_once`] runs three phases:
//! 1. Classify visible vertices by signed distance (snapped to zero inside
//!    the clip band).
//! 2. Drop edges behind the plane and shorten straddling edges in place.
//! 3. Close every face's open polyline with a new edge shared with a cap
//!    face, then merge duplicate cap edges.
//!
//! The structure stays a closed 2-manifold after every successful clip.
//! A `ClipMesh` is built for one cell and discarded afterwards.

mod convert;

#[cfg(test)]
mod tests;

use crate::error::ClipError;
use crate::plane::Plane;
use crate::topology::SourceMesh;
use config::constants::CLIP_EPSILON;
use glam::DVec3;
use log::debug;
use std::collections::BTreeSet;

// =============================================================================
// CLIP STATE
// =============================================================================

/// Result of clipping against one plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// No vertex lies strictly in front of the plane; nothing is left.
    Invisible,
    /// No vertex lies strictly behind the plane; nothing changed.
    Visible,
    /// The plane cut the mesh.
    Dissected,
}

#[derive(Debug, Clone, PartialEq)]
struct CVertex {
    point: DVec3,
    distance: f64,
    occurs: u32,
    visible: bool,
}

impl CVertex {
    fn new(point: DVec3) -> Self {
        Self {
            point,
            distance: 0.0,
            occurs: 0,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CEdge {
    /// Lower index first.
    vertices: [usize; 2],
    faces: [usize; 2],
    visible: bool,
}

impl CEdge {
    fn new(a: usize, b: usize, faces: [usize; 2]) -> Self {
        Self {
            vertices: [a.min(b), a.max(b)],
            faces,
            visible: true,
        }
    }

    /// Replaces one endpoint and restores the canonical order.
    fn replace_vertex(&mut self, slot: usize, vertex: usize) {
        self.vertices[slot] = vertex;
        if self.vertices[0] > self.vertices[1] {
            self.vertices.swap(0, 1);
        }
    }

    /// The adjacent face that is not `face`.
    fn other_face(&self, face: usize) -> Option<usize> {
        if self.faces[0] == face {
            Some(self.faces[1])
        } else if self.faces[1] == face {
            Some(self.faces[0])
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CFace {
    normal: DVec3,
    edges: BTreeSet<usize>,
    visible: bool,
}

// =============================================================================
// CLIP MESH
// =============================================================================

/// Mutable vertex/edge/face clipping structure for one cell.
///
/// # Example
///
/// ```rust
/// use voronoi_fracture::{ClipMesh, ClipOutcome, Plane, SourceMesh};
/// use voronoi_fracture::primitives::create_cube;
/// use glam::DVec3;
///
/// let source = SourceMesh::new(create_cube(DVec3::ONE, true).unwrap()).unwrap();
/// let mut clip = ClipMesh::new(&source);
/// assert_eq!(clip.clip_once(&Plane::new(DVec3::X, 0.0)).unwrap(), ClipOutcome::Dissected);
/// let half = clip.convert_to_mesh().unwrap();
/// assert!(half.is_closed());
/// ```
#[derive(Debug, Clone)]
pub struct ClipMesh {
    vertices: Vec<CVertex>,
    edges: Vec<CEdge>,
    faces: Vec<CFace>,
    epsilon: f64,
}

impl ClipMesh {
    /// Copies the source vertices and adjacency into fresh clip state.
    pub fn new(source: &SourceMesh) -> Self {
        Self::with_epsilon(source, CLIP_EPSILON)
    }

    /// Like [`ClipMesh::new`] with a custom on-plane band.
    pub fn with_epsilon(source: &SourceMesh, epsilon: f64) -> Self {
        let mesh = source.mesh();
        let topology = source.topology();

        let vertices = mesh.vertices().iter().copied().map(CVertex::new).collect();

        let edges = topology
            .edges()
            .iter()
            .map(|edge| CEdge::new(edge.vertices[0], edge.vertices[1], edge.faces))
            .collect();

        let faces = mesh
            .triangles()
            .iter()
            .zip(topology.face_edges())
            .map(|(tri, edges)| {
                let [p0, p1, p2] = tri.map(|i| mesh.vertex(i));
                CFace {
                    normal: (p1 - p0).cross(p2 - p0).normalize_or_zero(),
                    edges: edges.clone(),
                    visible: true,
                }
            })
            .collect();

        Self {
            vertices,
            edges,
            faces,
            epsilon,
        }
    }

    /// Clips the mesh against one plane, keeping its positive side.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipError`] when face closing meets inconsistent
    /// topology. The clip state is unusable afterwards.
    pub fn clip_once(&mut self, plane: &Plane) -> Result<ClipOutcome, ClipError> {
        let outcome = self.classify_vertices(plane);
        if outcome != ClipOutcome::Dissected {
            return Ok(outcome);
        }

        self.resolve_edges();
        self.close_faces(plane)?;
        Ok(ClipOutcome::Dissected)
    }

    /// Number of vertices still part of the mesh.
    pub fn visible_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.visible).count()
    }

    /// Number of faces still part of the mesh.
    pub fn visible_face_count(&self) -> usize {
        self.faces.iter().filter(|f| f.visible).count()
    }

    // -------------------------------------------------------------------------
    // Phase 1: vertices
    // -------------------------------------------------------------------------

    fn classify_vertices(&mut self, plane: &Plane) -> ClipOutcome {
        let mut positive = 0usize;
        let mut negative = 0usize;

        for vertex in self.vertices.iter_mut().filter(|v| v.visible) {
            vertex.distance = plane.signed_distance(vertex.point);
            if vertex.distance > self.epsilon {
                positive += 1;
            } else if vertex.distance < -self.epsilon {
                negative += 1;
                vertex.visible = false;
            } else {
                vertex.distance = 0.0;
            }
        }

        if positive == 0 {
            ClipOutcome::Invisible
        } else if negative == 0 {
            ClipOutcome::Visible
        } else {
            ClipOutcome::Dissected
        }
    }

    // -------------------------------------------------------------------------
    // Phase 2: edges
    // -------------------------------------------------------------------------

    fn resolve_edges(&mut self) {
        for index in 0..self.edges.len() {
            if !self.edges[index].visible {
                continue;
            }

            let [v0, v1] = self.edges[index].vertices;
            let d0 = self.vertices[v0].distance;
            let d1 = self.vertices[v1].distance;

            if d0 <= 0.0 && d1 <= 0.0 {
                let edge = &mut self.edges[index];
                edge.visible = false;
                for face in edge.faces {
                    let face = &mut self.faces[face];
                    face.edges.remove(&index);
                    if face.edges.is_empty() {
                        face.visible = false;
                    }
                }
                continue;
            }

            if d0 >= 0.0 && d1 >= 0.0 {
                continue;
            }

            // Straddling: shorten the edge to the crossing point
            let p0 = self.vertices[v0].point;
            let p1 = self.vertices[v1].point;
            let crossing = p0 + (p1 - p0) * (d0 / (d0 - d1));

            let created = self.vertices.len();
            self.vertices.push(CVertex::new(crossing));

            let slot = if d0 > 0.0 { 1 } else { 0 };
            self.edges[index].replace_vertex(slot, created);
        }
    }

    // -------------------------------------------------------------------------
    // Phase 3: faces
    // -------------------------------------------------------------------------

    fn close_faces(&mut self, plane: &Plane) -> Result<(), ClipError> {
        let cap = self.faces.len();
        self.faces.push(CFace {
            normal: -plane.normal(),
            edges: BTreeSet::new(),
            visible: true,
        });

        for face in 0..cap {
            if !self.faces[face].visible {
                continue;
            }

            let edges: Vec<usize> = self.faces[face].edges.iter().copied().collect();
            if edges.len() < 2 {
                return Err(ClipError::FaceTooSmall {
                    face,
                    edges: edges.len(),
                });
            }

            for &edge in &edges {
                if !self.edges[edge].visible {
                    return Err(ClipError::StaleEdge { face, edge });
                }
                for v in self.edges[edge].vertices {
                    self.vertices[v].occurs = 0;
                }
            }

            if let Some((start, end)) = self.open_polyline(face, &edges)? {
                let created = self.edges.len();
                self.edges.push(CEdge::new(start, end, [face, cap]));
                self.faces[face].edges.insert(created);
                self.faces[cap].edges.insert(created);
            }
        }

        self.merge_duplicate_cap_edges(cap)?;

        if self.faces[cap].edges.len() < 3 {
            debug!(
                "Discarding degenerate cap face with {} edge(s)",
                self.faces[cap].edges.len()
            );
            self.faces[cap].visible = false;
        }

        Ok(())
    }

    /// Finds the two endpoints of a face's open boundary, if any.
    fn open_polyline(
        &mut self,
        face: usize,
        edges: &[usize],
    ) -> Result<Option<(usize, usize)>, ClipError> {
        for &edge in edges {
            for v in self.edges[edge].vertices {
                self.vertices[v].occurs += 1;
                if self.vertices[v].occurs > 2 {
                    return Err(ClipError::AmbiguousBoundary { face });
                }
            }
        }

        let mut ends: Vec<usize> = Vec::with_capacity(2);
        for &edge in edges {
            for v in self.edges[edge].vertices {
                if self.vertices[v].occurs == 1 {
                    if ends.len() == 2 {
                        return Err(ClipError::AmbiguousBoundary { face });
                    }
                    ends.push(v);
                }
            }
        }

        match ends.as_slice() {
            [] => Ok(None),
            [start, end] => Ok(Some((*start, *end))),
            _ => Err(ClipError::UnterminatedBoundary { face }),
        }
    }

    /// Collapses pairs of cap edges joining the same two vertices.
    ///
    /// The two non-cap faces that held the pair end up sharing the first
    /// edge; the second edge is dropped.
    fn merge_duplicate_cap_edges(&mut self, cap: usize) -> Result<(), ClipError> {
        let mut keyed: Vec<([usize; 2], usize)> = self.faces[cap]
            .edges
            .iter()
            .map(|&e| (self.edges[e].vertices, e))
            .collect();
        keyed.sort_unstable();

        for i in 1..keyed.len() {
            let (key, e1) = keyed[i];
            let (previous, e0) = keyed[i - 1];
            if key != previous {
                continue;
            }
            if keyed.get(i + 1).is_some_and(|(next, _)| *next == key) {
                return Err(ClipError::DuplicateEdgeOverflow {
                    v0: key[0],
                    v1: key[1],
                });
            }

            debug!("Merging duplicate cap edge ({}, {})", key[0], key[1]);

            let f0 = self.edges[e0]
                .other_face(cap)
                .ok_or(ClipError::DetachedCapEdge { edge: e0 })?;
            let f1 = self.edges[e1]
                .other_face(cap)
                .ok_or(ClipError::DetachedCapEdge { edge: e1 })?;

            let cap_face = &mut self.faces[cap];
            cap_face.edges.remove(&e0);
            cap_face.edges.remove(&e1);

            let face1 = &mut self.faces[f1];
            face1.edges.remove(&e1);
            face1.edges.insert(e0);

            self.edges[e0].faces = [f0, f1];
            self.edges[e1].visible = false;
        }

        Ok(())
    }
}
