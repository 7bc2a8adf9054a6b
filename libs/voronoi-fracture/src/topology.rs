//! # Mesh Topology
//!
//! Edge/face adjacency derived from a triangle list. The derivation is a
//! snapshot: it is not kept in sync when the mesh changes.

use crate::error::MeshError;
use crate::mesh::Mesh;
use std::collections::{BTreeSet, HashMap};

/// A unique undirected edge with its two adjacent triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopoEdge {
    /// Endpoint vertex indices, lower index first.
    pub vertices: [usize; 2],
    /// Adjacent triangle indices in discovery order.
    pub faces: [usize; 2],
}

/// Unique edges of a closed mesh plus each triangle's edge set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshTopology {
    edges: Vec<TopoEdge>,
    face_edges: Vec<BTreeSet<usize>>,
}

impl MeshTopology {
    /// Derives the unique-edge list of a mesh.
    ///
    /// Reverse-oriented and same-oriented duplicates of an edge are merged
    /// into a single record.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidTopology`] when a triangle repeats a
    /// vertex, an edge borders a single triangle, or an edge borders three
    /// or more triangles.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voronoi_fracture::{MeshTopology, primitives::create_cube};
    /// use glam::DVec3;
    ///
    /// let cube = create_cube(DVec3::ONE, true).unwrap();
    /// let topology = MeshTopology::build(&cube).unwrap();
    /// assert_eq!(topology.edge_count(), 18);
    /// ```
    pub fn build(mesh: &Mesh) -> Result<Self, MeshError> {
        let mut lookup: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges: Vec<TopoEdge> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut face_edges = Vec::with_capacity(mesh.triangle_count());

        for (face, tri) in mesh.triangles().iter().enumerate() {
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return Err(MeshError::invalid_topology(format!(
                    "triangle {face} repeats a vertex"
                )));
            }

            let mut set = BTreeSet::new();
            for i in 0..3 {
                let a = tri[i] as usize;
                let b = tri[(i + 1) % 3] as usize;
                let key = (a.min(b), a.max(b));

                let index = match lookup.get(&key) {
                    Some(&index) => {
                        if counts[index] >= 2 {
                            return Err(MeshError::invalid_topology(format!(
                                "edge ({}, {}) borders more than two triangles",
                                key.0, key.1
                            )));
                        }
                        edges[index].faces[1] = face;
                        counts[index] += 1;
                        index
                    }
                    None => {
                        let index = edges.len();
                        edges.push(TopoEdge {
                            vertices: [key.0, key.1],
                            faces: [face, face],
                        });
                        counts.push(1);
                        lookup.insert(key, index);
                        index
                    }
                };
                set.insert(index);
            }
            face_edges.push(set);
        }

        if let Some(open) = counts.iter().position(|&count| count < 2) {
            let [a, b] = edges[open].vertices;
            return Err(MeshError::invalid_topology(format!(
                "edge ({a}, {b}) borders a single triangle"
            )));
        }

        Ok(Self { edges, face_edges })
    }

    /// Returns the unique edges.
    #[inline]
    pub fn edges(&self) -> &[TopoEdge] {
        &self.edges
    }

    /// Returns the edge set of every triangle, indexed like the triangles.
    #[inline]
    pub fn face_edges(&self) -> &[BTreeSet<usize>] {
        &self.face_edges
    }

    /// Number of unique edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// A source mesh bundled with its topology snapshot.
///
/// Read-only once built, so it is shared across slicing workers as-is.
#[derive(Debug, Clone)]
pub struct SourceMesh {
    mesh: Mesh,
    topology: MeshTopology,
}

impl SourceMesh {
    /// Validates `mesh`, derives its topology and bundles both.
    pub fn new(mesh: Mesh) -> Result<Self, MeshError> {
        mesh.validate()?;
        let topology = MeshTopology::build(&mesh)?;
        Ok(Self { mesh, topology })
    }

    /// The triangle mesh.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// The derived edge/face adjacency.
    #[inline]
    pub fn topology(&self) -> &MeshTopology {
        &self.topology
    }
}
