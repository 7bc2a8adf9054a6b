//! # Clipper Tests
//!
//! Tests for half-space clipping and fragment conversion.

use super::*;
use crate::primitives::create_cube;
use approx::assert_relative_eq;

fn unit_cube() -> SourceMesh {
    SourceMesh::new(create_cube(DVec3::ONE, true).unwrap()).unwrap()
}

/// Structural fields only; `distance` and `occurs` are scratch values.
fn snapshot(clip: &ClipMesh) -> (Vec<(DVec3, bool)>, Vec<CEdge>, Vec<CFace>) {
    (
        clip.vertices.iter().map(|v| (v.point, v.visible)).collect(),
        clip.edges.clone(),
        clip.faces.clone(),
    )
}

// =============================================================================
// SINGLE PLANE SCENARIOS
// =============================================================================

#[test]
fn test_plane_through_center_dissects() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);

    let outcome = clip.clip_once(&Plane::new(DVec3::X, 0.0)).unwrap();
    assert_eq!(outcome, ClipOutcome::Dissected);
    // 4 kept corners plus one crossing per cut edge (4 axis edges, 4 diagonals)
    assert_eq!(clip.visible_vertex_count(), 12);
    // 8 side triangles, 2 on the +x face and the cap
    assert_eq!(clip.visible_face_count(), 11);

    let half = clip.convert_to_mesh().unwrap();
    for v in half.vertices() {
        assert!(v.x >= -CLIP_EPSILON);
    }
    assert!(half.is_closed());
    assert_relative_eq!(half.volume(), 0.5, epsilon = 1e-9);
}

#[test]
fn test_plane_beyond_mesh_is_invisible() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    let outcome = clip.clip_once(&Plane::new(DVec3::X, 10.0)).unwrap();
    assert_eq!(outcome, ClipOutcome::Invisible);
    assert_eq!(clip.visible_vertex_count(), 0);
}

#[test]
fn test_plane_behind_mesh_is_visible_without_mutation() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    let before = snapshot(&clip);

    let outcome = clip.clip_once(&Plane::new(DVec3::X, -10.0)).unwrap();
    assert_eq!(outcome, ClipOutcome::Visible);
    assert_eq!(snapshot(&clip), before);
}

#[test]
fn test_classification_is_exhaustive() {
    let source = unit_cube();
    let planes = [
        Plane::new(DVec3::new(1.0, 1.0, 0.0), 0.3),
        Plane::new(DVec3::new(-1.0, 2.0, 0.5), -0.1),
        Plane::new(DVec3::Z, 0.5),
        Plane::new(DVec3::NEG_Y, 0.6),
    ];

    for plane in planes {
        let mut clip = ClipMesh::new(&source);
        let (mut positive, mut negative, mut zero) = (0, 0, 0);
        for v in source.mesh().vertices() {
            let d = plane.signed_distance(*v);
            if d > CLIP_EPSILON {
                positive += 1;
            } else if d < -CLIP_EPSILON {
                negative += 1;
            } else {
                zero += 1;
            }
        }
        assert_eq!(positive + negative + zero, 8);

        let expected = match (positive, negative) {
            (0, _) => ClipOutcome::Invisible,
            (_, 0) => ClipOutcome::Visible,
            _ => ClipOutcome::Dissected,
        };
        assert_eq!(clip.clip_once(&plane).unwrap(), expected);
    }
}

#[test]
fn test_cap_face_faces_away_from_kept_side() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    clip.clip_once(&Plane::new(DVec3::Y, 0.1)).unwrap();

    let cap = clip.faces.last().unwrap();
    assert!(cap.visible);
    assert_eq!(cap.normal, DVec3::NEG_Y);
    // Four box edges plus one face diagonal per side face
    assert_eq!(cap.edges.len(), 8);
}

#[test]
fn test_edges_stay_canonical() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    clip.clip_once(&Plane::new(DVec3::new(1.0, 0.3, -0.2), 0.05))
        .unwrap();
    for edge in clip.edges.iter().filter(|e| e.visible) {
        assert!(edge.vertices[0] < edge.vertices[1]);
    }
}

#[test]
fn test_plane_through_vertices_snaps() {
    // Cuts along two opposite cube edges
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    let outcome = clip.clip_once(&Plane::new(DVec3::new(1.0, 1.0, 0.0), 0.0)).unwrap();
    assert_eq!(outcome, ClipOutcome::Dissected);

    let wedge = clip.convert_to_mesh().unwrap();
    assert!(wedge.is_closed());
    assert_relative_eq!(wedge.volume(), 0.5, epsilon = 1e-9);
    for v in wedge.vertices() {
        assert!(v.x + v.y >= -CLIP_EPSILON);
    }
}

// =============================================================================
// SEQUENCES
// =============================================================================

#[test]
fn test_three_planes_leave_an_octant() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    for normal in [DVec3::X, DVec3::Y, DVec3::Z] {
        assert_eq!(
            clip.clip_once(&Plane::new(normal, 0.0)).unwrap(),
            ClipOutcome::Dissected
        );
    }

    let octant = clip.convert_to_mesh().unwrap();
    assert!(octant.is_closed());
    assert_relative_eq!(octant.volume(), 0.125, epsilon = 1e-9);

    let (min, max) = octant.bounding_box();
    assert!(min.abs_diff_eq(DVec3::ZERO, 1e-9));
    assert!(max.abs_diff_eq(DVec3::splat(0.5), 1e-9));
}

#[test]
fn test_repeated_plane_is_visible() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    let plane = Plane::new(DVec3::new(0.2, -0.4, 1.0), 0.1);
    assert_eq!(clip.clip_once(&plane).unwrap(), ClipOutcome::Dissected);
    assert_eq!(clip.clip_once(&plane).unwrap(), ClipOutcome::Visible);
    assert!(clip.convert_to_mesh().unwrap().is_closed());
}

#[test]
fn test_opposite_plane_after_cut_is_invisible() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    clip.clip_once(&Plane::new(DVec3::X, 0.0)).unwrap();
    let outcome = clip.clip_once(&Plane::new(DVec3::NEG_X, 0.25)).unwrap();
    assert_eq!(outcome, ClipOutcome::Invisible);
}

#[test]
fn test_thin_slab() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    clip.clip_once(&Plane::new(DVec3::X, 0.2)).unwrap();
    clip.clip_once(&Plane::new(DVec3::NEG_X, -0.3)).unwrap();

    let slab = clip.convert_to_mesh().unwrap();
    assert!(slab.is_closed());
    assert_relative_eq!(slab.volume(), 0.1, epsilon = 1e-9);
}

#[test]
fn test_oblique_cuts_stay_closed() {
    let source = unit_cube();
    let mut clip = ClipMesh::new(&source);
    let planes = [
        Plane::new(DVec3::new(1.0, 1.0, 1.0), 0.1),
        Plane::new(DVec3::new(-1.0, 0.5, 0.2), -0.3),
        Plane::new(DVec3::new(0.3, -1.0, 0.7), -0.2),
    ];
    for plane in &planes {
        clip.clip_once(plane).unwrap();
    }

    let piece = clip.convert_to_mesh().unwrap();
    assert!(piece.is_closed());
    assert!(piece.volume() > 0.0);
    for v in piece.vertices() {
        for plane in &planes {
            assert!(plane.signed_distance(*v) >= -CLIP_EPSILON);
        }
    }
}

// =============================================================================
// FACE CLOSING INTERNALS
// =============================================================================

fn bare_clip(vertex_count: usize, edges: Vec<CEdge>, faces: Vec<BTreeSet<usize>>) -> ClipMesh {
    ClipMesh {
        vertices: (0..vertex_count)
            .map(|i| CVertex::new(DVec3::splat(i as f64)))
            .collect(),
        edges,
        faces: faces
            .into_iter()
            .map(|edges| CFace {
                normal: DVec3::Z,
                edges,
                visible: true,
            })
            .collect(),
        epsilon: CLIP_EPSILON,
    }
}

#[test]
fn test_duplicate_cap_edges_merge() {
    let mut clip = bare_clip(
        2,
        vec![CEdge::new(0, 1, [0, 2]), CEdge::new(1, 0, [1, 2])],
        vec![
            BTreeSet::from([0]),
            BTreeSet::from([1]),
            BTreeSet::from([0, 1]),
        ],
    );

    clip.merge_duplicate_cap_edges(2).unwrap();

    assert!(clip.faces[2].edges.is_empty());
    assert_eq!(clip.faces[1].edges, BTreeSet::from([0]));
    assert_eq!(clip.edges[0].faces, [0, 1]);
    assert!(!clip.edges[1].visible);
}

#[test]
fn test_triplicate_cap_edge_fails() {
    let mut clip = bare_clip(
        2,
        vec![
            CEdge::new(0, 1, [0, 3]),
            CEdge::new(0, 1, [1, 3]),
            CEdge::new(0, 1, [2, 3]),
        ],
        vec![
            BTreeSet::from([0]),
            BTreeSet::from([1]),
            BTreeSet::from([2]),
            BTreeSet::from([0, 1, 2]),
        ],
    );

    assert_eq!(
        clip.merge_duplicate_cap_edges(3),
        Err(ClipError::DuplicateEdgeOverflow { v0: 0, v1: 1 })
    );
}

#[test]
fn test_branching_boundary_is_ambiguous() {
    let mut clip = bare_clip(
        4,
        vec![
            CEdge::new(0, 1, [0, 1]),
            CEdge::new(0, 2, [0, 1]),
            CEdge::new(0, 3, [0, 1]),
        ],
        vec![BTreeSet::from([0, 1, 2]), BTreeSet::new()],
    );

    assert_eq!(
        clip.open_polyline(0, &[0, 1, 2]),
        Err(ClipError::AmbiguousBoundary { face: 0 })
    );
}

#[test]
fn test_open_polyline_endpoints() {
    let mut clip = bare_clip(
        3,
        vec![CEdge::new(0, 1, [0, 1]), CEdge::new(1, 2, [0, 1])],
        vec![BTreeSet::from([0, 1]), BTreeSet::new()],
    );

    assert_eq!(clip.open_polyline(0, &[0, 1]), Ok(Some((0, 2))));
}

#[test]
fn test_conversion_rejects_open_cycle() {
    let clip = bare_clip(
        4,
        vec![
            CEdge::new(0, 1, [0, 1]),
            CEdge::new(1, 2, [0, 1]),
            CEdge::new(2, 3, [0, 1]),
        ],
        vec![BTreeSet::from([0, 1, 2])],
    );

    assert_eq!(
        clip.convert_to_mesh(),
        Err(ClipError::OpenCycle { face: 0 })
    );
}
