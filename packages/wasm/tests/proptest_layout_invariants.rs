//! Property-based invariant tests for the tree layout.
//!
//! Verifies:
//! 1. Isomorphism: every point has a left/right child iff its node does
//! 2. Height: matches an independent recursive computation on the spec
//! 3. Determinism: two runs over the same input agree exactly
//! 4. Re-fanning: `reduce_child_distance` places every descendant at its
//!    parent's x ∓ d
//! 5. Outcome: a layout either succeeds or reports non-convergence
#![cfg(not(target_arch = "wasm32"))]

use canvas_tree_wasm::LayoutError;
use canvas_tree_wasm::layout::{LayoutConfig, LayoutEngine, Point, PointId, Viewport, layout_tree};
use canvas_tree_wasm::tree::{BinaryTree, NodeId, NodeSpec};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_tree() -> impl Strategy<Value = NodeSpec> {
    let leaf = (0u32..1000).prop_map(|v| NodeSpec::leaf(v.to_string()));
    leaf.prop_recursive(6, 48, 2, |inner| {
        (
            0u32..1000,
            proptest::option::of(inner.clone()),
            proptest::option::of(inner),
        )
            .prop_map(|(v, left, right)| {
                let mut node = NodeSpec::leaf(v.to_string());
                if let Some(left) = left {
                    node = node.with_left(left);
                }
                if let Some(right) = right {
                    node = node.with_right(right);
                }
                node
            })
    })
}

fn arb_viewport() -> impl Strategy<Value = Viewport> {
    (200.0f32..1600.0, 150.0f32..1200.0).prop_map(|(w, h)| Viewport::new(w, h))
}

fn spec_height(spec: &NodeSpec) -> u32 {
    let left = spec.left.as_deref().map(spec_height);
    let right = spec.right.as_deref().map(spec_height);
    1 + left.into_iter().chain(right).max().unwrap_or(0)
}

/// Walk spec and points side by side, asserting matching shape.
fn assert_isomorphic(spec: &NodeSpec, points: &[Point], id: PointId) {
    let point = &points[id.index()];
    assert_eq!(spec.left.is_some(), point.left.is_some());
    assert_eq!(spec.right.is_some(), point.right.is_some());
    if let (Some(left), Some(child)) = (spec.left.as_deref(), point.left) {
        assert_eq!(points[child.index()].parent, Some(id));
        assert_isomorphic(left, points, child);
    }
    if let (Some(right), Some(child)) = (spec.right.as_deref(), point.right) {
        assert_eq!(points[child.index()].parent, Some(id));
        assert_isomorphic(right, points, child);
    }
}

fn collect_points(engine: &LayoutEngine<'_>) -> Vec<Point> {
    (0u32..)
        .map_while(|i| engine.point(PointId(i)).cloned())
        .collect()
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn placement_is_isomorphic(spec in arb_tree(), viewport in arb_viewport()) {
        let tree = BinaryTree::from_spec(&spec).unwrap();
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&tree, viewport, &config).unwrap();
        engine.place();

        let points = collect_points(&engine);
        let root = engine.root().unwrap();
        prop_assert_eq!(points.len(), tree.node_count());
        prop_assert_eq!(points[root.index()].parent, None);
        assert_isomorphic(&spec, &points, root);
    }

    #[test]
    fn settled_layout_is_isomorphic(spec in arb_tree(), viewport in arb_viewport()) {
        let tree = BinaryTree::from_spec(&spec).unwrap();
        match layout_tree(&tree, viewport, &LayoutConfig::default()) {
            Ok(layout) => {
                let root = layout.root_id().unwrap();
                prop_assert_eq!(layout.len(), tree.node_count());
                assert_isomorphic(&spec, layout.points(), root);
                // Resolution only moves points sideways.
                for point in layout.points() {
                    if let Some(parent) = point.parent {
                        let parent = &layout.points()[parent.index()];
                        prop_assert!((point.y - parent.y - layout.level_height()).abs() < 1e-2);
                    }
                }
            }
            Err(err) => prop_assert!(
                matches!(err, LayoutError::LayoutDidNotConverge { .. }),
                "unexpected error: {err}"
            ),
        }
    }

    #[test]
    fn height_matches_recursive_definition(spec in arb_tree()) {
        let tree = BinaryTree::from_spec(&spec).unwrap();
        prop_assert_eq!(tree.height(), Some(spec_height(&spec)));
    }

    #[test]
    fn layout_is_deterministic(spec in arb_tree(), viewport in arb_viewport()) {
        let tree = BinaryTree::from_spec(&spec).unwrap();
        let config = LayoutConfig::default();
        let first = layout_tree(&tree, viewport, &config);
        let second = layout_tree(&tree, viewport, &config);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.points(), b.points());
                prop_assert_eq!(a.restarts(), b.restarts());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "runs disagree on success"),
        }
    }

    #[test]
    fn reduce_child_distance_refans_subtree(
        spec in arb_tree(),
        distance in 1.0f32..200.0,
    ) {
        let tree = BinaryTree::from_spec(&spec).unwrap();
        let config = LayoutConfig::default();
        let mut engine = LayoutEngine::new(&tree, Viewport::new(800.0, 600.0), &config).unwrap();
        engine.place();
        let root = engine.root().unwrap();
        engine.reduce_child_distance(root, distance);

        for point in collect_points(&engine) {
            if let Some(left) = point.left {
                let left = engine.point(left).unwrap();
                prop_assert!((left.x - (point.x - distance)).abs() < 1e-2);
            }
            if let Some(right) = point.right {
                let right = engine.point(right).unwrap();
                prop_assert!((right.x - (point.x + distance)).abs() < 1e-2);
            }
        }
    }
}

#[test]
fn source_nodes_are_referenced_once() {
    let spec = NodeSpec::leaf("a")
        .with_left(NodeSpec::leaf("b"))
        .with_right(NodeSpec::leaf("c").with_left(NodeSpec::leaf("d")));
    let tree = BinaryTree::from_spec(&spec).unwrap();
    let layout = layout_tree(&tree, Viewport::new(800.0, 600.0), &LayoutConfig::default()).unwrap();

    let mut nodes: Vec<NodeId> = layout.points().iter().map(|p| p.node).collect();
    nodes.sort();
    nodes.dedup();
    assert_eq!(nodes.len(), 4);
    for point in layout.points() {
        assert_eq!(tree.node(point.node).map(|n| n.value.as_str()), Some(point.value.as_str()));
    }
}
