//! Binary tree layout for canvas rendering.
//!
//! This module computes screen-space centers and a shared radius for every
//! node of a binary tree so the renderer can draw non-overlapping circles
//! inside a fixed viewport.

mod config;
mod engine;
mod point;
mod result;

pub use config::{LayoutConfig, Viewport};
pub use engine::LayoutEngine;
pub use point::{Point, PointId};
pub use result::TreeLayout;

use crate::error::Result;
use crate::tree::BinaryTree;

/// Heap index of the root in the flat position table.
pub const ROOT_INDEX: u128 = 0;

/// Deepest tree whose heap indices still fit in a `u128`.
pub const MAX_TREE_HEIGHT: u32 = 127;

/// Heap index of the left child of the node at `index`.
#[inline]
pub const fn left_index(index: u128) -> u128 {
    2 * index + 1
}

/// Heap index of the right child of the node at `index`.
#[inline]
pub const fn right_index(index: u128) -> u128 {
    2 * index + 2
}

/// Lay out `tree` inside `viewport`.
pub fn layout_tree(tree: &BinaryTree, viewport: Viewport, config: &LayoutConfig) -> Result<TreeLayout> {
    LayoutEngine::new(tree, viewport, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::tree::NodeSpec;

    #[test]
    fn test_heap_index_formula() {
        assert_eq!(left_index(ROOT_INDEX), 1);
        assert_eq!(right_index(ROOT_INDEX), 2);
        assert_eq!(right_index(left_index(ROOT_INDEX)), 4);
        assert_eq!(left_index(right_index(ROOT_INDEX)), 5);
    }

    #[test]
    fn test_deepest_index_fits() {
        // Rightmost node at depth MAX_TREE_HEIGHT - 1.
        let mut index = ROOT_INDEX;
        for _ in 1..MAX_TREE_HEIGHT {
            index = right_index(index);
        }
        assert_eq!(index, u128::MAX / 2 - 1);
    }

    #[test]
    fn test_layout_tree_is_deterministic() {
        let spec = NodeSpec::leaf("4")
            .with_left(NodeSpec::leaf("2").with_left(NodeSpec::leaf("1")).with_right(NodeSpec::leaf("3")))
            .with_right(NodeSpec::leaf("6").with_left(NodeSpec::leaf("5")));
        let tree = BinaryTree::from_spec(&spec).unwrap();
        let config = LayoutConfig::default();

        let first = layout_tree(&tree, Viewport::new(800.0, 600.0), &config).unwrap();
        let second = layout_tree(&tree, Viewport::new(800.0, 600.0), &config).unwrap();
        assert_eq!(first.points(), second.points());
        assert_eq!(first.restarts(), second.restarts());
    }

    #[test]
    fn test_layout_tree_rejects_bad_viewport() {
        let tree = BinaryTree::from_spec(&NodeSpec::leaf("x")).unwrap();
        let result = layout_tree(&tree, Viewport::new(-5.0, 600.0), &LayoutConfig::default());
        assert!(matches!(result, Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn test_single_node_layout() {
        let tree = BinaryTree::from_spec(&NodeSpec::leaf("only")).unwrap();
        let layout = layout_tree(&tree, Viewport::new(500.0, 400.0), &LayoutConfig::default()).unwrap();

        assert_eq!(layout.len(), 1);
        let root = layout.root().unwrap();
        assert_eq!(root.value, "only");
        assert!((root.x - 250.0).abs() < 1e-3);
        assert!((root.y - 20.0).abs() < 1e-3);
        assert!(root.left.is_none() && root.right.is_none() && root.parent.is_none());
    }
}
