//! Collision-resolving binary tree layout.
//!
//! Places every node of a binary tree inside a fixed viewport so that no two
//! node circles overlap, while children stay centered below their parent.
//!
//! # Algorithm Overview
//!
//! 1. **Placement (top-down):** The root sits at the horizontal center; each
//!    child is placed one level lower, `x_offset` to the left or right of its
//!    parent. Every point is also recorded in a flat table keyed by its
//!    heap index (root 0, children `2i + 1` / `2i + 2`).
//! 2. **Detection (pre-order):** Before descending into a child, the child is
//!    tested against every other point in the table in index order; the first
//!    overlap found is resolved immediately.
//! 3. **Resolution (bottom-up):** Both colliding points are pulled towards
//!    their parents by re-fanning the parents' subtrees with a narrower
//!    offset. When the spacing is already tight the same narrowing is applied
//!    one level higher first. When a root child is involved the whole layout
//!    is widened instead: `x_offset` doubles and placement starts over.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use super::config::{LayoutConfig, Viewport};
use super::point::{Point, PointId};
use super::result::TreeLayout;
use super::{MAX_TREE_HEIGHT, ROOT_INDEX, left_index, right_index};
use crate::error::{LayoutError, Result};
use crate::tree::{BinaryTree, NodeId, Side};

/// Raised from inside a detection pass when a collision reaches a root child.
/// The pass is abandoned and placement restarts with a wider offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RootWidening;

type Pass = std::result::Result<(), RootWidening>;

/// One level of an upward resolution: for each colliding side, the parent
/// whose subtree gets re-fanned and the offset to apply.
type Frame = [Option<(PointId, f32)>; 2];

/// Layout state for a single tree and viewport.
pub struct LayoutEngine<'a> {
    tree: &'a BinaryTree,
    config: &'a LayoutConfig,
    source_root: NodeId,

    width: f32,
    height: f32,
    center: f32,
    level_height: f32,
    tree_height: u32,
    radius: f32,
    x_offset: f32,

    /// Point arena for the current pass, in placement (pre-order) order.
    points: Vec<Point>,
    /// Heap index → point, rebuilt from scratch on every pass.
    positions: BTreeMap<u128, PointId>,
    root: Option<PointId>,
    restarts: u32,
}

impl<'a> LayoutEngine<'a> {
    /// Derive the layout constants from the viewport and the tree height.
    pub fn new(tree: &'a BinaryTree, viewport: Viewport, config: &'a LayoutConfig) -> Result<Self> {
        let Viewport { width, height } = viewport.validate()?;
        let source_root = tree.root().ok_or(LayoutError::EmptyTree)?;
        let tree_height = tree.node_height(source_root);
        if tree_height > MAX_TREE_HEIGHT {
            return Err(LayoutError::TreeTooDeep {
                height: tree_height,
                max: MAX_TREE_HEIGHT,
            });
        }

        let level_height =
            (height * config.level_height_ratio / tree_height as f32).min(config.max_level_height);

        Ok(Self {
            tree,
            config,
            source_root,
            width,
            height,
            center: width / 2.0,
            level_height,
            tree_height,
            radius: width * config.radius_ratio,
            x_offset: width * config.x_offset_ratio,
            points: Vec::with_capacity(tree.node_count()),
            positions: BTreeMap::new(),
            root: None,
            restarts: 0,
        })
    }

    // =========================================================================
    // Driver
    // =========================================================================

    /// Run placement and collision resolution to completion.
    pub fn run(mut self) -> Result<TreeLayout> {
        self.settle()?;
        Ok(self.into_layout())
    }

    /// Place the tree and resolve collisions, widening and restarting as
    /// often as the configuration allows.
    pub fn settle(&mut self) -> Result<()> {
        loop {
            self.place();
            let Some(root) = self.root else {
                return Ok(());
            };
            trace!(pass = self.restarts, x_offset = self.x_offset, "detecting collisions");

            match self.detect_collisions(root) {
                Ok(()) => return Ok(()),
                Err(RootWidening) => {
                    if self.restarts >= self.config.max_restarts {
                        warn!(restarts = self.restarts, "tree layout did not converge");
                        return Err(LayoutError::LayoutDidNotConverge {
                            restarts: self.restarts,
                        });
                    }
                    self.restarts += 1;
                    self.x_offset *= 2.0;
                    debug!(
                        restarts = self.restarts,
                        x_offset = self.x_offset,
                        "collision at root level, widening layout"
                    );
                }
            }
        }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Discard the previous pass and place every node from the root down.
    /// Does not resolve collisions.
    pub fn place(&mut self) {
        self.points.clear();
        self.positions.clear();
        let top = self.height * self.config.top_margin_ratio;
        let root = self.place_node(self.source_root, self.center, top, ROOT_INDEX, None);
        self.root = Some(root);
    }

    fn place_node(
        &mut self,
        node: NodeId,
        x: f32,
        y: f32,
        index: u128,
        parent: Option<PointId>,
    ) -> PointId {
        let id = PointId(self.points.len() as u32);
        let value = self
            .tree
            .node(node)
            .map(|n| n.value.clone())
            .unwrap_or_default();
        self.points.push(Point::new(x, y, self.radius, value, node, parent));
        self.positions.insert(index, id);

        if let Some(left) = self.tree.left(node) {
            let child = self.place_node(
                left,
                x - self.x_offset,
                y + self.level_height,
                left_index(index),
                Some(id),
            );
            self.points[id.index()].left = Some(child);
        }
        if let Some(right) = self.tree.right(node) {
            let child = self.place_node(
                right,
                x + self.x_offset,
                y + self.level_height,
                right_index(index),
                Some(id),
            );
            self.points[id.index()].right = Some(child);
        }
        id
    }

    // =========================================================================
    // Detection
    // =========================================================================

    fn detect_collisions(&mut self, point: PointId) -> Pass {
        for side in [Side::Left, Side::Right] {
            let Some(child) = self.points[point.index()].child(side) else {
                continue;
            };
            if let Some((first, second)) = self.detect_collision(child) {
                self.resolve_collisions(first, second)?;
            }
            self.detect_collisions(child)?;
        }
        Ok(())
    }

    /// First point in heap-index order that overlaps `point`, paired as
    /// `(other, point)`.
    fn detect_collision(&self, point: PointId) -> Option<(PointId, PointId)> {
        let target = &self.points[point.index()];
        self.positions
            .values()
            .copied()
            .filter(|&other| other != point)
            .find(|&other| self.points[other.index()].collides_with(target))
            .map(|other| (other, point))
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Narrow the spacing around a colliding pair.
    ///
    /// Frames are collected walking upwards while the spacing stays tight,
    /// then applied from the topmost frame down. A side whose point has no
    /// parent (the root itself) contributes nothing.
    fn resolve_collisions(&mut self, first: PointId, second: PointId) -> Pass {
        debug!(%first, %second, "resolving collision");
        let min_offset = self.radius * 2.0 + self.config.spacing_margin;
        let mut frames: Vec<Frame> = Vec::new();
        let mut pair = [Some(first), Some(second)];

        loop {
            let mut frame: Frame = [None, None];
            let mut tight = false;
            for (slot, point) in pair.iter().enumerate() {
                let Some(point) = *point else { continue };
                let current = &self.points[point.index()];
                let Some(parent) = current.parent else { continue };
                let distance = (current.x - self.points[parent.index()].x).abs();
                frame[slot] = Some((parent, (distance / 2.0).min(min_offset)));
                tight |= distance <= min_offset;
            }

            if pair.iter().flatten().any(|&point| self.is_root_child(point)) {
                return Err(RootWidening);
            }

            frames.push(frame);
            if !tight {
                break;
            }
            pair = frame.map(|entry| entry.map(|(parent, _)| parent));
        }

        for frame in frames.iter().rev() {
            for &(parent, offset) in frame.iter().flatten() {
                self.reduce_child_distance(parent, offset);
            }
        }
        Ok(())
    }

    /// Re-fan the whole subtree below `point`: every left child sits
    /// `distance` left of its parent and every right child `distance` right,
    /// at every depth.
    pub fn reduce_child_distance(&mut self, point: PointId, distance: f32) {
        let (x, left, right) = {
            let current = &self.points[point.index()];
            (current.x, current.left, current.right)
        };
        if let Some(left) = left {
            self.points[left.index()].x = x - distance;
            self.reduce_child_distance(left, distance);
        }
        if let Some(right) = right {
            self.points[right.index()].x = x + distance;
            self.reduce_child_distance(right, distance);
        }
    }

    /// Whether `point` is the root's left or right child. False before the
    /// first placement.
    pub fn is_root_child(&self, point: PointId) -> bool {
        self.root.is_some_and(|root| {
            let root = &self.points[root.index()];
            root.left == Some(point) || root.right == Some(point)
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn root(&self) -> Option<PointId> {
        self.root
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    /// Point stored at a heap index in the flat table.
    pub fn point_at_index(&self, index: u128) -> Option<PointId> {
        self.positions.get(&index).copied()
    }

    pub fn center(&self) -> f32 {
        self.center
    }

    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    pub fn tree_height(&self) -> u32 {
        self.tree_height
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    fn into_layout(self) -> TreeLayout {
        TreeLayout::new(
            self.points,
            self.root,
            self.width,
            self.height,
            self.radius,
            self.level_height,
            self.tree_height,
            self.x_offset,
            self.restarts,
        )
    }
}
