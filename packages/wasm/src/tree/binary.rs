//! BinaryTree - input tree structure.
//!
//! The BinaryTree stores the topology using petgraph's StableGraph. Edges run
//! parent → child and carry the [`Side`] they occupy, so a node has at most one
//! outgoing edge per side and at most one incoming edge.

use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use super::node::{NodeColor, NodeId, Side, TreeNode};
use crate::error::TreeError;

/// A binary tree with labelled, optionally colored nodes.
#[derive(Debug, Clone, Default)]
pub struct BinaryTree {
    graph: StableGraph<TreeNode, Side>,
    root: Option<NodeIndex>,
}

impl BinaryTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            root: None,
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Add a detached node. The first node added becomes the root unless
    /// [`set_root`](Self::set_root) is called.
    pub fn add_node(&mut self, value: impl Into<String>, color: Option<NodeColor>) -> NodeId {
        let index = self.graph.add_node(TreeNode::new(value, color));
        if self.root.is_none() {
            self.root = Some(index);
        }
        NodeId(index.index() as u32)
    }

    /// Make `id` the root. The node must not have a parent.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), TreeError> {
        let index = self.index_of(id)?;
        if self.parent_index(index).is_some() {
            return Err(TreeError::AlreadyAttached(id));
        }
        self.root = Some(index);
        Ok(())
    }

    /// Attach `child` under `parent` on the given side.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, side: Side) -> Result<(), TreeError> {
        let parent_index = self.index_of(parent)?;
        let child_index = self.index_of(child)?;

        if self.child_index(parent_index, side).is_some() {
            return Err(TreeError::SideOccupied { parent, side });
        }
        if self.parent_index(child_index).is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if parent_index == child_index || self.reaches(child_index, parent_index) {
            return Err(TreeError::Cycle { parent, child });
        }
        if self.root == Some(child_index) {
            return Err(TreeError::RootAsChild(child));
        }

        self.graph.add_edge(parent_index, child_index, side);
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The root node, if the tree is non-empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root.map(|index| NodeId(index.index() as u32))
    }

    /// Get a node's payload.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.graph.node_weight(NodeIndex::new(id.0 as usize))
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Side::Left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Side::Right)
    }

    /// Get the child on `side`, if any.
    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let index = self.index_of(id).ok()?;
        self.child_index(index, side)
            .map(|child| NodeId(child.index() as u32))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_of(id).ok()?;
        self.parent_index(index)
            .map(|parent| NodeId(parent.index() as u32))
    }

    /// Number of nodes in the tree, including detached ones.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Height of the tree rooted at [`root`](Self::root).
    ///
    /// A leaf has height 1; an inner node is one more than its tallest
    /// present child. Returns `None` for an empty tree.
    pub fn height(&self) -> Option<u32> {
        self.root().map(|root| self.node_height(root))
    }

    /// Height of the subtree rooted at `id`, or 0 for an unknown id.
    ///
    /// Walks with an explicit stack, so arbitrarily deep chains are fine.
    pub fn node_height(&self, id: NodeId) -> u32 {
        let Ok(start) = self.index_of(id) else {
            return 0;
        };
        let mut height = 0;
        let mut stack = vec![(start, 1u32)];
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(
                self.graph
                    .neighbors_directed(index, Direction::Outgoing)
                    .map(|child| (child, depth + 1)),
            );
        }
        height
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex, TreeError> {
        let index = NodeIndex::new(id.0 as usize);
        if self.graph.contains_node(index) {
            Ok(index)
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    fn child_index(&self, index: NodeIndex, side: Side) -> Option<NodeIndex> {
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .find(|edge| *edge.weight() == side)
            .map(|edge| edge.target())
    }

    /// Whether `to` is reachable from `from` along child edges. A node
    /// without children reaches nothing but itself.
    fn reaches(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(from, Direction::Outgoing)
            .next()
            .is_some()
            && has_path_connecting(&self.graph, from, to, None)
    }

    fn parent_index(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
    }
}
