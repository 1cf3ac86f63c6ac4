//! Error types for tree construction and layout.

use crate::tree::{NodeId, Side};

/// Failures while building a [`BinaryTree`](crate::tree::BinaryTree).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("{parent} already has a {side} child")]
    SideOccupied { parent: NodeId, side: Side },
    #[error("{0} already has a parent")]
    AlreadyAttached(NodeId),
    #[error("the root {0} cannot be attached as a child")]
    RootAsChild(NodeId),
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Failures surfaced by [`layout_tree`](crate::layout::layout_tree).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("tree has no root")]
    EmptyTree,
    #[error("tree height {height} exceeds the supported maximum of {max}")]
    TreeTooDeep { height: u32, max: u32 },
    #[error("layout did not converge after {restarts} root-widening restarts")]
    LayoutDidNotConverge { restarts: u32 },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
