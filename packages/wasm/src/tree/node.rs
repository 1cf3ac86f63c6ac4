//! Node type and related structures.
//!
//! Nodes are the vertices of the input binary tree. Each node has:
//! - A stable unique identifier
//! - A displayable value (the label drawn inside the circle)
//! - An optional red/black color tag, consumed only by the renderer

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier.
///
/// It wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Red-black tree color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    Red,
    Black,
}

/// Which child slot an edge occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Payload stored for every tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Label drawn inside the node circle.
    pub value: String,
    /// Optional color tag.
    pub color: Option<NodeColor>,
}

impl TreeNode {
    pub fn new(value: impl Into<String>, color: Option<NodeColor>) -> Self {
        Self {
            value: value.into(),
            color,
        }
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Some(NodeColor::Red)
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Some(NodeColor::Black)
    }
}
