//! Nested serde input shape for trees coming from JavaScript.
//!
//! Mirrors the object graph a JS binary/red-black tree exposes:
//! `{ value, left?, right?, color?, isRed?, isBlack? }`.

use serde::Deserialize;

use super::binary::BinaryTree;
use super::node::{NodeColor, NodeId, Side};
use crate::error::TreeError;

/// Label value; JS trees commonly store numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    Number(f64),
}

impl SpecValue {
    fn to_label(&self) -> String {
        match self {
            SpecValue::Text(text) => text.clone(),
            // Integral numbers print without a trailing ".0", like JS does.
            SpecValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            SpecValue::Number(n) => n.to_string(),
        }
    }
}

/// One node of a nested tree description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub value: SpecValue,
    #[serde(default)]
    pub color: Option<NodeColor>,
    #[serde(default)]
    pub is_red: bool,
    #[serde(default)]
    pub is_black: bool,
    #[serde(default)]
    pub left: Option<Box<NodeSpec>>,
    #[serde(default)]
    pub right: Option<Box<NodeSpec>>,
}

/// Top-level wrapper accepting `{ root: NodeSpec }`, the shape JS tree
/// containers usually have.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeSpec {
    pub root: NodeSpec,
}

/// Either a container with a `root` field or a bare root node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeInput {
    Container(TreeSpec),
    Root(NodeSpec),
}

impl TreeInput {
    pub fn into_root(self) -> NodeSpec {
        match self {
            TreeInput::Container(spec) => spec.root,
            TreeInput::Root(root) => root,
        }
    }
}

impl NodeSpec {
    /// Leaf with a text label.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: SpecValue::Text(value.into()),
            color: None,
            is_red: false,
            is_black: false,
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, child: NodeSpec) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    pub fn with_right(mut self, child: NodeSpec) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    pub fn with_color(mut self, color: NodeColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Explicit `color` wins over the legacy boolean flags.
    fn resolved_color(&self) -> Option<NodeColor> {
        self.color.or(if self.is_red {
            Some(NodeColor::Red)
        } else if self.is_black {
            Some(NodeColor::Black)
        } else {
            None
        })
    }
}

impl Drop for NodeSpec {
    // Frees descendants from a heap stack instead of recursing.
    fn drop(&mut self) {
        let mut stack: Vec<Box<NodeSpec>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl BinaryTree {
    /// Build a tree from a nested description. Nodes are added in pre-order.
    ///
    /// The description is walked with an explicit stack, so nesting depth
    /// is limited by memory only. Each child is attached as soon as it is
    /// added, while it has no children of its own.
    pub fn from_spec(spec: &NodeSpec) -> Result<Self, TreeError> {
        let mut tree = BinaryTree::new();
        let mut pending: Vec<(&NodeSpec, Option<(NodeId, Side)>)> = vec![(spec, None)];
        let mut root = None;

        while let Some((spec, slot)) = pending.pop() {
            let id = tree.add_node(spec.value.to_label(), spec.resolved_color());
            match slot {
                Some((parent, side)) => tree.attach(parent, id, side)?,
                None => root = Some(id),
            }
            // Right first so the left subtree is popped, and numbered, first.
            if let Some(right) = spec.right.as_deref() {
                pending.push((right, Some((id, Side::Right))));
            }
            if let Some(left) = spec.left.as_deref() {
                pending.push((left, Some((id, Side::Left))));
            }
        }

        if let Some(root) = root {
            tree.set_root(root)?;
        }
        Ok(tree)
    }
}
