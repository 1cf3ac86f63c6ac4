//! Input tree data structures.
//!
//! This module provides the binary tree the layout consumes, backed by
//! petgraph's StableGraph, plus the nested serde shape used to receive trees
//! from JavaScript.

mod binary;
mod node;
mod spec;

pub use binary::BinaryTree;
pub use node::{NodeColor, NodeId, Side, TreeNode};
pub use spec::{NodeSpec, SpecValue, TreeInput, TreeSpec};
