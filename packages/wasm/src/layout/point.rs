//! Laid-out node positions.

use std::fmt;

use crate::tree::{NodeId, Side};

/// Index of a [`Point`] in the layout arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

impl PointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", self.0)
    }
}

/// Screen-space position of one tree node.
///
/// `left`/`right` mirror the source tree exactly. `parent` is a plain arena
/// index and never owns anything; it is set once when the point is placed.
///
/// Coordinates are `f32`; see [`LayoutConfig::max_restarts`](super::LayoutConfig::max_restarts)
/// for how far repeated widening can push them.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Label copied from the source node.
    pub value: String,
    /// Source node, for color/value lookup by the renderer.
    pub node: NodeId,
    pub left: Option<PointId>,
    pub right: Option<PointId>,
    pub parent: Option<PointId>,
}

impl Point {
    pub fn new(x: f32, y: f32, radius: f32, value: String, node: NodeId, parent: Option<PointId>) -> Self {
        Self {
            x,
            y,
            radius,
            value,
            node,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<PointId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Euclidean distance between the two centers.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Circles overlap when their centers are closer than the sum of radii.
    #[inline]
    pub fn collides_with(&self, other: &Point) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}
