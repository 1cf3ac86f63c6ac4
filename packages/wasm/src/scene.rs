//! Renderer-agnostic draw list for a finished layout.
//!
//! The canvas front end strokes these shapes in order: each node's circle and
//! label, then its left subtree followed by the arrow into it, then the right
//! subtree and its arrow.

use std::f32::consts::PI;

use serde::Serialize;

use crate::layout::{Point, PointId, TreeLayout};
use crate::tree::{BinaryTree, NodeColor};

pub const RED_FILL: &str = "#FC0D1C";
pub const BLACK_FILL: &str = "#414141";
/// Outline used on filled (colored) nodes.
pub const COLORED_STROKE: &str = "#fff";

const FONT_RATIO: f32 = 0.03;
const LABEL_BASELINE_OFFSET: f32 = 4.0;
const LABEL_MAX_WIDTH: f32 = 20.0;
const ARROW_HEAD_LENGTH: f32 = 5.0;

/// One drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    /// Node circle. `None` fill/stroke means the surface defaults.
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        fill: Option<&'static str>,
        stroke: Option<&'static str>,
    },
    /// Label centered horizontally on `x`, baseline at `y`.
    #[serde(rename_all = "camelCase")]
    Label {
        text: String,
        x: f32,
        y: f32,
        max_width: f32,
    },
    /// Edge from the parent's rim to the child's rim, with a two-stroke head
    /// ending at `to`.
    Arrow {
        from: [f32; 2],
        to: [f32; 2],
        head: [[f32; 2]; 2],
    },
}

/// Ordered shapes plus the font size the labels expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub font_size: f32,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Build the draw list. `tree` supplies the color tags.
    pub fn from_layout(layout: &TreeLayout, tree: &BinaryTree) -> Self {
        let mut scene = Scene {
            font_size: layout.width() * FONT_RATIO,
            shapes: Vec::with_capacity(layout.len() * 3),
        };
        if let Some(root) = layout.root_id() {
            scene.push_point(layout, tree, root);
        }
        scene
    }

    fn push_point(&mut self, layout: &TreeLayout, tree: &BinaryTree, id: PointId) {
        let Some(point) = layout.point(id) else {
            return;
        };

        let color = tree.node(point.node).and_then(|node| node.color);
        let (fill, stroke) = match color {
            Some(NodeColor::Red) => (Some(RED_FILL), Some(COLORED_STROKE)),
            Some(NodeColor::Black) => (Some(BLACK_FILL), Some(COLORED_STROKE)),
            None => (None, None),
        };
        self.shapes.push(Shape::Circle {
            x: point.x,
            y: point.y,
            radius: point.radius,
            fill,
            stroke,
        });
        self.shapes.push(Shape::Label {
            text: point.value.clone(),
            x: point.x,
            y: point.y + LABEL_BASELINE_OFFSET,
            max_width: LABEL_MAX_WIDTH,
        });

        for child in [point.left, point.right].into_iter().flatten() {
            self.push_point(layout, tree, child);
            if let Some(child_point) = layout.point(child) {
                self.shapes.push(arrow(point, child_point));
            }
        }
    }
}

/// Arrow along the center line from `parent`'s rim to `child`'s rim.
fn arrow(parent: &Point, child: &Point) -> Shape {
    let angle = (child.y - parent.y).atan2(child.x - parent.x);
    let (sin, cos) = angle.sin_cos();
    let from = [parent.x + cos * parent.radius, parent.y + sin * parent.radius];
    let to = [child.x - cos * child.radius, child.y - sin * child.radius];

    let barb = |theta: f32| {
        [
            to[0] - ARROW_HEAD_LENGTH * theta.cos(),
            to[1] - ARROW_HEAD_LENGTH * theta.sin(),
        ]
    };
    Shape::Arrow {
        from,
        to,
        head: [barb(angle - PI / 6.0), barb(angle + PI / 6.0)],
    }
}
