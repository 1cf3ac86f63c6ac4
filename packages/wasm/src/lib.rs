//! Canvas Tree - WASM Module
//!
//! This module computes collision-free layouts for binary trees so they can
//! be drawn as labelled circles connected by arrows on a canvas. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `tree`: Input binary tree using petgraph's StableGraph
//! - `layout`: Placement and collision resolution
//! - `spatial`: R-tree spatial indexing for hit testing and overlap audits
//! - `scene`: Draw list consumed by the canvas renderer

use js_sys::{Float32Array, Reflect};
use wasm_bindgen::prelude::*;

pub mod error;
pub mod layout;
pub mod scene;
pub mod spatial;
pub mod tree;

pub use error::{LayoutError, TreeError};
use layout::{LayoutConfig, MAX_TREE_HEIGHT, PointId, TreeLayout, Viewport, layout_tree};
use scene::Scene;
use tree::{BinaryTree, TreeInput};

/// Sentinel parent slot for the root.
pub const NO_PARENT: u32 = u32::MAX;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// A laid-out tree, ready to draw.
///
/// Point slots are in pre-order: slot 0 is the root, followed by the left
/// subtree and then the right subtree.
#[wasm_bindgen]
pub struct CanvasTreeWasm {
    tree: BinaryTree,
    layout: TreeLayout,
}

#[wasm_bindgen]
impl CanvasTreeWasm {
    /// Lay out a tree with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `tree` - `{ root: node }` or a bare node, where a node is
    ///   `{ value, left?, right?, color?, isRed?, isBlack? }`
    /// * `width` - Viewport width in CSS pixels
    /// * `height` - Viewport height in CSS pixels
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(tree: JsValue, width: f32, height: f32) -> std::result::Result<CanvasTreeWasm, JsError> {
        Self::compute_with(tree, width, height, &LayoutConfig::default())
    }

    /// Lay out a tree, allowing at most `max_restarts` root-widening restarts.
    #[wasm_bindgen(js_name = computeLayoutWithRestarts)]
    pub fn compute_layout_with_restarts(
        tree: JsValue,
        width: f32,
        height: f32,
        max_restarts: u32,
    ) -> std::result::Result<CanvasTreeWasm, JsError> {
        let config = LayoutConfig {
            max_restarts,
            ..Default::default()
        };
        Self::compute_with(tree, width, height, &config)
    }

    /// Number of laid-out points.
    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> u32 {
        self.layout.len() as u32
    }

    /// Radius shared by every node circle.
    pub fn radius(&self) -> f32 {
        self.layout.radius()
    }

    #[wasm_bindgen(js_name = levelHeight)]
    pub fn level_height(&self) -> f32 {
        self.layout.level_height()
    }

    #[wasm_bindgen(js_name = treeHeight)]
    pub fn tree_height(&self) -> u32 {
        self.layout.tree_height()
    }

    #[wasm_bindgen(js_name = xOffset)]
    pub fn x_offset(&self) -> f32 {
        self.layout.x_offset()
    }

    /// Number of root-widening restarts the layout needed.
    pub fn restarts(&self) -> u32 {
        self.layout.restarts()
    }

    /// Point centers as [x0, y0, x1, y1, ...] in slot order.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        Float32Array::from(&interleave_positions(&self.layout)[..])
    }

    /// Parent slot of every point; the root gets `u32::MAX`.
    #[wasm_bindgen(js_name = getParents)]
    pub fn get_parents(&self) -> Vec<u32> {
        parent_slots(&self.layout)
    }

    /// Labels in slot order.
    #[wasm_bindgen(js_name = getLabels)]
    pub fn get_labels(&self) -> std::result::Result<JsValue, JsError> {
        let labels: Vec<&str> = self.layout.points().iter().map(|p| p.value.as_str()).collect();
        Ok(serde_wasm_bindgen::to_value(&labels)?)
    }

    /// Ordered draw list (circles, labels, arrows) plus font size.
    #[wasm_bindgen(js_name = getScene)]
    pub fn get_scene(&self) -> std::result::Result<JsValue, JsError> {
        let scene = Scene::from_layout(&self.layout, &self.tree);
        Ok(serde_wasm_bindgen::to_value(&scene)?)
    }

    /// Bounding box of all circles as [minX, minY, maxX, maxY].
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Float32Array {
        let bounds = self
            .layout
            .bounds()
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
            .unwrap_or_default();
        Float32Array::from(&bounds[..])
    }

    /// Slot of the node circle containing `(x, y)`, if any.
    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u32> {
        self.layout.hit_test(x, y).map(|PointId(slot)| slot)
    }

    /// Number of node pairs whose circles still overlap.
    #[wasm_bindgen(js_name = overlapCount)]
    pub fn overlap_count(&self) -> u32 {
        self.layout.overlapping_pairs().len() as u32
    }
}

impl CanvasTreeWasm {
    fn compute_with(
        tree: JsValue,
        width: f32,
        height: f32,
        config: &LayoutConfig,
    ) -> std::result::Result<CanvasTreeWasm, JsError> {
        let result = check_nesting(&tree)
            .and_then(|()| {
                serde_wasm_bindgen::from_value::<TreeInput>(tree)
                    .map_err(|err| LayoutError::InvalidInput(err.to_string()))
            })
            .and_then(|input| BinaryTree::from_spec(&input.into_root()).map_err(LayoutError::from))
            .and_then(|tree| {
                let layout = layout_tree(&tree, Viewport::new(width, height), config)?;
                Ok(CanvasTreeWasm { tree, layout })
            });

        result.map_err(|err| {
            web_sys::console::warn_1(&JsValue::from_str(&format!("canvas-tree: {err}")));
            JsError::from(err)
        })
    }
}

/// Reject a JS tree nested deeper than [`MAX_TREE_HEIGHT`] before serde
/// recurses into it. Self-referencing objects are caught the same way.
fn check_nesting(input: &JsValue) -> std::result::Result<(), LayoutError> {
    let child = |value: &JsValue, key: &str| {
        Reflect::get(value, &JsValue::from_str(key))
            .ok()
            .filter(JsValue::is_object)
    };

    let mut stack = vec![(input.clone(), 1u32)];
    stack.extend(child(input, "root").map(|root| (root, 1)));
    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_TREE_HEIGHT {
            return Err(LayoutError::TreeTooDeep {
                height: depth,
                max: MAX_TREE_HEIGHT,
            });
        }
        for key in ["left", "right"] {
            stack.extend(child(&node, key).map(|next| (next, depth + 1)));
        }
    }
    Ok(())
}

/// Flatten point centers into [x0, y0, x1, y1, ...].
pub fn interleave_positions(layout: &TreeLayout) -> Vec<f32> {
    let mut positions = Vec::with_capacity(layout.len() * 2);
    for point in layout.points() {
        positions.push(point.x);
        positions.push(point.y);
    }
    positions
}

/// Parent slot per point, [`NO_PARENT`] for the root.
pub fn parent_slots(layout: &TreeLayout) -> Vec<u32> {
    layout
        .points()
        .iter()
        .map(|point| point.parent.map_or(NO_PARENT, |PointId(slot)| slot))
        .collect()
}
