//! Finished layout handed to the renderer.

use super::point::{Point, PointId};
use crate::spatial::SpatialIndex;

/// Collision-resolved positions for every node of a tree.
///
/// Points are stored in pre-order (root first, then the left subtree, then
/// the right subtree), so `points()[0]` is the root.
pub struct TreeLayout {
    points: Vec<Point>,
    root: Option<PointId>,
    width: f32,
    height: f32,
    radius: f32,
    level_height: f32,
    tree_height: u32,
    x_offset: f32,
    restarts: u32,
    spatial: SpatialIndex,
}

impl TreeLayout {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        points: Vec<Point>,
        root: Option<PointId>,
        width: f32,
        height: f32,
        radius: f32,
        level_height: f32,
        tree_height: u32,
        x_offset: f32,
        restarts: u32,
    ) -> Self {
        let mut spatial = SpatialIndex::new();
        let entries: Vec<_> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId(i as u32), p.x, p.y))
            .collect();
        spatial.rebuild(&entries);

        Self {
            points,
            root,
            width,
            height,
            radius,
            level_height,
            tree_height,
            x_offset,
            restarts,
            spatial,
        }
    }

    pub fn root(&self) -> Option<&Point> {
        self.root.and_then(|id| self.point(id))
    }

    pub fn root_id(&self) -> Option<PointId> {
        self.root
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    /// All points in pre-order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Radius shared by every point.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    pub fn tree_height(&self) -> u32 {
        self.tree_height
    }

    /// Final parent→child offset used by the last placement pass.
    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    /// Number of root-widening restarts the layout needed.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Point whose circle contains `(x, y)`, if any.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<PointId> {
        self.spatial.nearest_within(x, y, self.radius)
    }

    /// Pairs of points whose circles still overlap, each pair reported once
    /// with the lower id first.
    ///
    /// Resolution is approximate, so this is an audit rather than a guarantee.
    pub fn overlapping_pairs(&self) -> Vec<(PointId, PointId)> {
        let mut pairs = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            let id = PointId(i as u32);
            let mut hits: Vec<PointId> = self
                .spatial
                .in_radius(point.x, point.y, point.radius * 2.0)
                .into_iter()
                .filter(|&other| other > id)
                .filter(|&other| point.collides_with(&self.points[other.index()]))
                .collect();
            hits.sort();
            pairs.extend(hits.into_iter().map(|other| (id, other)));
        }
        pairs
    }

    /// Bounding box of all circles as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        if self.points.is_empty() {
            return None;
        }
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for point in &self.points {
            min_x = min_x.min(point.x - point.radius);
            min_y = min_y.min(point.y - point.radius);
            max_x = max_x.max(point.x + point.radius);
            max_y = max_y.max(point.y + point.radius);
        }
        Some((min_x, min_y, max_x, max_y))
    }
}
