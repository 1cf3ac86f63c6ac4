//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Nearest point within a distance (hit testing)
//! - Points within a radius (overlap audit)

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::layout::PointId;

/// A laid-out point center with its arena id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    pub id: PointId,
    pub x: f32,
    pub y: f32,
}

impl IndexedPoint {
    pub fn new(id: PointId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over point centers.
///
/// Layout points move during collision resolution, so the index is bulk
/// loaded once from the final positions.
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Replace the contents with `(id, x, y)` tuples.
    pub fn rebuild(&mut self, points: &[(PointId, f32, f32)]) {
        let indexed: Vec<_> = points
            .iter()
            .map(|&(id, x, y)| IndexedPoint::new(id, x, y))
            .collect();
        self.tree = RTree::bulk_load(indexed);
    }

    /// Nearest point within `max_distance` of `(x, y)`.
    pub fn nearest_within(&self, x: f32, y: f32, max_distance: f32) -> Option<PointId> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.id)
    }

    /// All points within `radius` of `(x, y)`, boundary included.
    pub fn in_radius(&self, x: f32, y: f32, radius: f32) -> Vec<PointId> {
        self.tree
            .locate_within_distance([x, y], radius * radius)
            .map(|point| point.id)
            .collect()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(points: &[(u32, f32, f32)]) -> SpatialIndex {
        let mut index = SpatialIndex::new();
        let entries: Vec<_> = points.iter().map(|&(id, x, y)| (PointId(id), x, y)).collect();
        index.rebuild(&entries);
        index
    }

    #[test]
    fn test_nearest_within() {
        let index = index(&[(0, 0.0, 0.0), (1, 10.0, 10.0)]);

        assert_eq!(index.nearest_within(0.0, 0.0, 5.0), Some(PointId(0)));
        // Nothing within 1 of (5, 5)
        assert_eq!(index.nearest_within(5.0, 5.0, 1.0), None);
        // Point 0 is ~7.07 from (5, 5)
        assert!(index.nearest_within(5.0, 5.0, 8.0).is_some());
    }

    #[test]
    fn test_in_radius() {
        let index = index(&[(0, 0.0, 0.0), (1, 3.0, 0.0), (2, 10.0, 0.0)]);

        let found = index.in_radius(0.0, 0.0, 5.0);
        assert_eq!(found.len(), 2);
        assert!(found.contains(&PointId(0)));
        assert!(found.contains(&PointId(1)));
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut index = index(&[(0, 0.0, 0.0)]);
        index.rebuild(&[(PointId(1), 1.0, 1.0), (PointId(2), 2.0, 2.0)]);
        assert_eq!(index.in_radius(0.0, 0.0, 100.0).len(), 2);
        assert_eq!(index.nearest_within(0.0, 0.0, 5.0), Some(PointId(1)));
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::default();
        assert_eq!(index.nearest_within(0.0, 0.0, 100.0), None);
        assert!(index.in_radius(0.0, 0.0, 100.0).is_empty());
    }
}
