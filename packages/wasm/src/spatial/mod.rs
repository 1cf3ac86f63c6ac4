//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index over laid-out points
//! for hit testing and overlap audits.

mod rtree;

pub use rtree::SpatialIndex;
