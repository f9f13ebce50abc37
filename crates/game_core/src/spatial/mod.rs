//! Spatial partitioning data structures
//!
//! Provides region quadtrees for broad-phase collision detection and
//! rectangle queries in 2D space.

mod quadtree;
pub mod spatial_query;

pub use quadtree::{CollisionPair, Nodes, QuadTree, QuadTreeNode, Quadrant};
pub use spatial_query::{LinearIndex, SpatialQuery};

use crate::physics::collision::Rect2;

/// Spatial structure errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpatialError {
    /// Bounds with zero width or height cannot be partitioned
    #[error("Region {region} has no area")]
    EmptyRegion {
        /// The rejected region
        region: Rect2,
    },

    /// Polygons need at least three vertices
    #[error("Polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon {
        /// Number of vertices supplied
        vertices: usize,
    },
}
