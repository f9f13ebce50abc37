//! Physics module for collision geometry
//!
//! Provides the exact geometric predicates used by collaborators for
//! narrow-phase tests, and the bounding-box seam consumed by the broad-phase
//! quadtree in [`crate::spatial`].

pub mod collision;

pub use collision::{Bounded, Poly2, Rect2, Shape};
