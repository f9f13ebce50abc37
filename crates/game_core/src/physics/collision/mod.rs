//! Collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - Axis-aligned rectangles and polygons on integer coordinates
//! - [`shape`] - The [`Bounded`] seam and the combined [`Shape`] type
//!
//! # Conventions
//!
//! Screen coordinates: x grows to the right, y grows downwards. Rectangles are
//! stored as normalised `min`/`max` corners.

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{Poly2, Rect2};
pub use shape::{Bounded, Shape};
