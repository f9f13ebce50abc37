//! High-level collision shape abstractions
//!
//! [`Bounded`] is the only thing the broad phase needs from an object: its
//! axis-aligned bounds and a containment test against a region. Exact
//! narrow-phase tests stay with the concrete shapes.

use super::primitives::{Poly2, Rect2};
use crate::foundation::math::Vec2i;

/// Objects that can be placed in a spatial index
pub trait Bounded {
    /// Axis-aligned bounding box in world coordinates
    fn bounding_box(&self) -> Rect2;

    /// Whether the object lies entirely inside `region`
    ///
    /// The default compares bounding boxes, which is exact for rectangles and
    /// for polygons (all vertices inside a rectangle iff their bounds are).
    fn fits_into(&self, region: &Rect2) -> bool {
        region.contains(&self.bounding_box())
    }
}

impl Bounded for Rect2 {
    fn bounding_box(&self) -> Rect2 {
        *self
    }
}

impl Bounded for Poly2 {
    fn bounding_box(&self) -> Rect2 {
        self.bounds()
    }
}

/// Collision shape types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Axis-aligned box
    Rect(Rect2),
    /// Arbitrary simple polygon
    Poly(Poly2),
}

impl Shape {
    /// Exact overlap test
    ///
    /// Box/box pairs use interior overlap like [`Rect2::intersects`]; any pair
    /// involving a polygon also counts touching boundaries.
    pub fn intersects(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => a.intersects(b),
            (Self::Rect(rect), Self::Poly(poly)) | (Self::Poly(poly), Self::Rect(rect)) => {
                poly.intersects_rect(rect)
            }
            (Self::Poly(a), Self::Poly(b)) => a.intersects(b),
        }
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec2i) -> Self {
        match self {
            Self::Rect(rect) => Self::Rect(rect.translated(offset)),
            Self::Poly(poly) => Self::Poly(poly.translated(offset)),
        }
    }
}

impl Bounded for Shape {
    fn bounding_box(&self) -> Rect2 {
        match self {
            Self::Rect(rect) => *rect,
            Self::Poly(poly) => poly.bounds(),
        }
    }
}

impl From<Rect2> for Shape {
    fn from(rect: Rect2) -> Self {
        Self::Rect(rect)
    }
}

impl From<Poly2> for Shape {
    fn from(poly: Poly2) -> Self {
        Self::Poly(poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_into_uses_bounds() {
        let region = Rect2::new(0, 0, 100, 100);
        let inside: Shape = Poly2::from_coords(&[(10, 10), (20, 10), (15, 30)]).unwrap().into();
        let straddling: Shape = Rect2::new(90, 90, 110, 95).into();
        assert!(inside.fits_into(&region));
        assert!(!straddling.fits_into(&region));
    }

    #[test]
    fn test_mixed_shape_intersection() {
        let rect: Shape = Rect2::new(0, 0, 10, 10).into();
        let poly: Shape = Poly2::from_coords(&[(5, 5), (20, 5), (20, 20)]).unwrap().into();
        let far: Shape = Rect2::new(50, 50, 60, 60).into();
        assert!(rect.intersects(&poly));
        assert!(poly.intersects(&rect));
        assert!(!poly.intersects(&far));
    }

    #[test]
    fn test_translation_moves_bounds() {
        let shape: Shape = Rect2::new(0, 0, 10, 10).into();
        let moved = shape.translated(Vec2i::new(5, -5));
        assert_eq!(moved.bounding_box(), Rect2::new(5, -5, 15, 5));
    }
}
