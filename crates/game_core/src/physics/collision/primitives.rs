//! Primitive collision shapes and intersection algorithms
//!
//! Provides axis-aligned rectangles and simple polygons with exact integer
//! predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::foundation::math::{orientation, segments_intersect, Point2i, Vec2i};
use crate::spatial::SpatialError;

/// An axis-aligned rectangle defined by two corner points
///
/// Corners are normalised on construction so that `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect2 {
    /// Top-left corner (smallest coordinates)
    pub min: Point2i,
    /// Bottom-right corner (largest coordinates)
    pub max: Point2i,
}

impl Rect2 {
    /// Creates a rectangle from the corner coordinates `(x1, y1)` and `(x2, y2)`
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::from_corners(Point2i::new(x1, y1), Point2i::new(x2, y2))
    }

    /// Creates a rectangle from any two opposite corners
    pub fn from_corners(a: Point2i, b: Point2i) -> Self {
        Self {
            min: Point2i::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2i::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from its top-left corner and size
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Smallest rectangle containing every point
    ///
    /// Returns `None` for an empty iterator.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2i>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut rect = Self::from_corners(first, first);
        for p in points {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    /// Left edge
    pub fn x(&self) -> i32 {
        self.min.x
    }

    /// Top edge
    pub fn y(&self) -> i32 {
        self.min.y
    }

    /// Horizontal extent
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    /// Vertical extent
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Area in square units
    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    /// Whether the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Center point, truncated towards the top-left
    pub fn center(&self) -> Point2i {
        Point2i::new(self.min.x + self.width() / 2, self.min.y + self.height() / 2)
    }

    /// Half-open point containment: min edges inclusive, max edges exclusive
    pub fn contains_point(&self, p: Point2i) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Closed point containment, including every edge
    pub fn covers_point(&self, p: Point2i) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closed overlap test, counting shared edges and corners
    pub fn covers_any(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Whether `other` lies entirely within this rectangle (shared edges allowed)
    pub fn contains(&self, other: &Self) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Whether the interiors overlap
    ///
    /// Rectangles that only share an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Overlapping area of two rectangles, if their interiors intersect
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        ))
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec2i) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The four quarter regions in NE, SE, SW, NW order
    ///
    /// Halving uses integer division, so odd extents leave the extra unit in
    /// the eastern and southern quadrants.
    pub fn quadrants(&self) -> [Self; 4] {
        let (x, y) = (self.min.x, self.min.y);
        let (w, h) = (self.width(), self.height());
        let (mx, my) = (x + w / 2, y + h / 2);
        [
            Self::new(mx, y, x + w, my),
            Self::new(mx, my, x + w, y + h),
            Self::new(x, my, mx, y + h),
            Self::new(x, y, mx, my),
        ]
    }

    /// Corner points in clockwise screen order starting at the top-left
    pub fn corners(&self) -> [Point2i; 4] {
        [
            self.min,
            Point2i::new(self.max.x, self.min.y),
            self.max,
            Point2i::new(self.min.x, self.max.y),
        ]
    }
}

impl fmt::Display for Rect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// A simple polygon given by its vertices in order
///
/// Either winding is accepted. The bounding box is cached on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly2 {
    vertices: Vec<Point2i>,
    bounds: Rect2,
}

impl Poly2 {
    /// Creates a polygon, rejecting fewer than three vertices
    pub fn new<I>(vertices: I) -> Result<Self, SpatialError>
    where
        I: IntoIterator<Item = Point2i>,
    {
        let vertices: Vec<Point2i> = vertices.into_iter().collect();
        if vertices.len() < 3 {
            return Err(SpatialError::DegeneratePolygon {
                vertices: vertices.len(),
            });
        }
        let bounds = Rect2::enclosing(vertices.iter().copied())
            .ok_or(SpatialError::DegeneratePolygon { vertices: 0 })?;
        Ok(Self { vertices, bounds })
    }

    /// Creates a polygon from `(x, y)` pairs
    pub fn from_coords(coords: &[(i32, i32)]) -> Result<Self, SpatialError> {
        Self::new(coords.iter().map(|&(x, y)| Point2i::new(x, y)))
    }

    /// The rectangle as a four-vertex polygon
    pub fn from_rect(rect: &Rect2) -> Self {
        Self {
            vertices: rect.corners().to_vec(),
            bounds: *rect,
        }
    }

    /// Polygon vertices in order
    pub fn vertices(&self) -> &[Point2i] {
        &self.vertices
    }

    /// Cached axis-aligned bounds
    pub fn bounds(&self) -> Rect2 {
        self.bounds
    }

    /// Iterator over edges as `(start, end)` pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Point2i, Point2i)> + '_ {
        self.vertices
            .iter()
            .copied()
            .zip(self.vertices.iter().copied().cycle().skip(1))
    }

    /// Enclosed area using the shoelace formula
    pub fn area(&self) -> f64 {
        let twice: i64 = self
            .edges()
            .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let twice = twice.abs() as f64;
        twice / 2.0
    }

    /// Closed point containment: points on an edge count as inside
    pub fn contains_point(&self, p: Point2i) -> bool {
        if !self.bounds.covers_point(p) {
            return false;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if orientation(a, b, p) == 0 && Rect2::from_corners(a, b).covers_point(p) {
                return true;
            }
            // Even-odd crossing test on a horizontal ray towards +x
            if (a.y > p.y) != (b.y > p.y) {
                let t_num = i64::from(p.y) - i64::from(a.y);
                let dy = i64::from(b.y) - i64::from(a.y);
                let dx = i64::from(b.x) - i64::from(a.x);
                // Crossing x = a.x + dx * t_num / dy, compared without division
                let lhs = (i64::from(p.x) - i64::from(a.x)) * dy;
                let rhs = dx * t_num;
                let crosses = if dy > 0 { lhs < rhs } else { lhs > rhs };
                if crosses {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Exact polygon overlap, touching boundaries included
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.bounds.covers_any(&other.bounds) {
            return false;
        }
        for (a, b) in self.edges() {
            for (c, d) in other.edges() {
                if segments_intersect(a, b, c, d) {
                    return true;
                }
            }
        }
        // No edge crossings: either disjoint or one inside the other
        self.contains_point(other.vertices[0]) || other.contains_point(self.vertices[0])
    }

    /// Exact overlap with a rectangle, touching boundaries included
    pub fn intersects_rect(&self, rect: &Rect2) -> bool {
        self.intersects(&Self::from_rect(rect))
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec2i) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
            bounds: self.bounds.translated(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Poly2 {
        Poly2::from_coords(&[(0, 0), (10, 0), (0, 10)]).unwrap()
    }

    #[test]
    fn test_rect_normalises_corners() {
        let rect = Rect2::new(10, 20, 0, 5);
        assert_eq!(rect.min, Point2i::new(0, 5));
        assert_eq!(rect.max, Point2i::new(10, 20));
        assert_eq!(rect.width(), 10);
        assert_eq!(rect.height(), 15);
        assert_eq!(rect.area(), 150);
    }

    #[test]
    fn test_rect_point_containment_is_half_open() {
        let rect = Rect2::new(0, 0, 10, 10);
        assert!(rect.contains_point(Point2i::new(0, 0)));
        assert!(rect.contains_point(Point2i::new(9, 9)));
        assert!(!rect.contains_point(Point2i::new(10, 5)));
        assert!(rect.covers_point(Point2i::new(10, 10)));
    }

    #[test]
    fn test_rect_containment_allows_shared_edges() {
        let outer = Rect2::new(0, 0, 100, 100);
        assert!(outer.contains(&Rect2::new(0, 0, 50, 50)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect2::new(90, 90, 110, 95)));
    }

    #[test]
    fn test_rect_intersection_excludes_touching() {
        let a = Rect2::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect2::new(5, 5, 15, 15)));
        assert!(!a.intersects(&Rect2::new(10, 0, 20, 10)));
        assert!(a.covers_any(&Rect2::new(10, 0, 20, 10)));
        assert_eq!(
            a.intersection(&Rect2::new(5, 5, 15, 15)),
            Some(Rect2::new(5, 5, 10, 10))
        );
    }

    #[test]
    fn test_quadrant_layout() {
        let [ne, se, sw, nw] = Rect2::new(0, 0, 640, 480).quadrants();
        assert_eq!(ne, Rect2::new(320, 0, 640, 240));
        assert_eq!(se, Rect2::new(320, 240, 640, 480));
        assert_eq!(sw, Rect2::new(0, 240, 320, 480));
        assert_eq!(nw, Rect2::new(0, 0, 320, 240));
    }

    #[test]
    fn test_quadrants_truncate_odd_extents() {
        let [ne, _, sw, nw] = Rect2::new(1, 1, 6, 4).quadrants();
        // w = 5, h = 3: halves are 2 and 1
        assert_eq!(nw, Rect2::new(1, 1, 3, 2));
        assert_eq!(ne, Rect2::new(3, 1, 6, 2));
        assert_eq!(sw, Rect2::new(1, 2, 3, 4));
    }

    #[test]
    fn test_polygon_needs_three_vertices() {
        let err = Poly2::from_coords(&[(0, 0), (1, 1)]).unwrap_err();
        assert!(matches!(err, SpatialError::DegeneratePolygon { vertices: 2 }));
    }

    #[test]
    fn test_polygon_bounds_and_area() {
        let tri = triangle();
        assert_eq!(tri.bounds(), Rect2::new(0, 0, 10, 10));
        assert_relative_eq!(tri.area(), 50.0);
        assert_relative_eq!(Poly2::from_rect(&Rect2::new(0, 0, 4, 3)).area(), 12.0);
    }

    #[test]
    fn test_polygon_point_containment() {
        let tri = triangle();
        assert!(tri.contains_point(Point2i::new(2, 2)));
        assert!(tri.contains_point(Point2i::new(5, 5)));
        assert!(tri.contains_point(Point2i::new(0, 0)));
        assert!(!tri.contains_point(Point2i::new(8, 8)));
        assert!(!tri.contains_point(Point2i::new(-1, 3)));
    }

    #[test]
    fn test_concave_polygon_containment() {
        // U shape opening upwards
        let u = Poly2::from_coords(&[(0, 0), (3, 0), (3, 8), (6, 8), (6, 0), (9, 0), (9, 10), (0, 10)])
            .unwrap();
        assert!(u.contains_point(Point2i::new(1, 5)));
        assert!(u.contains_point(Point2i::new(8, 5)));
        assert!(!u.contains_point(Point2i::new(4, 4)));
    }

    #[test]
    fn test_polygon_intersections() {
        let tri = triangle();
        let far = tri.translated(Vec2i::new(50, 50));
        let overlapping = tri.translated(Vec2i::new(3, 3));
        assert!(!tri.intersects(&far));
        assert!(tri.intersects(&overlapping));

        let inner = Poly2::from_coords(&[(1, 1), (3, 1), (1, 3)]).unwrap();
        assert!(tri.intersects(&inner));
        assert!(inner.intersects(&tri));

        assert!(tri.intersects_rect(&Rect2::new(4, 4, 20, 20)));
        assert!(!tri.intersects_rect(&Rect2::new(6, 6, 20, 20)));
    }
}
