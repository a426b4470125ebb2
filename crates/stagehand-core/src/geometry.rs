//! Geometric primitives for diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in stage space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//! - [`Segment`] - A straight connector between two points
//!
//! # Coordinate System
//!
//! Stagehand uses the same coordinate system as SVG and the renderers that
//! consume its output:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The stage origin is the top-left corner; every laid-out element lies in the
//! positive quadrant.

use serde::{Deserialize, Serialize};

/// A 2D point in stage coordinates.
///
/// # Examples
///
/// ```
/// # use stagehand_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(5.0, 5.0);
///
/// let sum = a.add_point(b);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Calculates the Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Creates a square size with equal sides.
    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size grown by the given insets
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Length of the diagonal.
    pub fn diagonal(self) -> f32 {
        self.width.hypot(self.height)
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates zero-sized bounds located at a single point.
    pub fn degenerate(point: Point) -> Self {
        Self::new_from_top_left(point, Size::default())
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stagehand_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let b = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Returns true when the interiors of the two bounds overlap.
    ///
    /// Boxes that only touch along an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stagehand_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Returns true when `other` lies entirely inside these bounds, within `tolerance`.
    pub fn contains(&self, other: &Self, tolerance: f32) -> bool {
        other.min_x >= self.min_x - tolerance
            && other.min_y >= self.min_y - tolerance
            && other.max_x <= self.max_x + tolerance
            && other.max_y <= self.max_y + tolerance
    }
}

/// Padding with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Tests whether two segments cross at an interior point of both.
    ///
    /// Solves `start + t * (end - start) = other.start + u * (other.end - other.start)`
    /// and reports a crossing only when both `t` and `u` lie strictly inside
    /// `(0, 1)`. Parallel and collinear segments never cross, and neither do
    /// segments that merely touch at an endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stagehand_core::geometry::{Point, Segment};
    /// let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    /// let b = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
    /// let c = Segment::new(Point::new(10.0, 10.0), Point::new(20.0, 0.0));
    ///
    /// assert!(a.crosses(&b));
    /// assert!(!a.crosses(&c));
    /// ```
    pub fn crosses(&self, other: &Segment) -> bool {
        let r = self.end.sub_point(self.start);
        let s = other.end.sub_point(other.start);
        let denominator = cross(r, s);
        if denominator.abs() <= f32::EPSILON {
            return false;
        }

        let offset = other.start.sub_point(self.start);
        let t = cross(offset, s) / denominator;
        let u = cross(offset, r) / denominator;

        t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0
    }
}

/// Z component of the 2D cross product.
fn cross(a: Point, b: Point) -> f32 {
    a.x * b.y - a.y * b.x
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Intersection is symmetric.
    fn check_intersects_is_symmetric(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b1.intersects(&b2), b2.intersects(&b1));
        Ok(())
    }

    /// Merged bounds contain both inputs.
    fn check_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);
        prop_assert!(merged.contains(&b1, 0.001));
        prop_assert!(merged.contains(&b2, 0.001));
        Ok(())
    }

    /// Center and size recover the original bounds.
    fn check_center_roundtrip(bounds: Bounds) -> Result<(), TestCaseError> {
        let rebuilt = Bounds::new_from_center(bounds.center(), bounds.to_size());
        prop_assert!(approx_eq!(f32, rebuilt.min_x(), bounds.min_x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, rebuilt.min_y(), bounds.min_y(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, rebuilt.max_x(), bounds.max_x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, rebuilt.max_y(), bounds.max_y(), epsilon = 0.01));
        Ok(())
    }

    /// Segment crossing is symmetric and segments sharing an endpoint never cross.
    fn check_crossing_symmetry(a: Point, b: Point, c: Point) -> Result<(), TestCaseError> {
        let first = Segment::new(a, b);
        let second = Segment::new(b, c);
        prop_assert!(!first.crosses(&second));

        let diagonal = Segment::new(a, c);
        prop_assert_eq!(first.crosses(&diagonal), diagonal.crosses(&first));
        Ok(())
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_intersects_is_symmetric(b1, b2)?;
        }

        #[test]
        fn merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_contains_both(b1, b2)?;
        }

        #[test]
        fn center_roundtrip(bounds in bounds_strategy()) {
            check_center_roundtrip(bounds)?;
        }

        #[test]
        fn crossing_symmetry(a in point_strategy(), b in point_strategy(), c in point_strategy()) {
            check_crossing_symmetry(a, b, c)?;
        }
    }
}
