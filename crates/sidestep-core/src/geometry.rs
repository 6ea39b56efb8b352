//! Geometric primitives for evasive control placement.
//!
//! This module provides the small set of types the placement engine reasons
//! about: positions of the movable control, sizes of hosted elements, and the
//! axis-aligned rectangles that bound the legal placement area and the
//! protected regions.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in host space (the control's top-left corner)
//! - [`Size`] - Width and height of a hosted element
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Sidestep uses the screen coordinate system of the hosting layer:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the container at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::Deserialize;

/// A 2D point in host coordinate space.
///
/// # Examples
///
/// ```
/// # use sidestep_core::geometry::Point;
/// let current = Point::new(700.0, 500.0);
/// let next = Point::new(400.0, 100.0);
///
/// assert_eq!(current.distance(next), 500.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean length of the vector from the origin to this point
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Places an element of `size` with its top-left corner at this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Width and height of a hosted element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if neither dimension is negative or NaN
    pub fn is_valid(self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Deserializes from the `{ left, top, right, bottom }` form reported by
/// hosting layers for element bounding boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Bounds {
    #[serde(rename = "left")]
    min_x: f32,
    #[serde(rename = "top")]
    min_y: f32,
    #[serde(rename = "right")]
    max_x: f32,
    #[serde(rename = "bottom")]
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from its four edges.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sidestep_core::geometry::Bounds;
    /// let accept = Bounds::from_edges(300.0, 50.0, 380.0, 90.0);
    /// assert_eq!(accept.width(), 80.0);
    /// assert_eq!(accept.height(), 40.0);
    /// ```
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min_x: left,
            min_y: top,
            max_x: right,
            max_y: bottom,
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

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Length of the diagonal from the top-left to the bottom-right corner
    pub fn diagonal(self) -> f32 {
        self.width().hypot(self.height())
    }

    /// Returns true if the minimum edges do not exceed the maximum edges
    pub fn is_well_formed(self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Returns true if the bounds have positive extent along either axis
    pub fn has_area_or_span(self) -> bool {
        self.max_x > self.min_x || self.max_y > self.min_y
    }

    /// Returns the four corners in the order top-left, bottom-left,
    /// top-right, bottom-right.
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
        ]
    }

    /// Returns true if `point` lies inside or on the edge of the bounds
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Clamps `point` into the bounds, axis by axis.
    ///
    /// The bounds must be well formed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sidestep_core::geometry::{Bounds, Point};
    /// let legal = Bounds::from_edges(12.0, 12.0, 388.0, 288.0);
    /// let clamped = legal.clamp_point(Point::new(700.0, 5.0));
    /// assert_eq!(clamped, Point::new(388.0, 12.0));
    /// ```
    pub fn clamp_point(self, point: Point) -> Point {
        Point::new(
            point.x.max(self.min_x).min(self.max_x),
            point.y.max(self.min_y).min(self.max_y),
        )
    }

    /// Returns true if the interiors of the two bounds overlap.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(self, other: Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Expands the bounds by adding insets.
    ///
    /// This decreases the minimum coordinates by left/top insets and increases
    /// the maximum coordinates by right/bottom insets.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }

    /// Merges two bounds into the smallest bounds containing both
    pub fn merge(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}
