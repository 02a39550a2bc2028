//! Pixel-space geometry primitives shared across the workspace.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in frame pixel coordinates.
///
/// Invariant: `x1 <= x2` and `y1 <= y2`. The constructor normalizes the
/// corner order, so a box built from any two opposite corners is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    /// X coordinate of the top-left corner
    pub x1: i32,
    /// Y coordinate of the top-left corner
    pub y1: i32,
    /// X coordinate of the bottom-right corner
    pub x2: i32,
    /// Y coordinate of the bottom-right corner
    pub y2: i32,
}

impl BoundingBox {
    /// Create a new bounding box from two opposite corners.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// The four corner points, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Area in square pixels.
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Center point (integer division; biased toward the top-left).
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corner_order() {
        let b = BoundingBox::new(200, 150, 100, 50);
        assert_eq!(b, BoundingBox::new(100, 50, 200, 150));
        assert!(b.x1 <= b.x2);
        assert!(b.y1 <= b.y2);
    }

    #[test]
    fn test_corners_clockwise() {
        let b = BoundingBox::new(10, 20, 30, 40);
        assert_eq!(
            b.corners(),
            [
                Point::new(10, 20),
                Point::new(30, 20),
                Point::new(30, 40),
                Point::new(10, 40),
            ]
        );
    }

    #[test]
    fn test_dimensions() {
        let b = BoundingBox::new(0, 0, 4, 8);
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 8);
        assert_eq!(b.area(), 32);
        assert_eq!(b.center(), Point::new(2, 4));
    }

    #[test]
    fn test_degenerate_box_is_valid() {
        let b = BoundingBox::new(5, 5, 5, 5);
        assert_eq!(b.area(), 0);
        assert_eq!(b.corners()[0], Point::new(5, 5));
    }
}
