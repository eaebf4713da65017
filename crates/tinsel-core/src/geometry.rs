//! Screen-space geometry in whole pixels.
//!
//! [`Rect`] is half-open: `min` lies inside the rectangle, `max` does not.
//! A rectangle whose `max` is not strictly greater than its `min` on both
//! axes is empty and contains no points.

use crate::math::IVec2;

/// A point or offset on screen.
pub type Point = IVec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const ZERO: Self = Self {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Creates a rectangle from two corners, normalising their order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn from_min_size(min: Point, size: Point) -> Self {
        Self::new(min.x, min.y, min.x + size.x, min.y + size.y)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Point {
        self.max - self.min
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn contains(&self, point: Point) -> bool {
        self.min.x <= point.x
            && point.x < self.max.x
            && self.min.y <= point.y
            && point.y < self.max.y
    }

    pub fn translate(&self, delta: Point) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn inset(&self, amount: Point) -> Self {
        let min = self.min + amount;
        let max = (self.max - amount).max(min);
        Self { min, max }
    }

    /// Smallest rectangle containing both. Empty rectangles are ignored.
    pub fn union(&self, other: Rect) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn intersect(&self, other: Rect) -> Self {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x >= max.x || min.y >= max.y {
            Self::ZERO
        } else {
            Self { min, max }
        }
    }

    /// Moves the rectangle so that its `min` corner sits at `origin`.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self::from_min_size(origin, self.size())
    }
}
