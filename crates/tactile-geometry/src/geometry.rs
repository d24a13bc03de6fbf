//! Geometric primitives: Point, Size, Rect

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A position or a displacement in a 2D coordinate space.
///
/// Touch handling uses the same type for both, the way scene positions and
/// movement vectors are mixed freely when projecting onto a gesture axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Dot product, treating both points as vectors from the origin.
    #[inline]
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector with the same direction, or `ZERO` for a
    /// zero-length (or non-finite) vector.
    pub fn normalized(self) -> Point {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Point::ZERO;
        }
        Point::new(self.x / length, self.y / length)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_product_projects_onto_unit_axis() {
        let movement = Point::new(3.0, -4.0);
        assert_eq!(movement.dot(Point::new(1.0, 0.0)), 3.0);
        assert_eq!(movement.dot(Point::new(0.0, -1.0)), 4.0);
    }

    #[test]
    fn normalized_handles_zero_vector() {
        assert_eq!(Point::ZERO.normalized(), Point::ZERO);
        let unit = Point::new(0.0, 5.0).normalized();
        assert_eq!(unit, Point::new(0.0, 1.0));
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::from_size(Size::new(10.0, 20.0));
        assert!(rect.contains_point(Point::new(10.0, 20.0)));
        assert!(!rect.contains_point(Point::new(10.5, 0.0)));
        assert!(rect.translate(5.0, 5.0).contains(15.0, 25.0));
    }
}
