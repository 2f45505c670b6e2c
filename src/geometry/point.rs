use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D value used both as a pixel coordinate `(x, y)` and as a polar line
/// parameter `(rho, theta)`.
///
/// Equality is exact floating-point comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Polar line parameter; `x` holds rho and `y` holds theta.
    #[inline]
    pub const fn rho_theta(rho: f64, theta: f64) -> Self {
        Self { x: rho, y: theta }
    }

    #[inline]
    pub fn rho(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn theta(&self) -> f64 {
        self.y
    }

    /// Truncated integer coordinates.
    #[inline]
    pub fn int_x(&self) -> i64 {
        self.x as i64
    }

    #[inline]
    pub fn int_y(&self) -> i64 {
        self.y as i64
    }

    #[inline]
    pub fn dot(&self, other: &Point2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn squared_norm(&self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    #[inline]
    pub fn distance(&self, other: &Point2d) -> f64 {
        (*self - *other).norm()
    }

    /// Unit vector with the same direction. A zero vector yields NaN components.
    #[inline]
    pub fn normalize(&self) -> Point2d {
        *self * (1.0 / self.norm())
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Point2d {
        *self * factor
    }
}

impl Add for Point2d {
    type Output = Point2d;

    #[inline]
    fn add(self, rhs: Point2d) -> Point2d {
        Point2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2d {
    type Output = Point2d;

    #[inline]
    fn sub(self, rhs: Point2d) -> Point2d {
        Point2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2d {
    type Output = Point2d;

    #[inline]
    fn mul(self, rhs: f64) -> Point2d {
        Point2d::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2d {
    type Output = Point2d;

    #[inline]
    fn neg(self) -> Point2d {
        Point2d::new(-self.x, -self.y)
    }
}

impl From<Vector2<f64>> for Point2d {
    fn from(v: Vector2<f64>) -> Self {
        Point2d::new(v[0], v[1])
    }
}

impl From<Point2d> for Vector2<f64> {
    fn from(p: Point2d) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point2d {
    fn from((x, y): (f64, f64)) -> Self {
        Point2d::new(x, y)
    }
}
