use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Point (or vector) in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the XY component.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Unit vector in the XY plane pointing from `self` towards `other`.
    ///
    /// Coincident points yield the zero vector so degenerate lines
    /// collapse to zero-area geometry instead of producing NaN.
    pub fn unit_vector(&self, other: &Point) -> Point {
        let d = *other - *self;
        let len = d.length();
        if len > 0.0 {
            Point::new(d.x / len, d.y / len)
        } else {
            Point::ORIGIN
        }
    }

    /// Point at polar `angle` (radians, CCW from +X) and `radius` around `self`.
    pub fn arc_point(&self, angle: f64, radius: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::with_z(self.x + cos * radius, self.y + sin * radius, self.z)
    }

    /// Polar angle of `other` as seen from `self`.
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::with_z(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::with_z(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::with_z(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::with_z(-self.x, -self.y, -self.z)
    }
}
