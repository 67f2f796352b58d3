//! 2-D vector arithmetic shared by every other module.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::Serialize;

/// A point or displacement in diagram space (grid units, y up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn dst2(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn dst(self, other: Self) -> f64 {
        self.dst2(other).sqrt()
    }

    #[must_use]
    pub fn len(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Uniform scale about the origin.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }

    /// Rotate clockwise about the origin by `degrees`.
    #[must_use]
    pub fn rotate_cw_deg(self, degrees: f64) -> Self {
        let (sin, cos) = (-degrees).to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Round each axis to the nearest `1 / divisions` of a unit.
    #[must_use]
    pub fn snap(self, divisions: f64) -> Self {
        Self {
            x: (self.x * divisions).round() / divisions,
            y: (self.y * divisions).round() / divisions,
        }
    }

    /// Z component of the 3-D cross product of `self` and `other`.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle of this vector from the +x axis, in radians.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}
