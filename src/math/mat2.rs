use std::ops::{Add, Mul};

use super::vec2::Vec2;

/// Row-major 2x2 matrix `[[m00, m01], [m10, m11]]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat2 {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
}

impl Mat2 {
    pub const ZERO: Mat2 = Mat2::new(0.0, 0.0, 0.0, 0.0);
    pub const IDENTITY: Mat2 = Mat2::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// Counter-clockwise rotation by `angle` radians: `[[cos, -sin], [sin, cos]]`.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, s, c)
    }

    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Solves `self * x = rhs` by Cramer's rule.
    /// Returns `None` when the matrix is singular or the result is not finite.
    pub fn solve(&self, rhs: Vec2) -> Option<Vec2> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        let x = Vec2::new(
            inv_det * (self.m11 * rhs.x - self.m01 * rhs.y),
            inv_det * (self.m00 * rhs.y - self.m10 * rhs.x),
        );
        x.is_finite().then_some(x)
    }
}

impl Add for Mat2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.m00 + rhs.m00,
            self.m01 + rhs.m01,
            self.m10 + rhs.m10,
            self.m11 + rhs.m11,
        )
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m00 * v.x + self.m01 * v.y,
            self.m10 * v.x + self.m11 * v.y,
        )
    }
}

impl Mul<f64> for Mat2 {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.m00 * s, self.m01 * s, self.m10 * s, self.m11 * s)
    }
}
