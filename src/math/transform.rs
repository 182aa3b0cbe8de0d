use super::mat2::Mat2;
use super::vec2::Vec2;

/// A rigid pose: rotation about the origin followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Angle in radians
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// Maps a local point into world space (rotation then translation).
    pub fn apply(self, point: Vec2) -> Vec2 {
        Mat2::rotation(self.rotation) * point + self.position
    }

    /// Rotates a local offset into world orientation without translating it.
    pub fn apply_rotation(self, offset: Vec2) -> Vec2 {
        Mat2::rotation(self.rotation) * offset
    }

    /// Maps a world point back into local space.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        Mat2::rotation(-self.rotation) * (point - self.position)
    }
}
