//! Vector and rotation helpers for the plane.

pub mod mat2;
pub mod transform;
pub mod vec2;

pub use mat2::Mat2;
pub use transform::Transform;
pub use vec2::Vec2;

/// 2x2 counter-clockwise rotation matrix for `angle` radians.
pub fn rotation(angle: f64) -> Mat2 {
    Mat2::rotation(angle)
}

/// Scalar cross product `a.x*b.y - a.y*b.x`.
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.cross(b)
}

/// Cross product of a scalar with a vector, `(-s*v.y, s*v.x)`.
pub fn cross_scalar_vector(s: f64, v: Vec2) -> Vec2 {
    Vec2::cross_scalar(s, v)
}
