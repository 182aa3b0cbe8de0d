use crate::common::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A convex outline defined by its vertices in body-local space.
/// The local origin is the body's center of mass.
/// Vertices should be ordered counter-clockwise (or clockwise, consistently).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a new polygon from a vector of vertices.
    ///
    /// Rejects an empty outline and non-finite coordinates. Degenerate outlines
    /// (fewer than three vertices, collinear points) are accepted; their inertia
    /// falls back to 1.0.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(PhysicsError::EmptyPolygon);
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(PhysicsError::NonFiniteVertex { index });
        }
        Ok(Polygon { vertices })
    }

    /// Axis-aligned `width` x `height` box centered on the local origin, counter-clockwise.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Calculates the area of the polygon using the Shoelace formula.
    pub fn area(&self) -> f64 {
        let twice_area: f64 = self.edges().map(|(p0, p1)| p0.cross(p1)).sum();
        (twice_area / 2.0).abs()
    }

    /// Calculates the area centroid of the polygon.
    /// Falls back to the vertex average when the area vanishes.
    pub fn centroid(&self) -> Vec2 {
        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;
        for (p0, p1) in self.edges() {
            let c = p0.cross(p1);
            signed_area_sum += c;
            centroid += (p0 + p1) * c;
        }

        if signed_area_sum.abs() < 1e-10 {
            let sum = self.vertices.iter().fold(Vec2::ZERO, |acc, &v| acc + v);
            sum / self.vertices.len() as f64
        } else {
            centroid / (3.0 * signed_area_sum)
        }
    }

    /// Moment of inertia about the local origin for a body of the given mass:
    ///
    /// `I = (mass/6) * Σ|p_i × p_{i+1}| (p_i·p_i + p_i·p_{i+1} + p_{i+1}·p_{i+1}) / Σ|p_i × p_{i+1}|`
    ///
    /// Returns 1.0 when the denominator is zero (degenerate outline).
    pub fn inertia(&self, mass: f64) -> f64 {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (p0, p1) in self.edges() {
            let c = p0.cross(p1).abs();
            numerator += c * (p0.dot(p0) + p0.dot(p1) + p1.dot(p1));
            denominator += c;
        }
        if denominator == 0.0 {
            1.0
        } else {
            (mass / 6.0) * (numerator / denominator)
        }
    }
}
