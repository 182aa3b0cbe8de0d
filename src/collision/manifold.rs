use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One outline vertex found below the ground plane during a substep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundContact {
    /// Index of the vertex in the body outline.
    pub vertex: usize,
    /// World position of the vertex when it was detected.
    pub point: Vec2,
    /// Depth below the ground plane (positive).
    pub penetration: f64,
    /// Impulse along the ground normal (+y). Zero when the vertex was already separating.
    pub normal_impulse: f64,
    /// Friction impulse along +x.
    pub tangent_impulse: f64,
}

impl GroundContact {
    /// Total impulse the ground applied at this vertex.
    pub fn impulse(&self) -> Vec2 {
        Vec2::new(self.tangent_impulse, self.normal_impulse)
    }
}
