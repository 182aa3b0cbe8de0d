//! Defines physical material properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the physical properties of a rigid body affecting ground contact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient. Range [0, infinity).
    /// Tangential impulse never exceeds `friction * normal impulse`.
    pub friction: f64,
}

impl Material {
    /// Creates a new material with the given restitution and friction.
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }
}

impl Default for Material {
    /// Slightly bouncy, grippy: suits robot feet on a hard floor.
    fn default() -> Self {
        Material {
            restitution: 0.3,
            friction: 0.6,
        }
    }
}
