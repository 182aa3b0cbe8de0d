//! Tuning and scene-level configuration.
//!
//! The defaults are the tuning constants the engine was calibrated with:
//! damping, saturation clamps and the Baumgarte factor together decide how
//! the simulation feels and whether long joint chains stay stable. Change
//! them deliberately.

use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-body integration parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorConfig {
    /// Multiplier applied to linear velocity on every integration call.
    pub linear_damping: f64,
    /// Multiplier applied to angular velocity on every integration call.
    pub angular_damping: f64,
    /// Linear speed is rescaled to this magnitude when exceeded.
    pub max_linear_speed: f64,
    /// Angular speed is clamped to `±max_angular_speed` rad/s.
    pub max_angular_speed: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            linear_damping: 0.999,
            angular_damping: 0.995,
            max_linear_speed: 200.0,
            max_angular_speed: 50.0,
        }
    }
}

impl IntegratorConfig {
    /// Same clamps, no damping. Momentum is conserved exactly in free flight.
    #[must_use]
    pub fn undamped() -> Self {
        Self {
            linear_damping: 1.0,
            angular_damping: 1.0,
            ..Self::default()
        }
    }
}

/// Revolute joint solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointSolverConfig {
    /// Baumgarte factor: fraction of positional error fed back per substep.
    pub baumgarte: f64,
    /// Upper bound on the magnitude of the stabilization bias velocity.
    pub max_bias: f64,
    /// Upper bound on the magnitude of a single joint impulse.
    pub max_impulse: f64,
}

impl Default for JointSolverConfig {
    fn default() -> Self {
        Self {
            baumgarte: 0.2,
            max_bias: 20.0,
            max_impulse: 1000.0,
        }
    }
}

/// Ground contact parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactConfig {
    /// Fraction of penetration removed when the vertex is already separating.
    pub separating_push: f64,
    /// Fraction of penetration removed after an impulse is applied.
    pub penetration_correction: f64,
    /// Contacts with a smaller effective mass are skipped.
    pub min_effective_mass: f64,
    /// Tangential speeds below this produce no friction impulse.
    pub min_tangent_speed: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            separating_push: 0.8,
            penetration_correction: 0.5,
            min_effective_mass: 1e-10,
            min_tangent_speed: 1e-6,
        }
    }
}

/// Main configuration for a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Constant acceleration applied to every dynamic body.
    pub gravity: Vec2,
    /// Height of the infinite horizontal ground plane.
    pub ground_y: f64,
    /// Substeps used by [`World::step_frame`](crate::world::World::step_frame).
    pub substeps: u32,
    pub integrator: IntegratorConfig,
    pub joint_solver: JointSolverConfig,
    pub contact: ContactConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            ground_y: 0.0,
            substeps: 8,
            integrator: IntegratorConfig::default(),
            joint_solver: JointSolverConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Set the gravity vector.
    #[must_use]
    pub fn gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vec2::ZERO;
        self
    }

    /// Set the ground height.
    #[must_use]
    pub fn ground_y(mut self, ground_y: f64) -> Self {
        self.ground_y = ground_y;
        self
    }

    /// Remove the ground plane entirely.
    #[must_use]
    pub fn without_ground(mut self) -> Self {
        self.ground_y = f64::NEG_INFINITY;
        self
    }

    /// Set the default substep count.
    #[must_use]
    pub fn substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    /// Set the integration parameters.
    #[must_use]
    pub fn integrator(mut self, integrator: IntegratorConfig) -> Self {
        self.integrator = integrator;
        self
    }

    /// Set the joint solver parameters.
    #[must_use]
    pub fn joint_solver(mut self, joint_solver: JointSolverConfig) -> Self {
        self.joint_solver = joint_solver;
        self
    }

    /// Set the ground contact parameters.
    #[must_use]
    pub fn contact(mut self, contact: ContactConfig) -> Self {
        self.contact = contact;
        self
    }
}
