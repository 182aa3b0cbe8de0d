//! Error types for scene construction and stepping.

use thiserror::Error;

/// Errors raised when a body, joint or step request is malformed.
///
/// Numerical trouble during a step is never reported here: singular joints
/// are skipped and runaway velocities are clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("invalid mass: {0} (must be positive and finite)")]
    InvalidMass(f64),

    /// A body outline needs at least one vertex.
    #[error("polygon has no vertices")]
    EmptyPolygon,

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {index} is not finite")]
    NonFiniteVertex {
        /// Position of the offending vertex in the outline.
        index: usize,
    },

    /// A scalar input (pose, velocity, torque, gravity) is NaN or infinite.
    #[error("{name} is not finite")]
    NonFiniteValue {
        /// Which input was rejected.
        name: &'static str,
    },

    /// Frame duration must be positive and finite.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// A step needs at least one substep.
    #[error("substep count must be at least 1")]
    ZeroSubsteps,

    /// The handle does not name a body in this world.
    #[error("invalid body handle: {0}")]
    InvalidBodyHandle(usize),

    /// The handle does not name a joint in this world.
    #[error("invalid joint handle: {0}")]
    InvalidJointHandle(usize),

    /// A joint must connect two distinct bodies.
    #[error("joint connects body {0} to itself")]
    SelfJoint(usize),

    /// Angle limits must be finite with `min <= max`.
    #[error("invalid angle limits: [{min}, {max}]")]
    InvalidAngleLimits {
        /// Lower bound of the relative angle.
        min: f64,
        /// Upper bound of the relative angle.
        max: f64,
    },
}

/// Result alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;
