use tracing::{debug, trace};

use super::get_mutable_body_pair;
use crate::common::config::JointSolverConfig;
use crate::common::error::{PhysicsError, Result};
use crate::common::BodyHandle;
use crate::math::mat2::Mat2;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allowed range of `angle_b - angle_a`, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AngleLimits {
    min: f64,
    max: f64,
}

impl AngleLimits {
    /// Fails unless both bounds are finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(PhysicsError::InvalidAngleLimits { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// A pin joint: keeps an anchor on body A coincident with an anchor on body B
/// while letting them rotate freely about it. Optionally driven by a motor
/// torque and restricted to a range of relative angles.
///
/// The connected bodies are fixed at construction. Queries that take the body
/// slice return `None` when a handle does not index into it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RevoluteJoint {
    body_a: BodyHandle,
    body_b: BodyHandle,
    /// Anchor point on body A, in local coordinates.
    pub anchor_a_local: Vec2,
    /// Anchor point on body B, in local coordinates.
    pub anchor_b_local: Vec2,
    /// Signed torque, positive turns B counter-clockwise relative to A.
    /// May be changed between steps.
    pub motor_torque: f64,
    angle_limits: Option<AngleLimits>,
    /// Point impulse applied to B by the most recent solve (A received the
    /// negation). Not reused as a warm start.
    last_impulse: Vec2,
}

impl RevoluteJoint {
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a_local: Vec2,
        anchor_b_local: Vec2,
    ) -> Self {
        Self {
            body_a,
            body_b,
            anchor_a_local,
            anchor_b_local,
            motor_torque: 0.0,
            angle_limits: None,
            last_impulse: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn with_motor_torque(mut self, motor_torque: f64) -> Self {
        self.motor_torque = motor_torque;
        self
    }

    pub fn with_angle_limits(mut self, min: f64, max: f64) -> Result<Self> {
        self.angle_limits = Some(AngleLimits::new(min, max)?);
        Ok(self)
    }

    pub fn body_a(&self) -> BodyHandle {
        self.body_a
    }

    pub fn body_b(&self) -> BodyHandle {
        self.body_b
    }

    /// Sets the motor command, rejecting NaN and infinities.
    pub fn set_motor_torque(&mut self, motor_torque: f64) -> Result<()> {
        if !motor_torque.is_finite() {
            return Err(PhysicsError::NonFiniteValue { name: "motor_torque" });
        }
        self.motor_torque = motor_torque;
        Ok(())
    }

    pub fn angle_limits(&self) -> Option<AngleLimits> {
        self.angle_limits
    }

    pub fn last_impulse(&self) -> Vec2 {
        self.last_impulse
    }

    pub fn world_anchor_a(&self, bodies: &[RigidBody]) -> Option<Vec2> {
        let body = bodies.get(self.body_a.index())?;
        Some(body.transform().apply(self.anchor_a_local))
    }

    pub fn world_anchor_b(&self, bodies: &[RigidBody]) -> Option<Vec2> {
        let body = bodies.get(self.body_b.index())?;
        Some(body.transform().apply(self.anchor_b_local))
    }

    /// `angle_b - angle_a`. Angles are not wrapped, so this can leave (-PI, PI].
    pub fn relative_angle(&self, bodies: &[RigidBody]) -> Option<f64> {
        let body_a = bodies.get(self.body_a.index())?;
        let body_b = bodies.get(self.body_b.index())?;
        Some(body_b.angle - body_a.angle)
    }

    /// Distance between the two world anchors.
    pub fn position_error(&self, bodies: &[RigidBody]) -> Option<f64> {
        Some(self.world_anchor_a(bodies)?.distance(self.world_anchor_b(bodies)?))
    }

    /// Adds the motor torque to both bodies: `-t` on A, `+t` on B.
    ///
    /// With limits configured the motor may not push further past a bound it
    /// has reached; torque pointing back into the range is always applied.
    pub fn apply_motor(&self, bodies: &mut [RigidBody]) {
        if self.motor_torque == 0.0 {
            return;
        }
        let Some(rel) = self.relative_angle(bodies) else {
            return;
        };
        let mut t = self.motor_torque;
        if let Some(limits) = self.angle_limits {
            if rel <= limits.min && t < 0.0 {
                t = 0.0;
            }
            if rel >= limits.max && t > 0.0 {
                t = 0.0;
            }
        }
        let Some((body_a, body_b)) = get_mutable_body_pair(bodies, self.body_a, self.body_b) else {
            return;
        };
        body_a.apply_torque(-t);
        body_b.apply_torque(t);
    }

    /// One velocity-level pass with Baumgarte stabilization.
    ///
    /// Solves `K * lambda = -(dv + bias)` for the point impulse that cancels the
    /// relative anchor velocity plus a fraction of the positional error. A
    /// singular `K` (both bodies static) skips the joint for this substep.
    pub fn solve_position(&mut self, bodies: &mut [RigidBody], dt: f64, config: &JointSolverConfig) {
        let Some((body_a, body_b)) = get_mutable_body_pair(bodies, self.body_a, self.body_b) else {
            return;
        };

        let r_a = body_a.transform().apply_rotation(self.anchor_a_local);
        let r_b = body_b.transform().apply_rotation(self.anchor_b_local);
        let error = (body_b.position + r_b) - (body_a.position + r_a);

        let bias = (error * (config.baumgarte / dt)).clamp_magnitude(config.max_bias);

        let v_a = body_a.linear_velocity + Vec2::cross_scalar(body_a.angular_velocity, r_a);
        let v_b = body_b.linear_velocity + Vec2::cross_scalar(body_b.angular_velocity, r_b);
        let dv = v_b - v_a;

        let k = effective_mass(body_a, r_a) + effective_mass(body_b, r_b);
        let Some(lambda) = k.solve(-(dv + bias)) else {
            trace!(a = %self.body_a, b = %self.body_b, "singular joint matrix, skipping");
            return;
        };

        let magnitude = lambda.magnitude();
        if magnitude > config.max_impulse {
            debug!(
                a = %self.body_a,
                b = %self.body_b,
                magnitude,
                limit = config.max_impulse,
                "joint impulse clamped"
            );
        }
        let lambda = lambda.clamp_magnitude(config.max_impulse);

        body_a.apply_impulse(-lambda, r_a);
        body_b.apply_impulse(lambda, r_b);
        self.last_impulse = lambda;
    }

    /// One-sided angular impulse at a reached bound. Removes relative angular
    /// velocity heading further out of range and feeds back the overshoot with
    /// the same Baumgarte factor as the point constraint. Does nothing inside
    /// the range or without limits.
    ///
    /// Run after every joint's point solve and the ground pass, which would
    /// otherwise undo it within the same substep.
    pub fn solve_limits(&self, bodies: &mut [RigidBody], dt: f64, config: &JointSolverConfig) {
        let Some(limits) = self.angle_limits else {
            return;
        };
        let Some((body_a, body_b)) = get_mutable_body_pair(bodies, self.body_a, self.body_b) else {
            return;
        };

        let k = body_a.inv_inertia + body_b.inv_inertia;
        if k == 0.0 {
            return;
        }
        let rel = body_b.angle - body_a.angle;
        let rel_omega = body_b.angular_velocity - body_a.angular_velocity;

        let impulse = if rel <= limits.min {
            let bias = (config.baumgarte / dt * (rel - limits.min)).max(-config.max_bias);
            (-(rel_omega + bias) / k).max(0.0)
        } else if rel >= limits.max {
            let bias = (config.baumgarte / dt * (rel - limits.max)).min(config.max_bias);
            (-(rel_omega + bias) / k).min(0.0)
        } else {
            return;
        };

        body_a.angular_velocity -= impulse * body_a.inv_inertia;
        body_b.angular_velocity += impulse * body_b.inv_inertia;
    }
}

/// `inv_mass * I + inv_inertia * [[ry², -rx*ry], [-rx*ry, rx²]]`, zero for static bodies.
fn effective_mass(body: &RigidBody, r: Vec2) -> Mat2 {
    if body.inv_mass == 0.0 {
        return Mat2::ZERO;
    }
    Mat2::IDENTITY * body.inv_mass
        + Mat2::new(r.y * r.y, -r.x * r.y, -r.x * r.y, r.x * r.x) * body.inv_inertia
}
