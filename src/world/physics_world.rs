use tracing::{debug, trace, warn};

use crate::collision::{self, GroundContact};
use crate::common::config::WorldConfig;
use crate::common::error::{PhysicsError, Result};
use crate::common::{BodyHandle, JointHandle};
use crate::constraints::RevoluteJoint;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Owns every body and joint and advances them with a fixed-order substep
/// pipeline: motors, integration, one joint pass, ground contact, limits.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<RigidBody>,
    joints: Vec<RevoluteJoint>,
    config: WorldConfig,
    time: f64,
    // Ground contacts from the last substep
    contacts: Vec<(BodyHandle, GroundContact)>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Creates an empty world.
    pub fn new(config: WorldConfig) -> Self {
        debug!(
            gravity = ?config.gravity,
            ground_y = config.ground_y,
            substeps = config.substeps,
            "world created"
        );
        Self {
            bodies: Vec::new(),
            joints: Vec::new(),
            config,
            time: 0.0,
            contacts: Vec::new(),
        }
    }

    /// Adds a body and returns its handle. Bodies are never removed.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        debug!(%handle, mass = body.mass(), is_static = body.is_static(), "body added");
        self.bodies.push(body);
        handle
    }

    /// Adds a joint between two existing, distinct bodies.
    pub fn add_joint(&mut self, joint: RevoluteJoint) -> Result<JointHandle> {
        for body in [joint.body_a(), joint.body_b()] {
            if body.index() >= self.bodies.len() {
                return Err(PhysicsError::InvalidBodyHandle(body.index()));
            }
        }
        if joint.body_a() == joint.body_b() {
            return Err(PhysicsError::SelfJoint(joint.body_a().index()));
        }
        if !(joint.anchor_a_local.is_finite() && joint.anchor_b_local.is_finite()) {
            return Err(PhysicsError::NonFiniteValue { name: "anchor" });
        }
        if !joint.motor_torque.is_finite() {
            return Err(PhysicsError::NonFiniteValue { name: "motor_torque" });
        }

        let handle = JointHandle(self.joints.len());
        debug!(
            %handle,
            a = %joint.body_a(),
            b = %joint.body_b(),
            limits = ?joint.angle_limits(),
            "joint added"
        );
        self.joints.push(joint);
        Ok(handle)
    }

    /// Pins `a` and `b` together at a world-space point, deriving both local
    /// anchors from the bodies' current poses.
    pub fn add_joint_at(&mut self, a: BodyHandle, b: BodyHandle, world_point: Vec2) -> Result<JointHandle> {
        let body_a = self.body(a).ok_or(PhysicsError::InvalidBodyHandle(a.index()))?;
        let body_b = self.body(b).ok_or(PhysicsError::InvalidBodyHandle(b.index()))?;
        let anchor_a = body_a.transform().apply_inverse(world_point);
        let anchor_b = body_b.transform().apply_inverse(world_point);
        self.add_joint(RevoluteJoint::new(a, b, anchor_a, anchor_b))
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.index())
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.index())
    }

    pub fn joint(&self, handle: JointHandle) -> Option<&RevoluteJoint> {
        self.joints.get(handle.index())
    }

    /// Mutable access for changing motor commands between steps. The
    /// connected bodies cannot be changed.
    pub fn joint_mut(&mut self, handle: JointHandle) -> Option<&mut RevoluteJoint> {
        self.joints.get_mut(handle.index())
    }

    /// All bodies, indexed by [`BodyHandle::index`].
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// All joints, indexed by [`JointHandle::index`].
    pub fn joints(&self) -> &[RevoluteJoint] {
        &self.joints
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WorldConfig {
        &mut self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn ground_y(&self) -> f64 {
        self.config.ground_y
    }

    pub fn set_ground_y(&mut self, ground_y: f64) {
        self.config.ground_y = ground_y;
    }

    /// Simulated seconds, advanced once per [`step`](Self::step).
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Ground contacts produced by the last substep of the last step.
    pub fn contacts(&self) -> &[(BodyHandle, GroundContact)] {
        &self.contacts
    }

    /// `relative_angle` of a joint, or `None` for an unknown handle.
    pub fn relative_angle(&self, handle: JointHandle) -> Option<f64> {
        self.joint(handle)?.relative_angle(&self.bodies)
    }

    /// Advances the simulation by `dt`, split into `substeps` equal slices.
    ///
    /// Each slice runs, in order: every joint motor, integration of every
    /// body, a single solve of every joint, ground contact for every dynamic
    /// body, then the angle limits of every joint. Fails only for a
    /// non-positive or non-finite `dt` or zero substeps; numerical trouble
    /// inside the step is absorbed by the clamps.
    pub fn step(&mut self, dt: f64, substeps: u32) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        if substeps == 0 {
            return Err(PhysicsError::ZeroSubsteps);
        }

        let sub_dt = dt / f64::from(substeps);
        for _ in 0..substeps {
            self.substep(sub_dt);
        }
        self.time += dt;

        for (index, body) in self.bodies.iter().enumerate() {
            if !body.is_finite() {
                warn!(body = %BodyHandle(index), time = self.time, "body state is not finite");
            }
        }
        trace!(
            time = self.time,
            bodies = self.bodies.len(),
            joints = self.joints.len(),
            contacts = self.contacts.len(),
            "step complete"
        );
        Ok(())
    }

    /// [`step`](Self::step) with the configured default substep count.
    pub fn step_frame(&mut self, dt: f64) -> Result<()> {
        self.step(dt, self.config.substeps)
    }

    fn substep(&mut self, dt: f64) {
        for joint in &self.joints {
            joint.apply_motor(&mut self.bodies);
        }

        for body in &mut self.bodies {
            integrator::integrate(body, dt, self.config.gravity, &self.config.integrator);
        }

        for joint in &mut self.joints {
            joint.solve_position(&mut self.bodies, dt, &self.config.joint_solver);
        }

        self.contacts.clear();
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.is_static() {
                continue;
            }
            let contacts = collision::resolve_ground(body, self.config.ground_y, &self.config.contact);
            self.contacts
                .extend(contacts.into_iter().map(|contact| (BodyHandle(index), contact)));
        }

        for joint in &self.joints {
            joint.solve_limits(&mut self.bodies, dt, &self.config.joint_solver);
        }
    }

    /// Total linear momentum of the dynamic bodies.
    pub fn linear_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .fold(Vec2::ZERO, |acc, body| acc + body.linear_momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(RigidBody::kinetic_energy).sum()
    }

    /// Largest anchor separation over all joints, 0.0 with no joints.
    /// Joints whose handles do not resolve are ignored.
    pub fn max_joint_error(&self) -> f64 {
        self.joints
            .iter()
            .filter_map(|joint| joint.position_error(&self.bodies))
            .fold(0.0, f64::max)
    }
}
