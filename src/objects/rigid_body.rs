use crate::common::config::IntegratorConfig;
use crate::common::error::{PhysicsError, Result};
use crate::common::Material;
use crate::integration::integrator;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A convex polygon body. The outline is stored in local space with the
/// center of mass at the local origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidBody {
    // Geometry
    pub shape: Polygon,
    pub material: Material,

    // Primary state
    pub position: Vec2, // World position of the center of mass
    pub angle: f64,     // Radians, never wrapped
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Accumulators, cleared by every integration
    pub force: Vec2,
    pub torque: f64,

    // Physical properties, fixed at construction
    mass: f64,
    pub(crate) inv_mass: f64,
    inertia: f64,
    pub(crate) inv_inertia: f64,
}

fn ensure_finite(value: f64, name: &'static str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::NonFiniteValue { name })
    }
}

impl RigidBody {
    /// Creates a dynamic body. The moment of inertia is derived once from the
    /// outline and mass.
    ///
    /// Fails if `mass` is not positive and finite or the pose is not finite.
    pub fn new(shape: Polygon, mass: f64, position: Vec2, angle: f64) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        ensure_finite(position.x, "position.x")?;
        ensure_finite(position.y, "position.y")?;
        ensure_finite(angle, "angle")?;

        let inertia = shape.inertia(mass);
        let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };

        Ok(Self {
            shape,
            material: Material::default(),
            position,
            angle,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass: 1.0 / mass,
            inertia,
            inv_inertia,
        })
    }

    /// Creates an immovable body (infinite mass and inertia). Integration and
    /// ground contact skip it; joints treat it as a fixed anchor.
    pub fn new_static(shape: Polygon, position: Vec2, angle: f64) -> Result<Self> {
        ensure_finite(position.x, "position.x")?;
        ensure_finite(position.y, "position.y")?;
        ensure_finite(angle, "angle")?;

        Ok(Self {
            shape,
            material: Material::default(),
            position,
            angle,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass: f64::INFINITY,
            inv_mass: 0.0,
            inertia: f64::INFINITY,
            inv_inertia: 0.0,
        })
    }

    /// Replaces the contact material.
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Sets the initial linear velocity.
    #[must_use]
    pub fn with_velocity(mut self, linear_velocity: Vec2) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Current pose as a transform from local to world space.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    /// Adds a force to the accumulator. When applied at a world point, the
    /// lever arm from the center of mass also produces torque.
    pub fn apply_force(&mut self, force: Vec2, point_world: Option<Vec2>) {
        self.force += force;
        if let Some(point) = point_world {
            self.torque += (point - self.position).cross(force);
        }
    }

    pub fn apply_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    /// Applies an instantaneous impulse at offset `r` from the center of mass.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Should typically be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Integrates with the default tuning. See [`integrator::integrate`].
    pub fn integrate(&mut self, dt: f64, gravity: Vec2) {
        integrator::integrate(self, dt, gravity, &IntegratorConfig::default());
    }

    /// Outline vertices rotated by the current angle and translated to the
    /// current position.
    pub fn world_vertices(&self) -> Vec<Vec2> {
        let transform = self.transform();
        self.shape
            .vertices()
            .iter()
            .map(|&v| transform.apply(v))
            .collect()
    }

    /// Velocity of the material point currently at `point_world`.
    pub fn velocity_at(&self, point_world: Vec2) -> Vec2 {
        self.linear_velocity + Vec2::cross_scalar(self.angular_velocity, point_world - self.position)
    }

    pub fn linear_momentum(&self) -> Vec2 {
        if self.is_static() {
            Vec2::ZERO
        } else {
            self.linear_velocity * self.mass
        }
    }

    /// Spin angular momentum about the body's own center of mass.
    pub fn angular_momentum(&self) -> f64 {
        if self.is_static() {
            0.0
        } else {
            self.inertia * self.angular_velocity
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        0.5 * self.mass * self.linear_velocity.magnitude_squared()
            + 0.5 * self.inertia * self.angular_velocity * self.angular_velocity
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.angle.is_finite()
            && self.linear_velocity.is_finite()
            && self.angular_velocity.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    fn unit_square() -> Polygon {
        Polygon::rectangle(1.0, 1.0).unwrap()
    }

    #[test]
    fn test_rigidbody_new() {
        let rb = RigidBody::new(unit_square(), 2.0, Vec2::new(1.0, 2.0), 0.5).unwrap();

        assert_eq!(rb.mass(), 2.0);
        assert!((rb.inv_mass() - 0.5).abs() < EPSILON);
        assert!((rb.inertia() - 2.0 / 6.0).abs() < EPSILON);
        assert!((rb.inv_inertia() - 3.0).abs() < EPSILON);
        assert_eq!(rb.position, Vec2::new(1.0, 2.0));
        assert_eq!(rb.angle, 0.5);
        assert_eq!(rb.linear_velocity, Vec2::ZERO);
        assert_eq!(rb.angular_velocity, 0.0);
        assert_eq!(rb.force, Vec2::ZERO);
        assert_eq!(rb.torque, 0.0);
        assert_eq!(rb.material, Material::default());
        assert!(!rb.is_static());
    }

    #[test]
    fn test_rigidbody_rejects_bad_mass() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = RigidBody::new(unit_square(), mass, Vec2::ZERO, 0.0).unwrap_err();
            assert!(matches!(err, PhysicsError::InvalidMass(_)));
        }
    }

    #[test]
    fn test_rigidbody_rejects_bad_pose() {
        let err = RigidBody::new(unit_square(), 1.0, Vec2::new(f64::NAN, 0.0), 0.0).unwrap_err();
        assert_eq!(err, PhysicsError::NonFiniteValue { name: "position.x" });
        let err = RigidBody::new_static(unit_square(), Vec2::ZERO, f64::INFINITY).unwrap_err();
        assert_eq!(err, PhysicsError::NonFiniteValue { name: "angle" });
    }

    #[test]
    fn test_rigidbody_degenerate_outline_inertia() {
        let sliver = Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)]).unwrap();
        let rb = RigidBody::new(sliver, 5.0, Vec2::ZERO, 0.0).unwrap();
        assert_eq!(rb.inertia(), 1.0);
        assert_eq!(rb.inv_inertia(), 1.0);
    }

    #[test]
    fn test_rigidbody_new_static() {
        let rb = RigidBody::new_static(unit_square(), Vec2::new(1.0, 2.0), 0.5).unwrap();
        assert_eq!(rb.inv_mass(), 0.0);
        assert_eq!(rb.inv_inertia(), 0.0);
        assert!(rb.mass().is_infinite());
        assert!(rb.is_static());
        assert_eq!(rb.linear_momentum(), Vec2::ZERO);
        assert_eq!(rb.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_apply_force() {
        let mut rb = RigidBody::new(unit_square(), 1.0, Vec2::ZERO, 0.0).unwrap();
        rb.apply_force(Vec2::new(10.0, 0.0), None);
        rb.apply_force(Vec2::new(0.0, 5.0), None);
        assert_eq!(rb.force, Vec2::new(10.0, 5.0));
        assert_eq!(rb.torque, 0.0);
    }

    #[test]
    fn test_apply_force_at_point() {
        let mut rb = RigidBody::new(unit_square(), 1.0, Vec2::new(5.0, 5.0), 0.0).unwrap();
        // Upward force 1 unit right of the center of mass: r = (1,0), r x F = 10
        rb.apply_force(Vec2::new(0.0, 10.0), Some(Vec2::new(6.0, 5.0)));
        assert_eq!(rb.force, Vec2::new(0.0, 10.0));
        assert!((rb.torque - 10.0).abs() < EPSILON);

        // Rightward force 1 unit above: r = (0,1), r x F = -10
        rb.apply_force(Vec2::new(10.0, 0.0), Some(Vec2::new(5.0, 6.0)));
        assert!(rb.torque.abs() < EPSILON);
    }

    #[test]
    fn test_apply_torque_and_clear() {
        let mut rb = RigidBody::new(unit_square(), 1.0, Vec2::ZERO, 0.0).unwrap();
        rb.apply_torque(2.0);
        rb.apply_torque(-0.5);
        assert_eq!(rb.torque, 1.5);
        rb.apply_force(Vec2::new(1.0, 1.0), None);
        rb.clear_accumulators();
        assert_eq!(rb.force, Vec2::ZERO);
        assert_eq!(rb.torque, 0.0);
    }

    #[test]
    fn test_apply_impulse() {
        let mut rb = RigidBody::new(unit_square(), 2.0, Vec2::ZERO, 0.0).unwrap();
        rb.apply_impulse(Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0));
        assert_relative_eq!(rb.linear_velocity.y, 0.5, epsilon = EPSILON);
        // r x J = 0.5, inv_inertia = 3
        assert_relative_eq!(rb.angular_velocity, 1.5, epsilon = EPSILON);
    }

    #[test]
    fn test_world_vertices() {
        let rb = RigidBody::new(unit_square(), 1.0, Vec2::new(2.0, 3.0), PI / 2.0).unwrap();
        let verts = rb.world_vertices();
        assert_eq!(verts.len(), 4);
        // Local (-0.5,-0.5) rotated 90 degrees is (0.5,-0.5)
        assert_relative_eq!(verts[0].x, 2.5, epsilon = EPSILON);
        assert_relative_eq!(verts[0].y, 2.5, epsilon = EPSILON);
        // Local (0.5,-0.5) rotated 90 degrees is (0.5,0.5)
        assert_relative_eq!(verts[1].x, 2.5, epsilon = EPSILON);
        assert_relative_eq!(verts[1].y, 3.5, epsilon = EPSILON);
    }

    #[test]
    fn test_velocity_at() {
        let mut rb = RigidBody::new(unit_square(), 1.0, Vec2::new(1.0, 1.0), 0.0).unwrap();
        rb.linear_velocity = Vec2::new(1.0, 0.0);
        rb.angular_velocity = 2.0;
        // Point 1 unit right of the center moves up at omega * 1.
        let v = rb.velocity_at(Vec2::new(2.0, 1.0));
        assert_relative_eq!(v.x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, 2.0, epsilon = EPSILON);
        // Point 1 unit above moves left.
        let v = rb.velocity_at(Vec2::new(1.0, 2.0));
        assert_relative_eq!(v.x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_momentum_and_energy() {
        let mut rb = RigidBody::new(unit_square(), 3.0, Vec2::ZERO, 0.0).unwrap();
        rb.linear_velocity = Vec2::new(2.0, 0.0);
        rb.angular_velocity = 4.0;
        assert_eq!(rb.linear_momentum(), Vec2::new(6.0, 0.0));
        assert_relative_eq!(rb.angular_momentum(), 2.0, epsilon = EPSILON);
        // 0.5*3*4 + 0.5*0.5*16
        assert_relative_eq!(rb.kinetic_energy(), 10.0, epsilon = EPSILON);
    }

    #[test]
    fn test_builders() {
        let rb = RigidBody::new(unit_square(), 1.0, Vec2::ZERO, 0.0)
            .unwrap()
            .with_material(Material::new(0.0, 1.0))
            .with_velocity(Vec2::new(1.0, 2.0));
        assert_eq!(rb.material.restitution, 0.0);
        assert_eq!(rb.linear_velocity, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_integrate_delegates_with_default_tuning() {
        let mut rb = RigidBody::new(unit_square(), 1.0, Vec2::new(0.0, 5.0), 0.0).unwrap();
        rb.integrate(1.0 / 60.0, Vec2::new(0.0, -9.81));
        assert_relative_eq!(rb.linear_velocity.y, -9.81 / 60.0 * 0.999, epsilon = 1e-12);
    }
}
