use tracing::debug;

use crate::common::config::IntegratorConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances one body by `dt` using semi-implicit (symplectic) Euler.
///
/// Order matters: velocities are updated from gravity and the accumulated
/// force/torque, damped, clamped, and only then used to move the pose.
/// Accumulators are cleared afterwards. Static bodies are left untouched.
pub fn integrate(body: &mut RigidBody, dt: f64, gravity: Vec2, config: &IntegratorConfig) {
    if body.inv_mass == 0.0 {
        return;
    }

    body.linear_velocity += (gravity + body.force * body.inv_mass) * dt;
    body.angular_velocity += body.torque * body.inv_inertia * dt;

    body.linear_velocity *= config.linear_damping;
    body.angular_velocity *= config.angular_damping;

    let speed = body.linear_velocity.magnitude();
    if speed > config.max_linear_speed {
        debug!(speed, limit = config.max_linear_speed, "linear speed clamped");
        body.linear_velocity *= config.max_linear_speed / speed;
    }
    if body.angular_velocity.abs() > config.max_angular_speed {
        debug!(
            angular_speed = body.angular_velocity,
            limit = config.max_angular_speed,
            "angular speed clamped"
        );
        body.angular_velocity = config.max_angular_speed.copysign(body.angular_velocity);
    }

    body.position += body.linear_velocity * dt;
    body.angle += body.angular_velocity * dt;

    body.clear_accumulators();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Polygon;
    use approx::assert_relative_eq;

    fn unit_box(position: Vec2) -> RigidBody {
        RigidBody::new(Polygon::rectangle(1.0, 1.0).unwrap(), 1.0, position, 0.0).unwrap()
    }

    #[test]
    fn test_integrate_linear_motion_no_force() {
        let mut rb = unit_box(Vec2::ZERO);
        rb.linear_velocity = Vec2::new(10.0, -5.0);
        integrate(&mut rb, 0.1, Vec2::ZERO, &IntegratorConfig::undamped());

        assert_relative_eq!(rb.position.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rb.position.y, -0.5, epsilon = 1e-12);
        assert_eq!(rb.linear_velocity, Vec2::new(10.0, -5.0));
        assert_eq!(rb.angular_velocity, 0.0);
    }

    #[test]
    fn test_integrate_gravity_then_damping() {
        let mut rb = unit_box(Vec2::new(0.0, 5.0));
        let dt = 1.0 / 60.0;
        integrate(&mut rb, dt, Vec2::new(0.0, -9.81), &IntegratorConfig::default());

        let expected_vy = -9.81 * dt * 0.999;
        assert_relative_eq!(rb.linear_velocity.y, expected_vy, epsilon = 1e-12);
        // Position uses the post-damping velocity.
        assert_relative_eq!(rb.position.y, 5.0 + dt * expected_vy, epsilon = 1e-12);
        assert_relative_eq!(rb.linear_velocity.y, -0.1633365, epsilon = 1e-6);
    }

    #[test]
    fn test_integrate_force_and_torque() {
        let mut rb = unit_box(Vec2::ZERO);
        rb.apply_force(Vec2::new(10.0, 0.0), None);
        rb.apply_torque(2.0);
        let dt = 0.1;
        integrate(&mut rb, dt, Vec2::ZERO, &IntegratorConfig::undamped());

        // a = F/m = 10, alpha = T/I = 2 / (1/6) = 12
        assert_relative_eq!(rb.linear_velocity.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rb.position.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(rb.angular_velocity, 1.2, epsilon = 1e-12);
        assert_relative_eq!(rb.angle, 0.12, epsilon = 1e-12);
        assert_eq!(rb.force, Vec2::ZERO);
        assert_eq!(rb.torque, 0.0);
    }

    #[test]
    fn test_integrate_clamps_linear_speed() {
        let mut rb = unit_box(Vec2::ZERO);
        rb.linear_velocity = Vec2::new(3000.0, 4000.0);
        integrate(&mut rb, 0.01, Vec2::ZERO, &IntegratorConfig::undamped());

        assert_relative_eq!(rb.linear_velocity.magnitude(), 200.0, epsilon = 1e-9);
        assert_relative_eq!(rb.linear_velocity.x, 120.0, epsilon = 1e-9);
        assert_relative_eq!(rb.position.x, 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_integrate_clamps_angular_speed() {
        let mut rb = unit_box(Vec2::ZERO);
        rb.angular_velocity = -80.0;
        integrate(&mut rb, 0.01, Vec2::ZERO, &IntegratorConfig::undamped());
        assert_eq!(rb.angular_velocity, -50.0);
        assert_relative_eq!(rb.angle, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_integrate_static_object() {
        let mut rb = RigidBody::new_static(
            Polygon::rectangle(1.0, 1.0).unwrap(),
            Vec2::new(1.0, 1.0),
            1.0,
        )
        .unwrap();
        rb.linear_velocity = Vec2::new(1.0, 1.0);
        rb.force = Vec2::new(10.0, 10.0);
        let initial_state = rb.clone();

        integrate(&mut rb, 0.1, Vec2::new(0.0, -9.81), &IntegratorConfig::default());
        assert_eq!(rb, initial_state);
    }

    #[test]
    fn test_integrate_conserves_momentum_undamped() {
        let mut rb = unit_box(Vec2::ZERO);
        rb.linear_velocity = Vec2::new(1.5, -0.25);
        rb.angular_velocity = 3.0;
        let p0 = rb.linear_momentum();
        let l0 = rb.angular_momentum();
        for _ in 0..1000 {
            integrate(&mut rb, 1.0 / 240.0, Vec2::ZERO, &IntegratorConfig::undamped());
        }
        assert_eq!(rb.linear_momentum(), p0);
        assert_eq!(rb.angular_momentum(), l0);
    }
}
