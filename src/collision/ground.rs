use tracing::trace;

use super::manifold::GroundContact;
use crate::common::config::ContactConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Resolves contact between one body and the horizontal plane `y = ground_y`.
///
/// Every outline vertex below the plane is handled on its own, in outline
/// order: separating vertices only push the body out, approaching vertices
/// receive a restitution impulse along the normal plus a Coulomb-bounded
/// friction impulse, followed by a partial positional correction.
/// Static bodies are skipped.
pub fn resolve_ground(body: &mut RigidBody, ground_y: f64, config: &ContactConfig) -> Vec<GroundContact> {
    let mut contacts = Vec::new();
    if body.inv_mass == 0.0 {
        return contacts;
    }

    let normal = Vec2::UP;
    for (vertex, point) in body.world_vertices().into_iter().enumerate() {
        let penetration = ground_y - point.y;
        if penetration <= 0.0 {
            continue;
        }

        let r = point - body.position;
        let point_velocity = body.velocity_at(point);
        let vn = point_velocity.dot(normal);

        if vn > 0.0 {
            body.position.y += penetration * config.separating_push;
            contacts.push(GroundContact {
                vertex,
                point,
                penetration,
                normal_impulse: 0.0,
                tangent_impulse: 0.0,
            });
            continue;
        }

        let rn = r.cross(normal);
        let effective_mass = body.inv_mass + body.inv_inertia * rn * rn;
        if effective_mass < config.min_effective_mass {
            trace!(vertex, effective_mass, "ground contact with vanishing effective mass");
            continue;
        }

        let normal_impulse = (-(1.0 + body.material.restitution) * vn / effective_mass).max(0.0);
        let mut impulse = normal * normal_impulse;

        let mut tangent_impulse = 0.0;
        let tangent_velocity = point_velocity - normal * vn;
        let tangent_speed = tangent_velocity.magnitude();
        if tangent_speed > config.min_tangent_speed {
            let tangent = tangent_velocity / tangent_speed;
            let vt = point_velocity.dot(tangent);
            let rt = r.cross(tangent);
            let effective_mass_t = body.inv_mass + body.inv_inertia * rt * rt;
            let max_friction = body.material.friction * normal_impulse;
            let jt = (-vt / effective_mass_t).clamp(-max_friction, max_friction);
            impulse += tangent * jt;
            tangent_impulse = tangent.x * jt;
        }

        body.apply_impulse(impulse, r);
        body.position.y += penetration * config.penetration_correction;

        contacts.push(GroundContact {
            vertex,
            point,
            penetration,
            normal_impulse,
            tangent_impulse,
        });
    }
    contacts
}
