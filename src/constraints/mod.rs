use crate::common::BodyHandle;
use crate::objects::rigid_body::RigidBody;

pub mod revolute_joint;

pub use revolute_joint::{AngleLimits, RevoluteJoint};

/// Borrows two distinct bodies mutably from the same slice.
/// Returns `None` if the handles coincide or either is out of range.
pub(crate) fn get_mutable_body_pair(
    bodies: &mut [RigidBody],
    a: BodyHandle,
    b: BodyHandle,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    let (idx_a, idx_b) = (a.index(), b.index());
    if idx_a == idx_b || idx_a >= bodies.len() || idx_b >= bodies.len() {
        return None;
    }

    // split_at_mut needs the lower index first
    if idx_a < idx_b {
        let (head, tail) = bodies.split_at_mut(idx_b);
        Some((&mut head[idx_a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(idx_a);
        Some((&mut tail[0], &mut head[idx_b]))
    }
}
