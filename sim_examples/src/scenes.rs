use anyhow::{Context, Result};
use rigid_sim2d::{BodyHandle, JointHandle, Material, Polygon, RevoluteJoint, RigidBody, Vec2, World, WorldConfig};

pub struct Scene {
    pub world: World,
    /// Bodies worth printing every report.
    pub tracked: Vec<(&'static str, BodyHandle)>,
    pub joints: Vec<(&'static str, JointHandle)>,
}

fn boxed(width: f64, height: f64, mass: f64, position: Vec2) -> Result<RigidBody> {
    let shape = Polygon::rectangle(width, height)?;
    Ok(RigidBody::new(shape, mass, position, 0.0)?)
}

/// A unit box dropped from `height` onto the ground.
pub fn drop_box(height: f64, restitution: f64) -> Result<Scene> {
    let mut world = World::default();
    let body = boxed(1.0, 1.0, 1.0, Vec2::new(0.0, height))
        .context("building box")?
        .with_material(Material::new(restitution, 0.6));
    let handle = world.add_body(body);
    Ok(Scene {
        world,
        tracked: vec![("box", handle)],
        joints: Vec::new(),
    })
}

/// A link hanging from a fixed pivot, released horizontally.
pub fn pendulum() -> Result<Scene> {
    let mut world = World::new(WorldConfig::default().without_ground());
    let pivot = world.add_body(RigidBody::new_static(
        Polygon::rectangle(0.2, 0.2)?,
        Vec2::new(0.0, 3.0),
        0.0,
    )?);
    let link = world.add_body(boxed(0.6, 0.1, 1.0, Vec2::new(0.3, 3.0))?);
    let joint = world
        .add_joint(RevoluteJoint::new(pivot, link, Vec2::ZERO, Vec2::new(-0.3, 0.0)))
        .context("pinning link to pivot")?;
    Ok(Scene {
        world,
        tracked: vec![("link", link)],
        joints: vec![("pivot", joint)],
    })
}

/// Torso, thigh, shin and foot joined at hip, knee and ankle, dropped from
/// a short height.
pub fn biped(substeps: u32) -> Result<Scene> {
    let mut world = World::new(WorldConfig::default().substeps(substeps));
    let y = 0.5;
    let torso = world.add_body(boxed(0.4, 0.5, 10.0, Vec2::new(0.0, y + 1.1))?);
    let thigh = world.add_body(boxed(0.12, 0.4, 2.5, Vec2::new(0.0, y + 0.65))?);
    let shin = world.add_body(boxed(0.10, 0.38, 1.5, Vec2::new(0.0, y + 0.26))?);
    let foot = world.add_body(boxed(0.25, 0.07, 0.8, Vec2::new(0.06, y + 0.035))?);

    let hip = world.add_joint(
        RevoluteJoint::new(torso, thigh, Vec2::new(0.0, -0.25), Vec2::new(0.0, 0.2)).with_angle_limits(-1.2, 1.2)?,
    )?;
    let knee = world.add_joint(
        RevoluteJoint::new(thigh, shin, Vec2::new(0.0, -0.2), Vec2::new(0.0, 0.19)).with_angle_limits(-0.1, 2.0)?,
    )?;
    let ankle = world.add_joint(
        RevoluteJoint::new(shin, foot, Vec2::new(0.0, -0.19), Vec2::new(-0.06, 0.035)).with_angle_limits(-0.8, 0.8)?,
    )?;

    Ok(Scene {
        world,
        tracked: vec![("torso", torso), ("foot", foot)],
        joints: vec![("hip", hip), ("knee", knee), ("ankle", ankle)],
    })
}
