//! Deterministic fixed-step 2D rigid-body dynamics for articulated mechanisms.
//!
//! Convex polygon bodies are connected by motorised revolute joints and rest
//! on a horizontal ground plane. A host builds a [`World`] once, writes motor
//! torques between frames and calls [`World::step`] once per frame.

pub mod collision;
pub mod common;
pub mod constraints;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::GroundContact;
pub use common::{
    BodyHandle, ContactConfig, IntegratorConfig, JointHandle, JointSolverConfig, Material, PhysicsError, Result,
    WorldConfig,
};
pub use constraints::{AngleLimits, RevoluteJoint};
pub use math::{Mat2, Transform, Vec2};
pub use objects::RigidBody;
pub use shapes::Polygon;
pub use world::World;
