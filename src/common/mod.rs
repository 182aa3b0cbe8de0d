pub mod config;
pub mod error;
pub mod handle;
pub mod material;

pub use config::{ContactConfig, IntegratorConfig, JointSolverConfig, WorldConfig};
pub use error::{PhysicsError, Result};
pub use handle::{BodyHandle, JointHandle};
pub use material::Material;
