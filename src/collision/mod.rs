pub mod ground;
pub mod manifold;

pub use ground::resolve_ground;
pub use manifold::GroundContact;
