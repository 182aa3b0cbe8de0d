//! Stable handles into a world's body and joint arenas.
//!
//! Bodies and joints are add-only, so a handle is simply the insertion index
//! and stays valid for the lifetime of the world that issued it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names a body owned by a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyHandle(pub(crate) usize);

/// Names a joint owned by a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointHandle(pub(crate) usize);

impl BodyHandle {
    /// Position of the body in [`World::bodies`](crate::world::World::bodies).
    pub fn index(self) -> usize {
        self.0
    }
}

impl JointHandle {
    /// Position of the joint in [`World::joints`](crate::world::World::joints).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

impl fmt::Display for JointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "joint#{}", self.0)
    }
}
