// Physics system using rapier3d

pub mod body;
mod world;

pub use body::presets;
pub use world::{PhysicsWorld, RigidBodyHandle};

// Re-export the rapier vector type for callers that move bodies directly
pub use rapier3d::prelude::Vector;
