// Physics system using rapier2d

pub mod body;
mod collision;
mod sensing;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D, RapierBody, RigidBodyHandle};
pub use collision::CollisionGroups;
pub use sensing::{ContactProbe, ProbeError, ProbeSite};
pub use world::{PhysicsWorld, DEFAULT_GRAVITY};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, Vector};
