// Player character controller
//
// - `config`: tuning values and their validation
// - `state`: the hierarchical locomotion state tree
// - `machine`: root of the tree, owns jump buffering and coyote time
// - `actuators`: capability traits the states drive (body, clips, facing)
// - `controller`: wires everything to the physics world and input queue

pub mod actuators;
pub mod animation;
pub mod config;
pub mod contacts;
pub mod controller;
pub mod cooldown;
pub mod machine;
pub mod motion;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use actuators::{BodyController, ClipPlayer, Facing, FacingController, ForceMode, PlayerContext};
pub use animation::{AnimationClip, AnimationPlayer, Clip};
pub use config::{ConfigError, MovementMode, PlayerConfig};
pub use contacts::{ContactSensor, Contacts, WallSide};
pub use controller::{PlayerController, PlayerError};
pub use cooldown::Cooldown;
pub use machine::{PlayerStateMachine, SHORT_HOP_FACTOR};
pub use state::{State, StateKind};
