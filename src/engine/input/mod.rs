// Input handling
//
// The binding layer (keyboard, gamepad, scripted timeline) pushes
// `InputEvent`s into an `InputQueue`. The player controller drains the queue
// once per frame and turns each event into a state machine command.

pub mod queue;

pub use queue::{InputEvent, InputQueue};
