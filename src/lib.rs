// 2D platformer character controller built on a hierarchical state machine

pub mod core;
pub mod engine;
pub mod game;
