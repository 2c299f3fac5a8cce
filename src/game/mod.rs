// Game layer: everything specific to the platformer itself

pub mod player;
