// Test doubles for the state machine's collaborators

use glam::Vec2;

use super::actuators::{BodyController, ClipPlayer, Facing, ForceMode, PlayerContext};
use super::animation::Clip;

/// Body that records everything done to it and never integrates gravity
#[derive(Debug, Clone)]
pub struct MockBody {
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub mass: f32,
    pub forces: Vec<(Vec2, ForceMode)>,
    pub gravity_changes: Vec<f32>,
}

impl Default for MockBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            mass: 1.0,
            forces: Vec::new(),
            gravity_changes: Vec::new(),
        }
    }
}

impl MockBody {
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }
}

impl BodyController for MockBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
        self.gravity_changes.push(scale);
    }

    fn apply_force(&mut self, force: Vec2, mode: ForceMode) {
        if mode == ForceMode::Impulse {
            self.velocity += force / self.mass;
        }
        self.forces.push((force, mode));
    }

    fn mass(&self) -> f32 {
        self.mass
    }
}

/// Clip player that remembers the clips it actually started
#[derive(Debug, Clone, Default)]
pub struct RecordingClips {
    pub started: Vec<Clip>,
}

impl RecordingClips {
    pub fn current(&self) -> Option<Clip> {
        self.started.last().copied()
    }
}

impl ClipPlayer for RecordingClips {
    fn play(&mut self, clip: Clip) {
        if self.current() != Some(clip) {
            self.started.push(clip);
        }
    }
}

/// Owns one of each collaborator and hands out contexts over them
#[derive(Debug, Default)]
pub struct Rig {
    pub body: MockBody,
    pub clips: RecordingClips,
    pub facing: Facing,
}

impl Rig {
    pub fn ctx(&mut self) -> PlayerContext<'_> {
        PlayerContext::new(&mut self.body, &mut self.clips, &mut self.facing)
    }
}
