// Leaf states for standing and crouching on the ground

use glam::Vec2;

use super::Behavior;
use crate::game::player::actuators::PlayerContext;
use crate::game::player::animation::Clip;
use crate::game::player::config::PlayerConfig;
use crate::game::player::motion::drive_horizontal;

/// Standing still
#[derive(Debug, Clone, Default)]
pub struct Idle;

impl Idle {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for Idle {
    fn update(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, _dt: f32) {
        ctx.clips.play(Clip::Idle);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        drive_horizontal(ctx.body, config, 0.0);
    }

    fn can_jump(&self) -> bool {
        true
    }
}

/// Walking or running on the ground
#[derive(Debug, Clone, Default)]
pub struct GroundMove {
    movement: Vec2,
}

impl GroundMove {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for GroundMove {
    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
        ctx.facing.face_towards(movement.x);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, _dt: f32) {
        if ctx.body.velocity().x.abs() <= config.max_walk_speed {
            ctx.clips.play(Clip::Walk);
        } else {
            ctx.clips.play(Clip::Jog);
        }
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        drive_horizontal(ctx.body, config, self.movement.x * config.max_run_speed);
    }

    fn can_jump(&self) -> bool {
        true
    }
}

/// Crouching in place
#[derive(Debug, Clone, Default)]
pub struct CrouchIdle;

impl CrouchIdle {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for CrouchIdle {
    fn update(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, _dt: f32) {
        ctx.clips.play(Clip::CrouchIdle);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        drive_horizontal(ctx.body, config, 0.0);
    }

    // The ceiling veto lives in Grounded
    fn can_jump(&self) -> bool {
        true
    }
}

/// Walking while crouched. Momentum carried into the crouch shows as a slide
/// until the body slows to crouch-walk speed.
#[derive(Debug, Clone, Default)]
pub struct CrouchMove {
    movement: Vec2,
}

impl CrouchMove {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for CrouchMove {
    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
        ctx.facing.face_towards(movement.x);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, _dt: f32) {
        if ctx.body.velocity().x.abs() > config.max_crouch_walk_speed {
            ctx.clips.play(Clip::CrouchSlide);
        } else {
            ctx.clips.play(Clip::CrouchWalk);
        }
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        drive_horizontal(
            ctx.body,
            config,
            self.movement.x * config.max_crouch_walk_speed,
        );
    }

    fn can_jump(&self) -> bool {
        true
    }
}
