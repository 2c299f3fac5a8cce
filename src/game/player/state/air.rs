// Leaf states while off the ground

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::Behavior;
use crate::core::math::approx_zero;
use crate::game::player::actuators::PlayerContext;
use crate::game::player::animation::Clip;
use crate::game::player::config::PlayerConfig;
use crate::game::player::contacts::{Contacts, WallSide};
use crate::game::player::cooldown::Cooldown;
use crate::game::player::motion::{drive_horizontal, launch, launch_vertical};

/// Falling, with full air control.
///
/// A fall that starts by walking off a ledge carries a coyote window during
/// which jumping is still allowed.
#[derive(Debug, Clone)]
pub struct Fall {
    movement: Vec2,
    coyote: Cooldown,
    gravity_pending: bool,
}

impl Fall {
    /// `coyote_time` seconds of grace; pass 0 for a fall without one
    pub fn new(coyote_time: f32) -> Self {
        Self {
            movement: Vec2::ZERO,
            coyote: Cooldown::armed(coyote_time),
            gravity_pending: false,
        }
    }

    /// Seconds left in the coyote window
    pub fn coyote_remaining(&self) -> f32 {
        self.coyote.remaining()
    }
}

impl Behavior for Fall {
    fn on_enter(&mut self, _ctx: &mut PlayerContext<'_>, _config: &PlayerConfig) {
        self.gravity_pending = true;
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
        ctx.facing.face_towards(movement.x);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, dt: f32) {
        self.coyote.tick(dt);
        ctx.clips.play(Clip::Falling);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        if self.gravity_pending {
            ctx.body.set_gravity_scale(config.falling_gravity_scale);
            self.gravity_pending = false;
        }
        drive_horizontal(ctx.body, config, self.movement.x * config.max_run_speed);
    }

    fn can_jump(&self) -> bool {
        self.coyote.is_running()
    }
}

/// Ascending from a jump.
///
/// The impulse and gravity change are applied on the first physics step
/// after entry, never from the entry hook, and never twice.
#[derive(Debug, Clone, Default)]
pub struct Jump {
    movement: Vec2,
    impulse_pending: bool,
    gravity_pending: bool,
}

impl Jump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the jump impulse has yet to be applied
    pub fn impulse_pending(&self) -> bool {
        self.impulse_pending
    }
}

impl Behavior for Jump {
    fn on_enter(&mut self, _ctx: &mut PlayerContext<'_>, _config: &PlayerConfig) {
        self.impulse_pending = true;
        self.gravity_pending = true;
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
        ctx.facing.face_towards(movement.x);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, _dt: f32) {
        ctx.clips.play(Clip::Jump);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        if self.gravity_pending {
            ctx.body.set_gravity_scale(config.jumping_gravity_scale);
            self.gravity_pending = false;
        }
        if self.impulse_pending {
            launch_vertical(ctx.body, config, config.jump_impulse);
            self.impulse_pending = false;
        }
        drive_horizontal(ctx.body, config, self.movement.x * config.max_run_speed);
    }

    fn can_jump(&self) -> bool {
        false
    }
}

/// Sliding down a wall with the character's back to it
#[derive(Debug, Clone)]
pub struct WallSlide {
    movement: Vec2,
    wall_side: WallSide,
    gravity_pending: bool,
}

impl WallSlide {
    pub fn new(wall_side: WallSide) -> Self {
        Self {
            movement: Vec2::ZERO,
            wall_side,
            gravity_pending: false,
        }
    }

    pub fn wall_side(&self) -> WallSide {
        self.wall_side
    }

    fn face_away_from_wall(&self, ctx: &mut PlayerContext<'_>) {
        if let Some(facing_right) = self.wall_side.facing_away() {
            ctx.facing.set_facing_right(facing_right);
        }
    }
}

impl Behavior for WallSlide {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig) {
        self.gravity_pending = true;
        self.face_away_from_wall(ctx);
    }

    fn set_movement(&mut self, _ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
    }

    fn notify_contacts(
        &mut self,
        _ctx: &mut PlayerContext<'_>,
        _config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        if contacts.wall_side != WallSide::None {
            self.wall_side = contacts.wall_side;
        }
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, _dt: f32) {
        if approx_zero(ctx.body.velocity().y) {
            ctx.clips.play(Clip::WallCling);
        } else {
            ctx.clips.play(Clip::WallSlide);
        }
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        if self.gravity_pending {
            ctx.body.set_gravity_scale(config.wall_slide_gravity_scale);
            self.gravity_pending = false;
        }

        drive_horizontal(ctx.body, config, self.movement.x * config.max_run_speed);
        if ctx.body.velocity().y < config.max_wall_slide_speed {
            ctx.body.set_velocity_y(config.max_wall_slide_speed);
        }

        self.face_away_from_wall(ctx);
    }

    // Enables the wall jump
    fn can_jump(&self) -> bool {
        true
    }
}

/// Launched diagonally off a wall. Movement input is ignored until the
/// ascent ends.
#[derive(Debug, Clone)]
pub struct WallJump {
    wall_side: WallSide,
    impulse_pending: bool,
    gravity_pending: bool,
}

impl WallJump {
    pub fn new(wall_side: WallSide) -> Self {
        Self {
            wall_side,
            impulse_pending: false,
            gravity_pending: false,
        }
    }

    pub fn wall_side(&self) -> WallSide {
        self.wall_side
    }

    /// Velocity of the launch: 45 degrees up and away from the wall
    pub fn launch_velocity(&self, config: &PlayerConfig) -> Vec2 {
        Vec2::new(self.wall_side.away_direction(), 1.0) * config.jump_impulse * FRAC_1_SQRT_2
    }
}

impl Behavior for WallJump {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig) {
        self.impulse_pending = true;
        self.gravity_pending = true;
        if let Some(facing_right) = self.wall_side.facing_away() {
            ctx.facing.set_facing_right(facing_right);
        }
    }

    fn notify_contacts(
        &mut self,
        _ctx: &mut PlayerContext<'_>,
        _config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        // Touching another wall mid-arc changes nothing once launched
        if self.impulse_pending && contacts.wall_side != WallSide::None {
            self.wall_side = contacts.wall_side;
        }
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, _dt: f32) {
        ctx.clips.play(Clip::Jump);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        if self.gravity_pending {
            ctx.body.set_gravity_scale(config.jumping_gravity_scale);
            self.gravity_pending = false;
        }
        if self.impulse_pending {
            if let Some(facing_right) = self.wall_side.facing_away() {
                ctx.facing.set_facing_right(facing_right);
            }
            launch(ctx.body, config, self.launch_velocity(config));
            self.impulse_pending = false;
        }
    }

    fn can_jump(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::actuators::{FacingController, ForceMode};
    use crate::game::player::test_support::Rig;
    use approx::assert_relative_eq;

    fn entered<S: Behavior>(mut state: S, rig: &mut Rig, config: &PlayerConfig) -> S {
        state.on_enter(&mut rig.ctx(), config);
        state
    }

    #[test]
    fn test_fall_sets_gravity_once() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut fall = entered(Fall::new(0.0), &mut rig, &config);

        fall.fixed_update(&mut rig.ctx(), &config);
        fall.fixed_update(&mut rig.ctx(), &config);

        assert_eq!(rig.body.gravity_changes, vec![config.falling_gravity_scale]);
    }

    #[test]
    fn test_fall_coyote_window() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut fall = entered(Fall::new(0.1), &mut rig, &config);
        assert!(fall.can_jump());

        fall.update(&mut rig.ctx(), &config, 0.06);
        assert!(fall.can_jump());

        fall.update(&mut rig.ctx(), &config, 0.06);
        assert!(!fall.can_jump());
        assert_eq!(fall.coyote_remaining(), 0.0);
        assert_eq!(rig.clips.current(), Some(Clip::Falling));
    }

    #[test]
    fn test_fall_without_coyote_cannot_jump() {
        assert!(!Fall::new(0.0).can_jump());
    }

    #[test]
    fn test_jump_impulse_applied_once() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut jump = entered(Jump::new(), &mut rig, &config);
        assert!(jump.impulse_pending());
        assert_eq!(rig.body.velocity.y, 0.0, "entry alone must not launch");

        jump.fixed_update(&mut rig.ctx(), &config);
        assert_eq!(rig.body.velocity.y, config.jump_impulse);

        // Gravity would slow the ascent between steps
        rig.body.velocity.y = 4.0;
        jump.fixed_update(&mut rig.ctx(), &config);
        jump.fixed_update(&mut rig.ctx(), &config);

        assert_eq!(rig.body.velocity.y, 4.0);
        assert!(!jump.impulse_pending());
        assert_eq!(rig.body.gravity_changes, vec![config.jumping_gravity_scale]);
    }

    #[test]
    fn test_jump_impulse_in_accelerated_mode() {
        let config = PlayerConfig::default().with_acceleration(0.5, 0.8);
        let mut rig = Rig::default();
        rig.body.velocity.y = -2.0;
        let mut jump = entered(Jump::new(), &mut rig, &config);

        jump.fixed_update(&mut rig.ctx(), &config);

        assert_relative_eq!(rig.body.velocity.y, config.jump_impulse);
        let impulses = rig
            .body
            .forces
            .iter()
            .filter(|(_, mode)| *mode == ForceMode::Impulse)
            .count();
        assert_eq!(impulses, 1);
    }

    #[test]
    fn test_jump_cannot_jump() {
        assert!(!Jump::new().can_jump());
    }

    #[test]
    fn test_wall_slide_clamps_fall_speed() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        rig.body.velocity = Vec2::new(0.0, -9.0);
        let mut slide = entered(WallSlide::new(WallSide::Right), &mut rig, &config);

        slide.fixed_update(&mut rig.ctx(), &config);

        assert_eq!(rig.body.velocity.y, config.max_wall_slide_speed);
        assert_eq!(rig.body.gravity_changes, vec![config.wall_slide_gravity_scale]);
        assert!(!rig.facing.is_facing_right(), "faces away from a right wall");
        assert!(slide.can_jump());
    }

    #[test]
    fn test_wall_slide_leaves_slow_descent_alone() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        rig.body.velocity = Vec2::new(0.0, -1.0);
        let mut slide = entered(WallSlide::new(WallSide::Left), &mut rig, &config);

        slide.fixed_update(&mut rig.ctx(), &config);

        assert_eq!(rig.body.velocity.y, -1.0);
        assert!(rig.facing.is_facing_right());
    }

    #[test]
    fn test_wall_slide_cling_clip_when_still() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut slide = WallSlide::new(WallSide::Left);

        slide.update(&mut rig.ctx(), &config, 0.016);
        assert_eq!(rig.clips.current(), Some(Clip::WallCling));

        rig.body.velocity.y = -2.0;
        slide.update(&mut rig.ctx(), &config, 0.016);
        assert_eq!(rig.clips.current(), Some(Clip::WallSlide));
    }

    #[test]
    fn test_wall_jump_launch() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut wall_jump = entered(WallJump::new(WallSide::Right), &mut rig, &config);
        assert!(!rig.facing.is_facing_right());

        wall_jump.fixed_update(&mut rig.ctx(), &config);

        assert_relative_eq!(rig.body.velocity.x, -config.jump_impulse * 0.707, epsilon = 0.01);
        assert_relative_eq!(rig.body.velocity.y, config.jump_impulse * 0.707, epsilon = 0.01);
        assert!(!wall_jump.can_jump());
    }

    #[test]
    fn test_wall_jump_ignores_movement_and_second_wall() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut wall_jump = entered(WallJump::new(WallSide::Left), &mut rig, &config);
        wall_jump.fixed_update(&mut rig.ctx(), &config);
        let launched = rig.body.velocity;

        wall_jump.set_movement(&mut rig.ctx(), &config, Vec2::new(-1.0, 0.0));
        wall_jump.notify_contacts(&mut rig.ctx(), &config, &Contacts::on_wall(WallSide::Right));
        wall_jump.fixed_update(&mut rig.ctx(), &config);

        assert_eq!(rig.body.velocity, launched);
        assert_eq!(wall_jump.wall_side(), WallSide::Left);
        assert!(rig.facing.is_facing_right());
    }
}
