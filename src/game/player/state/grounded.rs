// Composite states while on the ground

use glam::Vec2;
use log::debug;

use super::{enter, Behavior, CrouchIdle, CrouchMove, GroundMove, Idle, State, StateKind};
use crate::game::player::actuators::PlayerContext;
use crate::game::player::config::PlayerConfig;
use crate::game::player::contacts::Contacts;

/// On the ground: either standing or crouched.
///
/// Touching the ceiling keeps an existing crouch (so the character does not
/// stand up into the ceiling) and vetoes jumping.
#[derive(Debug, Clone)]
pub struct Grounded {
    current: Box<State>,
    movement: Vec2,
    on_ceiling: bool,
}

impl Grounded {
    pub fn new(contacts: Contacts) -> Self {
        Self {
            current: Box::new(State::Standing(Standing::new())),
            movement: Vec2::ZERO,
            on_ceiling: contacts.on_ceiling,
        }
    }

    pub fn current(&self) -> &State {
        &self.current
    }

    pub fn is_on_ceiling(&self) -> bool {
        self.on_ceiling
    }

    fn wants_crouch(&self, config: &PlayerConfig) -> bool {
        self.movement.y <= config.crouch_input_zone
            || (self.current.kind() == StateKind::Crouched && self.on_ceiling)
    }

    /// Switch between standing and crouching if needed.
    /// Returns whether a new child was entered.
    fn settle(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) -> bool {
        let next = match (self.wants_crouch(config), self.current.kind()) {
            (true, StateKind::Standing) => State::Crouched(Crouched::new()),
            (false, StateKind::Crouched) => State::Standing(Standing::new()),
            _ => return false,
        };
        self.change_state(ctx, config, next);
        true
    }

    fn change_state(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, next: State) {
        let next = enter(next, ctx, config, self.movement);
        debug!("Grounded: {} -> {}", self.current.describe(), next.describe());
        *self.current = next;
    }
}

impl Behavior for Grounded {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.on_enter(ctx, config);
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
        if !self.settle(ctx, config) {
            self.current.set_movement(ctx, config, movement);
        }
    }

    fn notify_contacts(
        &mut self,
        ctx: &mut PlayerContext<'_>,
        config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        self.on_ceiling = contacts.on_ceiling;
        self.settle(ctx, config);
        self.current.notify_contacts(ctx, config, contacts);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, dt: f32) {
        self.current.update(ctx, config, dt);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.fixed_update(ctx, config);
    }

    fn can_jump(&self) -> bool {
        self.current.can_jump() && !self.on_ceiling
    }
}

/// Upright: idle or moving
#[derive(Debug, Clone)]
pub struct Standing {
    current: Box<State>,
}

impl Default for Standing {
    fn default() -> Self {
        Self::new()
    }
}

impl Standing {
    pub fn new() -> Self {
        Self {
            current: Box::new(State::Idle(Idle::new())),
        }
    }

    pub fn current(&self) -> &State {
        &self.current
    }
}

impl Behavior for Standing {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.on_enter(ctx, config);
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, movement: Vec2) {
        let moving = movement.x.abs() > config.lateral_input_dead_zone;
        let next = match (moving, self.current.kind()) {
            (true, StateKind::Idle) => State::GroundMove(GroundMove::new()),
            (false, StateKind::GroundMove) => State::Idle(Idle::new()),
            _ => {
                self.current.set_movement(ctx, config, movement);
                return;
            }
        };

        let next = enter(next, ctx, config, movement);
        debug!("Standing: {} -> {}", self.current.kind(), next.kind());
        *self.current = next;
    }

    fn notify_contacts(
        &mut self,
        ctx: &mut PlayerContext<'_>,
        config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        self.current.notify_contacts(ctx, config, contacts);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, dt: f32) {
        self.current.update(ctx, config, dt);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.fixed_update(ctx, config);
    }

    fn can_jump(&self) -> bool {
        self.current.can_jump()
    }
}

/// Crouched: idle or crawling
#[derive(Debug, Clone)]
pub struct Crouched {
    current: Box<State>,
}

impl Default for Crouched {
    fn default() -> Self {
        Self::new()
    }
}

impl Crouched {
    pub fn new() -> Self {
        Self {
            current: Box::new(State::CrouchIdle(CrouchIdle::new())),
        }
    }

    pub fn current(&self) -> &State {
        &self.current
    }
}

impl Behavior for Crouched {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.on_enter(ctx, config);
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, movement: Vec2) {
        let moving = movement.x.abs() > config.crouch_lateral_input_dead_zone;
        let next = match (moving, self.current.kind()) {
            (true, StateKind::CrouchIdle) => State::CrouchMove(CrouchMove::new()),
            (false, StateKind::CrouchMove) => State::CrouchIdle(CrouchIdle::new()),
            _ => {
                self.current.set_movement(ctx, config, movement);
                return;
            }
        };

        let next = enter(next, ctx, config, movement);
        debug!("Crouched: {} -> {}", self.current.kind(), next.kind());
        *self.current = next;
    }

    fn notify_contacts(
        &mut self,
        ctx: &mut PlayerContext<'_>,
        config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        self.current.notify_contacts(ctx, config, contacts);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, dt: f32) {
        self.current.update(ctx, config, dt);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.fixed_update(ctx, config);
    }

    fn can_jump(&self) -> bool {
        self.current.can_jump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::test_support::Rig;

    fn leaf(state: &Grounded) -> StateKind {
        state.current().active_leaf().kind()
    }

    #[test]
    fn test_crouch_threshold_is_inclusive() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut grounded = Grounded::new(Contacts::grounded());

        grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(0.0, -0.5));
        assert_eq!(leaf(&grounded), StateKind::CrouchIdle);

        grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(0.0, -0.49));
        assert_eq!(leaf(&grounded), StateKind::Idle);
    }

    #[test]
    fn test_crouch_lateral_dead_zone() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut grounded = Grounded::new(Contacts::grounded());

        for x in [0.0, 0.1, -0.1] {
            grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(x, -0.8));
            assert_eq!(leaf(&grounded), StateKind::CrouchIdle, "x = {x}");
        }

        for x in [0.11, -0.707] {
            grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(x, -0.707));
            assert_eq!(leaf(&grounded), StateKind::CrouchMove, "x = {x}");
        }
    }

    #[test]
    fn test_ceiling_keeps_crouch_and_blocks_jump() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut grounded = Grounded::new(Contacts::grounded());

        grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(0.0, -1.0));
        grounded.notify_contacts(&mut rig.ctx(), &config, &Contacts::grounded().with_ceiling());
        assert!(!grounded.can_jump());

        grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(0.5, 0.0));
        assert_eq!(leaf(&grounded), StateKind::CrouchMove, "sticky crouch");
        assert!(!grounded.can_jump());

        grounded.notify_contacts(&mut rig.ctx(), &config, &Contacts::grounded());
        assert_eq!(leaf(&grounded), StateKind::GroundMove, "stands up once clear");
        assert!(grounded.can_jump());
    }

    #[test]
    fn test_ceiling_does_not_force_a_crouch() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut grounded = Grounded::new(Contacts::grounded().with_ceiling());

        grounded.set_movement(&mut rig.ctx(), &config, Vec2::new(1.0, 0.0));
        assert_eq!(leaf(&grounded), StateKind::GroundMove);
        assert!(grounded.is_on_ceiling());
        assert!(!grounded.can_jump());
    }

    #[test]
    fn test_any_nonzero_lateral_input_moves_by_default() {
        let mut config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut standing = Standing::new();

        standing.set_movement(&mut rig.ctx(), &config, Vec2::new(0.05, 0.0));
        assert_eq!(standing.current().kind(), StateKind::GroundMove);

        config.lateral_input_dead_zone = 0.1;
        standing.set_movement(&mut rig.ctx(), &config, Vec2::new(0.05, 0.0));
        assert_eq!(standing.current().kind(), StateKind::Idle);
    }

    #[test]
    fn test_standing_keeps_child_for_same_input() {
        let config = PlayerConfig::default();
        let mut rig = Rig::default();
        let mut standing = Standing::new();

        standing.set_movement(&mut rig.ctx(), &config, Vec2::new(1.0, 0.0));
        standing.set_movement(&mut rig.ctx(), &config, Vec2::new(0.3, 0.0));
        assert_eq!(standing.current().kind(), StateKind::GroundMove);

        standing.set_movement(&mut rig.ctx(), &config, Vec2::ZERO);
        assert_eq!(standing.current().kind(), StateKind::Idle);
    }
}
