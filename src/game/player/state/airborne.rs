// Composite state while off the ground

use glam::Vec2;
use log::debug;

use super::{enter, Behavior, Fall, Jump, State, StateKind, WallJump, WallSlide};
use crate::game::player::actuators::PlayerContext;
use crate::game::player::config::PlayerConfig;
use crate::game::player::contacts::{Contacts, WallSide};

/// In the air: falling, jumping, sliding down a wall or jumping off one.
///
/// After every physics step of the child the composite decides whether the
/// ascent is over and whether a wall is being touched.
#[derive(Debug, Clone)]
pub struct Airborne {
    current: Box<State>,
    movement: Vec2,
    contacts: Contacts,
}

impl Airborne {
    pub fn new(contacts: Contacts, child: State) -> Self {
        Self {
            current: Box::new(child),
            movement: Vec2::ZERO,
            contacts,
        }
    }

    /// Airborne with a fall that allows jumping for `coyote_time` seconds
    pub fn falling(contacts: Contacts, coyote_time: f32) -> Self {
        Self::new(contacts, State::Fall(Fall::new(coyote_time)))
    }

    pub fn jumping(contacts: Contacts) -> Self {
        Self::new(contacts, State::Jump(Jump::new()))
    }

    pub fn wall_jumping(contacts: Contacts, wall_side: WallSide) -> Self {
        Self::new(contacts, State::WallJump(WallJump::new(wall_side)))
    }

    pub fn current(&self) -> &State {
        &self.current
    }

    /// Last contacts forwarded to this composite
    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    /// Switch the child to a fresh jump without leaving the air
    pub fn force_jump(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.change_state(ctx, config, State::Jump(Jump::new()));
    }

    fn change_state(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, next: State) {
        let next = enter(next, ctx, config, self.movement);
        debug!("Airborne: {} -> {}", self.current.kind(), next.kind());
        *self.current = next;
    }

    fn settle(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        let descending = ctx.body.velocity().y <= 0.0;
        let on_wall = self.contacts.on_wall;

        let next = match self.current.kind() {
            StateKind::Jump | StateKind::WallJump if descending => {
                if on_wall {
                    State::WallSlide(WallSlide::new(self.contacts.wall_side))
                } else {
                    State::Fall(Fall::new(0.0))
                }
            }
            StateKind::Fall if descending && on_wall => {
                State::WallSlide(WallSlide::new(self.contacts.wall_side))
            }
            StateKind::WallSlide if !on_wall => State::Fall(Fall::new(0.0)),
            _ => return,
        };

        self.change_state(ctx, config, next);
    }
}

impl Behavior for Airborne {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.on_enter(ctx, config);
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, movement: Vec2) {
        self.movement = movement;
        self.current.set_movement(ctx, config, movement);
    }

    fn notify_contacts(
        &mut self,
        ctx: &mut PlayerContext<'_>,
        config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        self.contacts = *contacts;
        self.current.notify_contacts(ctx, config, contacts);
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, dt: f32) {
        self.current.update(ctx, config, dt);
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        self.current.fixed_update(ctx, config);
        self.settle(ctx, config);
    }

    fn can_jump(&self) -> bool {
        self.current.can_jump()
    }
}
