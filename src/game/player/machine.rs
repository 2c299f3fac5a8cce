// Root of the player state machine: ground/air transitions and buffered input

use glam::Vec2;
use log::{debug, trace};

use super::actuators::PlayerContext;
use super::config::{ConfigError, PlayerConfig};
use super::contacts::Contacts;
use super::cooldown::Cooldown;
use super::state::{enter, Airborne, Behavior, Grounded, State, StateKind};

/// Fraction of upward speed kept when the jump button is released early
pub const SHORT_HOP_FACTOR: f32 = 0.5;

/// Top of the state tree.
///
/// Owns the Grounded/Airborne decision, the jump buffer and the coyote timer.
/// Collaborators are handed in with every call through a [`PlayerContext`].
#[derive(Debug, Clone)]
pub struct PlayerStateMachine {
    config: PlayerConfig,
    current: State,
    movement: Vec2,
    contacts: Contacts,
    jump_buffer: Cooldown,
    coyote: Cooldown,
}

impl PlayerStateMachine {
    /// Validate `config` and start standing idle on the ground
    pub fn new(config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let contacts = Contacts::grounded();
        Ok(Self {
            config,
            current: State::Grounded(Grounded::new(contacts)),
            movement: Vec2::ZERO,
            contacts,
            jump_buffer: Cooldown::new(),
            coyote: Cooldown::new(),
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The top-level state (Grounded or Airborne)
    pub fn current(&self) -> &State {
        &self.current
    }

    pub fn active_leaf(&self) -> &State {
        self.current.active_leaf()
    }

    pub fn path(&self) -> Vec<StateKind> {
        self.current.path()
    }

    /// Active path such as `Airborne/WallSlide`
    pub fn describe(&self) -> String {
        self.current.describe()
    }

    pub fn can_jump(&self) -> bool {
        self.current.can_jump()
    }

    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    pub fn jump_buffer(&self) -> &Cooldown {
        &self.jump_buffer
    }

    pub fn coyote(&self) -> &Cooldown {
        &self.coyote
    }

    pub fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, movement: Vec2) {
        let config = self.config;
        self.movement = movement;
        self.current.set_movement(ctx, &config, movement);
    }

    /// Jump now if allowed, otherwise remember the request for a while
    pub fn jump(&mut self, ctx: &mut PlayerContext<'_>) {
        let config = self.config;

        if self.current.can_jump() {
            let next = match self.current.active_leaf() {
                State::WallSlide(slide) => Airborne::wall_jumping(self.contacts, slide.wall_side()),
                _ => Airborne::jumping(self.contacts),
            };
            self.change_state(ctx, State::Airborne(next));
            self.coyote.clear();
            self.jump_buffer.clear();
            return;
        }

        if self.coyote.is_running() {
            if let State::Airborne(airborne) = &mut self.current {
                debug!("Coyote jump with {:.3}s left", self.coyote.remaining());
                airborne.force_jump(ctx, &config);
                self.coyote.clear();
                self.jump_buffer.clear();
                return;
            }
        }

        self.jump_buffer.arm(config.jump_buffer);
        trace!("Jump buffered for {}s", config.jump_buffer);
    }

    /// Cut an ascent short
    pub fn jump_release(&mut self, ctx: &mut PlayerContext<'_>) {
        let velocity = ctx.body.velocity();
        if velocity.y > 0.0 {
            ctx.body.set_velocity_y(velocity.y * SHORT_HOP_FACTOR);
        }
    }

    /// React to the contacts sensed for this physics step
    pub fn notify_contacts(&mut self, ctx: &mut PlayerContext<'_>, contacts: Contacts) {
        let config = self.config;
        self.contacts = contacts;

        let grounded_state = matches!(self.current, State::Grounded(_));
        let rising = self.active_leaf().kind() == StateKind::Jump;

        if grounded_state && !contacts.grounded {
            self.coyote.arm(config.coyote_time);
            trace!("Coyote window opened for {}s", config.coyote_time);
            let next = Airborne::falling(contacts, config.coyote_time);
            self.change_state(ctx, State::Airborne(next));
        } else if !grounded_state && contacts.grounded && !rising {
            self.change_state(ctx, State::Grounded(Grounded::new(contacts)));
            if self.jump_buffer.is_running() {
                debug!("Buffered jump on landing");
                self.jump(ctx);
            } else {
                self.set_movement(ctx, self.movement);
            }
        }

        self.current.notify_contacts(ctx, &config, &contacts);
    }

    /// Per-frame tick: animation choice and timers
    pub fn update(&mut self, ctx: &mut PlayerContext<'_>, dt: f32) {
        let config = self.config;
        self.current.update(ctx, &config, dt);
        self.jump_buffer.tick(dt);
        self.coyote.tick(dt);
    }

    /// Per-physics-step tick
    pub fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>) {
        let config = self.config;
        self.current.fixed_update(ctx, &config);
    }

    fn change_state(&mut self, ctx: &mut PlayerContext<'_>, next: State) {
        let config = self.config;
        let next = enter(next, ctx, &config, self.movement);
        debug!("{} -> {}", self.current.describe(), next.describe());
        self.current = next;
    }
}
