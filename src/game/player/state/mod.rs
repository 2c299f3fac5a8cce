// Player locomotion state tree
//
// The tree has three levels:
// - Grounded (Standing | Crouched) and Airborne at the top
// - Standing (Idle | GroundMove) and Crouched (CrouchIdle | CrouchMove) below Grounded
// - Fall, Jump, WallSlide and WallJump directly below Airborne
//
// Every node is a variant of `State`. Composites own their current child as a
// boxed `State` and replace it wholesale on every transition.

mod air;
mod airborne;
mod ground;
mod grounded;

use std::fmt;

use glam::Vec2;

use super::actuators::PlayerContext;
use super::config::PlayerConfig;
use super::contacts::Contacts;

pub use air::{Fall, Jump, WallJump, WallSlide};
pub use airborne::Airborne;
pub use ground::{CrouchIdle, CrouchMove, GroundMove, Idle};
pub use grounded::{Crouched, Grounded, Standing};

/// The capability set every state implements.
///
/// All hooks except `can_jump` default to doing nothing so that leaves only
/// spell out what they react to.
pub trait Behavior {
    /// Called once after the state is constructed and has received the
    /// current movement input, before it becomes active
    fn on_enter(&mut self, _ctx: &mut PlayerContext<'_>, _config: &PlayerConfig) {}

    /// Latest movement input (x = lateral, y = vertical, both in [-1, 1])
    fn set_movement(
        &mut self,
        _ctx: &mut PlayerContext<'_>,
        _config: &PlayerConfig,
        _movement: Vec2,
    ) {
    }

    /// Contacts sensed for the current physics step
    fn notify_contacts(
        &mut self,
        _ctx: &mut PlayerContext<'_>,
        _config: &PlayerConfig,
        _contacts: &Contacts,
    ) {
    }

    /// Per-frame logic: timers and animation selection
    fn update(&mut self, _ctx: &mut PlayerContext<'_>, _config: &PlayerConfig, _dt: f32) {}

    /// Per-physics-step logic: velocities and forces
    fn fixed_update(&mut self, _ctx: &mut PlayerContext<'_>, _config: &PlayerConfig) {}

    /// Whether a jump command is honoured right now
    fn can_jump(&self) -> bool;
}

/// Discriminant of [`State`], handy for assertions and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    GroundMove,
    CrouchIdle,
    CrouchMove,
    Fall,
    Jump,
    WallSlide,
    WallJump,
    Grounded,
    Standing,
    Crouched,
    Airborne,
}

impl StateKind {
    /// Whether states of this kind have no children
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Self::Grounded | Self::Standing | Self::Crouched | Self::Airborne
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::GroundMove => "GroundMove",
            Self::CrouchIdle => "CrouchIdle",
            Self::CrouchMove => "CrouchMove",
            Self::Fall => "Fall",
            Self::Jump => "Jump",
            Self::WallSlide => "WallSlide",
            Self::WallJump => "WallJump",
            Self::Grounded => "Grounded",
            Self::Standing => "Standing",
            Self::Crouched => "Crouched",
            Self::Airborne => "Airborne",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any node of the state tree
#[derive(Debug, Clone)]
pub enum State {
    Idle(Idle),
    GroundMove(GroundMove),
    CrouchIdle(CrouchIdle),
    CrouchMove(CrouchMove),
    Fall(Fall),
    Jump(Jump),
    WallSlide(WallSlide),
    WallJump(WallJump),
    Grounded(Grounded),
    Standing(Standing),
    Crouched(Crouched),
    Airborne(Airborne),
}

/// Forward a call to whichever variant is held
macro_rules! dispatch {
    ($state:expr, $inner:ident => $call:expr) => {
        match $state {
            State::Idle($inner) => $call,
            State::GroundMove($inner) => $call,
            State::CrouchIdle($inner) => $call,
            State::CrouchMove($inner) => $call,
            State::Fall($inner) => $call,
            State::Jump($inner) => $call,
            State::WallSlide($inner) => $call,
            State::WallJump($inner) => $call,
            State::Grounded($inner) => $call,
            State::Standing($inner) => $call,
            State::Crouched($inner) => $call,
            State::Airborne($inner) => $call,
        }
    };
}

impl State {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle(_) => StateKind::Idle,
            Self::GroundMove(_) => StateKind::GroundMove,
            Self::CrouchIdle(_) => StateKind::CrouchIdle,
            Self::CrouchMove(_) => StateKind::CrouchMove,
            Self::Fall(_) => StateKind::Fall,
            Self::Jump(_) => StateKind::Jump,
            Self::WallSlide(_) => StateKind::WallSlide,
            Self::WallJump(_) => StateKind::WallJump,
            Self::Grounded(_) => StateKind::Grounded,
            Self::Standing(_) => StateKind::Standing,
            Self::Crouched(_) => StateKind::Crouched,
            Self::Airborne(_) => StateKind::Airborne,
        }
    }

    /// The composite's current child, `None` for leaves
    pub fn child(&self) -> Option<&State> {
        match self {
            Self::Grounded(state) => Some(state.current()),
            Self::Standing(state) => Some(state.current()),
            Self::Crouched(state) => Some(state.current()),
            Self::Airborne(state) => Some(state.current()),
            _ => None,
        }
    }

    /// Follow current children down to the leaf that is actually running
    pub fn active_leaf(&self) -> &State {
        match self.child() {
            Some(child) => child.active_leaf(),
            None => self,
        }
    }

    /// Kinds from this state down to the active leaf
    pub fn path(&self) -> Vec<StateKind> {
        let mut path = vec![self.kind()];
        let mut state = self;
        while let Some(child) = state.child() {
            path.push(child.kind());
            state = child;
        }
        path
    }

    /// Path rendered as `Grounded/Standing/Idle`
    pub fn describe(&self) -> String {
        self.path()
            .iter()
            .map(StateKind::name)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Behavior for State {
    fn on_enter(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        dispatch!(self, state => state.on_enter(ctx, config))
    }

    fn set_movement(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, movement: Vec2) {
        dispatch!(self, state => state.set_movement(ctx, config, movement))
    }

    fn notify_contacts(
        &mut self,
        ctx: &mut PlayerContext<'_>,
        config: &PlayerConfig,
        contacts: &Contacts,
    ) {
        dispatch!(self, state => state.notify_contacts(ctx, config, contacts))
    }

    fn update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig, dt: f32) {
        dispatch!(self, state => state.update(ctx, config, dt))
    }

    fn fixed_update(&mut self, ctx: &mut PlayerContext<'_>, config: &PlayerConfig) {
        dispatch!(self, state => state.fixed_update(ctx, config))
    }

    fn can_jump(&self) -> bool {
        dispatch!(self, state => state.can_jump())
    }
}

/// Prepare a freshly constructed state for activation: hand it the last known
/// movement input, then run its entry hook. The caller swaps it in afterwards,
/// so no tick ever sees a state that has not received its input.
pub(crate) fn enter(
    mut next: State,
    ctx: &mut PlayerContext<'_>,
    config: &PlayerConfig,
    movement: Vec2,
) -> State {
    next.set_movement(ctx, config, movement);
    next.on_enter(ctx, config);
    next
}
