// Capabilities the state machine drives: the body, the clip player and facing

use glam::Vec2;

use super::animation::Clip;

/// How a force passed to [`BodyController::apply_force`] is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Accumulated over the coming physics step
    Continuous,
    /// Instant change of momentum
    Impulse,
}

/// Rigid body operations needed by the movement states
pub trait BodyController {
    /// Current linear velocity
    fn velocity(&self) -> Vec2;

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, velocity: Vec2);

    /// Current gravity multiplier
    fn gravity_scale(&self) -> f32;

    /// Change the gravity multiplier
    fn set_gravity_scale(&mut self, scale: f32);

    /// Apply a force or impulse through the centre of mass
    fn apply_force(&mut self, force: Vec2, mode: ForceMode);

    /// Body mass
    fn mass(&self) -> f32;

    /// Overwrite only the horizontal velocity
    fn set_velocity_x(&mut self, x: f32) {
        let velocity = self.velocity();
        self.set_velocity(Vec2::new(x, velocity.y));
    }

    /// Overwrite only the vertical velocity
    fn set_velocity_y(&mut self, y: f32) {
        let velocity = self.velocity();
        self.set_velocity(Vec2::new(velocity.x, y));
    }
}

/// Plays animation clips. Playing the clip that is already playing must do nothing.
pub trait ClipPlayer {
    fn play(&mut self, clip: Clip);
}

/// Write access to which way the character faces
pub trait FacingController {
    fn is_facing_right(&self) -> bool;
    fn set_facing_right(&mut self, facing_right: bool);

    /// Face the way lateral input points; zero input keeps the current facing
    fn face_towards(&mut self, lateral: f32) {
        if lateral > 0.0 {
            self.set_facing_right(true);
        } else if lateral < 0.0 {
            self.set_facing_right(false);
        }
    }
}

/// The facing cell owned by the character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    right: bool,
}

impl Default for Facing {
    fn default() -> Self {
        Self { right: true }
    }
}

impl FacingController for Facing {
    fn is_facing_right(&self) -> bool {
        self.right
    }

    fn set_facing_right(&mut self, facing_right: bool) {
        self.right = facing_right;
    }
}

/// Everything a state may touch while handling one call
pub struct PlayerContext<'a> {
    pub body: &'a mut dyn BodyController,
    pub clips: &'a mut dyn ClipPlayer,
    pub facing: &'a mut dyn FacingController,
}

impl<'a> PlayerContext<'a> {
    pub fn new(
        body: &'a mut dyn BodyController,
        clips: &'a mut dyn ClipPlayer,
        facing: &'a mut dyn FacingController,
    ) -> Self {
        Self {
            body,
            clips,
            facing,
        }
    }
}
