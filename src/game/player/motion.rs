// Velocity and force policies shared by the movement states

use glam::Vec2;

use crate::core::math::{approx_zero, shares_sign};

use super::actuators::{BodyController, ForceMode};
use super::config::{MovementMode, PlayerConfig};

/// Steer horizontal velocity towards `target`.
///
/// In direct mode the velocity is overwritten. In accelerated mode a force is
/// applied that would close `rate` of the gap within one physics step, where
/// `rate` is the acceleration rate while the body already moves the requested
/// way (or stands still) and the deceleration rate otherwise.
pub fn drive_horizontal(body: &mut dyn BodyController, config: &PlayerConfig, target: f32) {
    match config.movement {
        MovementMode::Direct => body.set_velocity_x(target),
        MovementMode::Accelerated {
            acceleration,
            deceleration,
        } => {
            let current = body.velocity().x;
            let rate = if approx_zero(current) || shares_sign(current, target) {
                acceleration
            } else {
                deceleration
            };
            let force = (target - current) * body.mass() / config.fixed_timestep * rate;
            body.apply_force(Vec2::new(force, 0.0), ForceMode::Continuous);
        }
    }
}

/// Bring the body to exactly `velocity`, instantly.
///
/// Accelerated mode goes through an impulse so the body's own force pipeline
/// sees the launch.
pub fn launch(body: &mut dyn BodyController, config: &PlayerConfig, velocity: Vec2) {
    match config.movement {
        MovementMode::Direct => body.set_velocity(velocity),
        MovementMode::Accelerated { .. } => {
            let impulse = (velocity - body.velocity()) * body.mass();
            body.apply_force(impulse, ForceMode::Impulse);
        }
    }
}

/// Like [`launch`] but only along the vertical axis
pub fn launch_vertical(body: &mut dyn BodyController, config: &PlayerConfig, speed: f32) {
    let velocity = Vec2::new(body.velocity().x, speed);
    launch(body, config, velocity);
}
