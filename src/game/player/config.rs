// Player tuning values and their validation

use crate::engine::game_loop::FIXED_TIMESTEP;

/// How horizontal movement is applied to the body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementMode {
    /// Horizontal velocity is written directly every physics step
    Direct,
    /// Horizontal velocity is steered with forces.
    ///
    /// Both rates are fractions of the full velocity correction applied per
    /// physics step. `deceleration` is used when the body moves against the
    /// requested direction (or input is released).
    Accelerated { acceleration: f32, deceleration: f32 },
}

impl Default for MovementMode {
    fn default() -> Self {
        Self::Direct
    }
}

/// Errors raised when a configuration is rejected at spawn time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{field}' must be greater than 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("'{field}' must be greater than or equal to 0 (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("'max_walk_speed' ({walk}) must be less than or equal to 'max_run_speed' ({run})")]
    WalkFasterThanRun { walk: f32, run: f32 },

    #[error("'crouch_input_zone' must be in range [-1.0, 0.0] (got {0})")]
    CrouchInputZoneOutOfRange(f32),

    #[error("'max_wall_slide_speed' must be less than 0 (got {0})")]
    WallSlideSpeedNotDownward(f32),

    #[error("'{field}' must be in range (0.0, 1.0] (got {value})")]
    RateOutOfRange { field: &'static str, value: f32 },

    #[error("'deceleration' ({deceleration}) must be greater than or equal to 'acceleration' ({acceleration})")]
    DecelerationWeakerThanAcceleration { acceleration: f32, deceleration: f32 },
}

/// Movement tuning for a player character.
///
/// Loaded once when the character spawns and never mutated afterwards. All
/// speeds are in world units per second, durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    // Ground movement
    /// Maximum run speed
    pub max_run_speed: f32,
    /// Speeds up to this value play the walk clip instead of the jog clip
    pub max_walk_speed: f32,
    /// Lateral input magnitude at or below which the character stands idle
    pub lateral_input_dead_zone: f32,

    // Crouching
    /// Maximum walk speed while crouched
    pub max_crouch_walk_speed: f32,
    /// Vertical input at or below which the character crouches
    pub crouch_input_zone: f32,
    /// Lateral input magnitude at or below which a crouch stays idle
    pub crouch_lateral_input_dead_zone: f32,

    // Jumping
    /// Vertical launch speed of a jump (also the magnitude of a wall jump)
    pub jump_impulse: f32,
    /// How long an early jump press is remembered before landing
    pub jump_buffer: f32,
    /// How long a jump is still allowed after walking off a ledge
    pub coyote_time: f32,

    // Gravity
    /// Gravity scale while ascending from a jump
    pub jumping_gravity_scale: f32,
    /// Gravity scale while falling
    pub falling_gravity_scale: f32,
    /// Gravity scale while sliding down a wall
    pub wall_slide_gravity_scale: f32,
    /// Fastest downward speed while sliding down a wall (negative)
    pub max_wall_slide_speed: f32,

    // Simulation
    /// Duration of one physics step
    pub fixed_timestep: f32,
    /// Velocity or force based horizontal movement
    pub movement: MovementMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_run_speed: 10.0,
            max_walk_speed: 5.0,
            lateral_input_dead_zone: 0.0,

            max_crouch_walk_speed: 3.0,
            crouch_input_zone: -0.5,
            crouch_lateral_input_dead_zone: 0.1,

            jump_impulse: 10.0,
            jump_buffer: 0.1,
            coyote_time: 0.1,

            jumping_gravity_scale: 1.0,
            falling_gravity_scale: 2.0,
            wall_slide_gravity_scale: 0.5,
            max_wall_slide_speed: -3.0,

            fixed_timestep: FIXED_TIMESTEP,
            movement: MovementMode::Direct,
        }
    }
}

impl PlayerConfig {
    /// Switch to force based horizontal movement
    pub fn with_acceleration(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.movement = MovementMode::Accelerated {
            acceleration,
            deceleration,
        };
        self
    }

    /// Check every constraint, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_run_speed", self.max_run_speed)?;
        positive("max_walk_speed", self.max_walk_speed)?;
        if self.max_walk_speed > self.max_run_speed {
            return Err(ConfigError::WalkFasterThanRun {
                walk: self.max_walk_speed,
                run: self.max_run_speed,
            });
        }
        non_negative("lateral_input_dead_zone", self.lateral_input_dead_zone)?;

        positive("max_crouch_walk_speed", self.max_crouch_walk_speed)?;
        if !(-1.0..=0.0).contains(&self.crouch_input_zone) {
            return Err(ConfigError::CrouchInputZoneOutOfRange(
                self.crouch_input_zone,
            ));
        }
        non_negative(
            "crouch_lateral_input_dead_zone",
            self.crouch_lateral_input_dead_zone,
        )?;

        positive("jump_impulse", self.jump_impulse)?;
        non_negative("jump_buffer", self.jump_buffer)?;
        non_negative("coyote_time", self.coyote_time)?;

        positive("jumping_gravity_scale", self.jumping_gravity_scale)?;
        positive("falling_gravity_scale", self.falling_gravity_scale)?;
        positive("wall_slide_gravity_scale", self.wall_slide_gravity_scale)?;
        // NaN fails this comparison too
        if !(self.max_wall_slide_speed < 0.0) {
            return Err(ConfigError::WallSlideSpeedNotDownward(
                self.max_wall_slide_speed,
            ));
        }

        positive("fixed_timestep", self.fixed_timestep)?;

        if let MovementMode::Accelerated {
            acceleration,
            deceleration,
        } = self.movement
        {
            rate("acceleration", acceleration)?;
            rate("deceleration", deceleration)?;
            if deceleration < acceleration {
                return Err(ConfigError::DecelerationWeakerThanAcceleration {
                    acceleration,
                    deceleration,
                });
            }
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn rate(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { field, value })
    }
}
