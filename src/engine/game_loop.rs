// Fixed timestep clock
//
// Accumulates variable frame time and tells the caller how many fixed
// physics steps to run this frame. Per-frame logic runs once per frame with
// the real frame time, physics runs at a constant rate.

use std::time::Duration;

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// Fixed-step accumulator
#[derive(Debug)]
pub struct FixedStepClock {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,

    frame_count: u64,
    step_count: u64,

    /// Length of the last frame in seconds
    frame_delta: f32,
}

impl FixedStepClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            frame_count: 0,
            step_count: 0,
            frame_delta: 0.0,
        }
    }

    /// Begin a frame of the given length, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.frame_delta = frame_time.as_secs_f32();

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop time we could not catch up on instead of carrying it forward
        if steps == MAX_PHYSICS_STEPS && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::warn!(
                "Frame took {:.1}ms, dropping {:.1}ms of simulation",
                self.frame_delta * 1000.0,
                self.accumulator.as_secs_f32() * 1000.0
            );
            self.accumulator = Duration::ZERO;
        }

        self.step_count += steps as u64;
        steps
    }

    /// Length of the last frame (in seconds)
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new()
    }
}
