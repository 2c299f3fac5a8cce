// Input event queue drained once per frame

use glam::Vec2;
use std::collections::VecDeque;

/// Maximum number of queued events kept between two frames
pub const MAX_QUEUE_SIZE: usize = 32;

/// A discrete input from the binding layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Movement stick or keys, both axes in [-1, 1]
    Move(Vec2),
    JumpPressed,
    JumpReleased,
}

impl InputEvent {
    /// Movement event with each axis clamped to [-1, 1]
    pub fn movement(x: f32, y: f32) -> Self {
        Self::Move(Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE))
    }
}

/// Input events received since the last frame, in arrival order.
///
/// Consecutive movement events collapse into the latest one. Jump presses and
/// releases are never merged, so a press and release within one frame still
/// produce a jump followed by a short hop.
#[derive(Debug)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        }
    }

    /// Add an event to the queue
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::Move(movement) = event {
            if let Some(InputEvent::Move(last)) = self.events.back_mut() {
                *last = movement;
                return;
            }
        }

        self.events.push_back(event);

        // Keep queue size under control
        if self.events.len() > MAX_QUEUE_SIZE {
            if let Some(dropped) = self.events.pop_front() {
                log::warn!("Input queue full, dropping {:?}", dropped);
            }
        }
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    /// Clear all queued events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
