// Contact sensing by raycasting around the player's body

use glam::Vec2;
use rapier2d::prelude::*;
use thiserror::Error;

use super::world::PhysicsWorld;
use crate::game::player::{ContactSensor, Contacts, WallSide};

/// Errors raised when building a [`ContactProbe`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProbeError {
    #[error("half extents must be positive, got ({x}, {y})")]
    ExtentsNotPositive { x: f32, y: f32 },

    #[error("{which} probe distance must be positive, got {value}")]
    DistanceNotPositive { which: &'static str, value: f32 },
}

/// How far past the body's edges to look for ground, walls and ceilings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactProbe {
    half_extents: Vec2,
    ground_distance: f32,
    wall_distance: f32,
    ceiling_distance: f32,
}

impl ContactProbe {
    pub const DEFAULT_GROUND_DISTANCE: f32 = 0.05;
    pub const DEFAULT_WALL_DISTANCE: f32 = 0.2;
    pub const DEFAULT_CEILING_DISTANCE: f32 = 0.05;

    /// Probe for a body of the given half size with default distances
    pub fn new(half_extents: Vec2) -> Result<Self, ProbeError> {
        Self::with_distances(
            half_extents,
            Self::DEFAULT_GROUND_DISTANCE,
            Self::DEFAULT_WALL_DISTANCE,
            Self::DEFAULT_CEILING_DISTANCE,
        )
    }

    pub fn with_distances(
        half_extents: Vec2,
        ground: f32,
        wall: f32,
        ceiling: f32,
    ) -> Result<Self, ProbeError> {
        if !(half_extents.x > 0.0 && half_extents.y > 0.0) {
            return Err(ProbeError::ExtentsNotPositive {
                x: half_extents.x,
                y: half_extents.y,
            });
        }
        for (which, value) in [("ground", ground), ("wall", wall), ("ceiling", ceiling)] {
            if !(value > 0.0) {
                return Err(ProbeError::DistanceNotPositive { which, value });
            }
        }

        Ok(Self {
            half_extents,
            ground_distance: ground,
            wall_distance: wall,
            ceiling_distance: ceiling,
        })
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Bind the probe to a body for one sensing pass.
    /// Returns `None` if the body is not in the world.
    pub fn at<'w>(
        &'w self,
        world: &'w PhysicsWorld,
        body: RigidBodyHandle,
        facing_right: bool,
    ) -> Option<ProbeSite<'w>> {
        let translation = *world.get_rigid_body(body)?.translation();
        Some(ProbeSite {
            probe: self,
            world,
            body,
            origin: translation,
            facing_right,
        })
    }
}

/// A probe placed on a body inside a world
pub struct ProbeSite<'w> {
    probe: &'w ContactProbe,
    world: &'w PhysicsWorld,
    body: RigidBodyHandle,
    origin: Vector<Real>,
    facing_right: bool,
}

impl ProbeSite<'_> {
    fn hits(&self, direction: Vector<Real>, reach: Real) -> bool {
        let filter = QueryFilter::default()
            .exclude_sensors()
            .exclude_rigid_body(self.body);
        self.world
            .raycast(self.origin, direction, reach, true, filter)
            .is_some()
    }
}

impl ContactSensor for ProbeSite<'_> {
    fn contacts(&self) -> Contacts {
        let half = self.probe.half_extents;

        let grounded = self.hits(vector![0.0, -1.0], half.y + self.probe.ground_distance);
        let on_ceiling = self.hits(vector![0.0, 1.0], half.y + self.probe.ceiling_distance);
        let left = self.hits(vector![-1.0, 0.0], half.x + self.probe.wall_distance);
        let right = self.hits(vector![1.0, 0.0], half.x + self.probe.wall_distance);

        let wall_side = match (left, right) {
            (true, true) if self.facing_right => WallSide::Right,
            (true, true) => WallSide::Left,
            (true, false) => WallSide::Left,
            (false, true) => WallSide::Right,
            (false, false) => WallSide::None,
        };

        Contacts {
            grounded,
            on_wall: wall_side != WallSide::None,
            wall_side,
            on_ceiling,
        }
    }
}
