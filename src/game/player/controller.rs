// Player entity: wires the state machine to physics, sensing, input and animation

use glam::Vec2;
use log::{debug, info};
use thiserror::Error;

use crate::engine::input::{InputEvent, InputQueue};
use crate::engine::physics::{
    presets, ContactProbe, PhysicsWorld, ProbeError, RapierBody, RigidBodyHandle,
};

use super::actuators::{Facing, FacingController, PlayerContext};
use super::animation::AnimationPlayer;
use super::config::{ConfigError, PlayerConfig};
use super::contacts::{ContactSensor, Contacts};
use super::machine::PlayerStateMachine;

/// Errors raised while spawning or driving a player
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("invalid player configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid contact probe: {0}")]
    Probe(#[from] ProbeError),

    #[error("player body {0:?} is not in the physics world")]
    MissingBody(RigidBodyHandle),
}

/// A player-controlled character living in a [`PhysicsWorld`]
#[derive(Debug)]
pub struct PlayerController {
    /// Handle to the character's rigid body in the physics world
    body: RigidBodyHandle,
    probe: ContactProbe,
    machine: PlayerStateMachine,
    facing: Facing,
    animation: AnimationPlayer,
    input: InputQueue,
    last_path: String,
}

impl PlayerController {
    /// Create a player at (`x`, `y`) and add its body to the world.
    /// The collider matches the probe's half extents. Contacts are sensed
    /// right away, so a player spawned in the air starts out falling.
    pub fn spawn(
        config: PlayerConfig,
        probe: ContactProbe,
        physics: &mut PhysicsWorld,
        x: f32,
        y: f32,
    ) -> Result<Self, PlayerError> {
        let machine = PlayerStateMachine::new(config)?;

        let size = probe.half_extents() * 2.0;
        let body = physics.add_rigid_body(presets::player_body(x, y));
        physics.add_collider(presets::player_collider(size.x, size.y), body);
        physics.update_query_pipeline();

        let mut player = Self {
            body,
            probe,
            machine,
            facing: Facing::default(),
            animation: AnimationPlayer::with_player_animations(),
            input: InputQueue::new(),
            last_path: String::new(),
        };

        // Pick the right initial state before the first frame plays a clip
        player.sense(physics)?;
        player.last_path = player.machine.describe();
        info!("Spawned player at ({x:.2}, {y:.2}) in {}", player.last_path);

        Ok(player)
    }

    /// Queue an input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Per-frame update: apply queued input, tick timers and animation
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) -> Result<(), PlayerError> {
        let rigid_body = physics
            .get_rigid_body_mut(self.body)
            .ok_or(PlayerError::MissingBody(self.body))?;
        let mut body = RapierBody::new(rigid_body);

        {
            let mut ctx = PlayerContext::new(&mut body, &mut self.animation, &mut self.facing);
            for event in self.input.drain() {
                match event {
                    InputEvent::Move(movement) => self.machine.set_movement(&mut ctx, movement),
                    InputEvent::JumpPressed => self.machine.jump(&mut ctx),
                    InputEvent::JumpReleased => self.machine.jump_release(&mut ctx),
                }
            }
            self.machine.update(&mut ctx, dt);
        }

        self.animation.update(dt);
        self.animation
            .set_flip_horizontal(!self.facing.is_facing_right());
        self.log_transition();
        Ok(())
    }

    /// Per-physics-step update: sense contacts, then let the active state
    /// shape velocity and forces. Step the world afterwards.
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld) -> Result<(), PlayerError> {
        self.sense(physics)?;

        let rigid_body = physics
            .get_rigid_body_mut(self.body)
            .ok_or(PlayerError::MissingBody(self.body))?;
        let mut body = RapierBody::new(rigid_body);
        body.reset_forces();

        let mut ctx = PlayerContext::new(&mut body, &mut self.animation, &mut self.facing);
        self.machine.fixed_update(&mut ctx);

        self.log_transition();
        Ok(())
    }

    /// Probe the world around the body and hand the contacts to the machine
    fn sense(&mut self, physics: &mut PhysicsWorld) -> Result<(), PlayerError> {
        let contacts = self
            .probe
            .at(physics, self.body, self.facing.is_facing_right())
            .ok_or(PlayerError::MissingBody(self.body))?
            .contacts();

        let rigid_body = physics
            .get_rigid_body_mut(self.body)
            .ok_or(PlayerError::MissingBody(self.body))?;
        let mut body = RapierBody::new(rigid_body);

        let mut ctx = PlayerContext::new(&mut body, &mut self.animation, &mut self.facing);
        self.machine.notify_contacts(&mut ctx, contacts);
        Ok(())
    }

    fn log_transition(&mut self) {
        let path = self.machine.describe();
        if path != self.last_path {
            debug!("Player: {} -> {}", self.last_path, path);
            self.last_path = path;
        }
    }

    pub fn machine(&self) -> &PlayerStateMachine {
        &self.machine
    }

    /// Active state path such as `Grounded/Standing/Idle`
    pub fn describe(&self) -> String {
        self.machine.describe()
    }

    pub fn contacts(&self) -> Contacts {
        self.machine.contacts()
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing.is_facing_right()
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.get_rigid_body(self.body).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    /// Get character's current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.get_rigid_body(self.body).map(|body| {
            let vel = body.linvel();
            Vec2::new(vel.x, vel.y)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FIXED_TIMESTEP;
    use crate::game::player::state::StateKind;
    use crate::game::player::WallSide;
    use approx::assert_relative_eq;

    const HALF: Vec2 = Vec2::new(0.5, 1.0);

    fn level() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        let floor = physics.add_rigid_body(presets::platform_body(0.0, -0.5));
        physics.add_collider(presets::platform_collider(40.0, 1.0), floor);
        physics
    }

    fn spawn(physics: &mut PhysicsWorld, x: f32, y: f32) -> PlayerController {
        let probe = ContactProbe::new(HALF).unwrap();
        PlayerController::spawn(PlayerConfig::default(), probe, physics, x, y).unwrap()
    }

    fn run(player: &mut PlayerController, physics: &mut PhysicsWorld, steps: usize) {
        for _ in 0..steps {
            player.update(physics, FIXED_TIMESTEP).unwrap();
            player.fixed_update(physics).unwrap();
            physics.step();
        }
    }

    #[test]
    fn test_spawn_rejects_bad_config() {
        let mut physics = level();
        let config = PlayerConfig {
            jump_impulse: 0.0,
            ..Default::default()
        };
        let probe = ContactProbe::new(HALF).unwrap();

        let result = PlayerController::spawn(config, probe, &mut physics, 0.0, 1.0);
        assert!(matches!(result, Err(PlayerError::Config(_))));
    }

    #[test]
    fn test_spawned_on_floor_stays_idle() {
        let mut physics = level();
        let mut player = spawn(&mut physics, 0.0, 1.0);

        run(&mut player, &mut physics, 10);

        assert_eq!(player.describe(), "Grounded/Standing/Idle");
        assert!(player.contacts().grounded);
        assert_eq!(player.animation().current_animation(), "idle");
    }

    /// Floor plus a wall whose left face is at x = 2.5
    fn level_with_wall() -> PhysicsWorld {
        let mut physics = level();
        let wall = physics.add_rigid_body(presets::platform_body(3.0, 10.0));
        physics.add_collider(presets::platform_collider(1.0, 20.0), wall);
        physics
    }

    #[test]
    fn test_spawn_in_air_starts_falling() {
        let mut physics = level();
        let mut player = spawn(&mut physics, 0.0, 4.0);
        assert_eq!(player.describe(), "Airborne/Fall");

        player.update(&mut physics, FIXED_TIMESTEP).unwrap();
        assert_eq!(player.animation().current_animation(), "falling");
        assert_eq!(player.animation().clip_changes(), 2, "idle, then falling");
    }

    #[test]
    fn test_drop_lands_on_floor() {
        let mut physics = level();
        let mut player = spawn(&mut physics, 0.0, 4.0);

        run(&mut player, &mut physics, 2);
        assert_eq!(player.describe(), "Airborne/Fall");

        run(&mut player, &mut physics, 120);
        assert_eq!(player.describe(), "Grounded/Standing/Idle");
    }

    #[test]
    fn test_run_faces_and_moves() {
        let mut physics = level();
        let mut player = spawn(&mut physics, 0.0, 1.0);

        player.push_input(InputEvent::movement(-1.0, 0.0));
        run(&mut player, &mut physics, 30);

        assert_eq!(player.machine().active_leaf().kind(), StateKind::GroundMove);
        assert!(!player.is_facing_right());
        assert!(player.animation().is_flipped_horizontal());
        assert!(player.position(&physics).unwrap().x < -1.0);
    }

    #[test]
    fn test_jump_leaves_ground_and_lands() {
        let mut physics = level();
        let mut player = spawn(&mut physics, 0.0, 1.0);
        run(&mut player, &mut physics, 5);

        player.push_input(InputEvent::JumpPressed);
        run(&mut player, &mut physics, 1);
        assert_eq!(player.describe(), "Airborne/Jump");
        assert!(player.velocity(&physics).unwrap().y > 5.0);

        run(&mut player, &mut physics, 240);
        assert_eq!(player.describe(), "Grounded/Standing/Idle");
    }

    #[test]
    fn test_wall_slide_descends_then_wall_jumps_away() {
        let config = PlayerConfig::default();
        let mut physics = level_with_wall();
        let mut player = spawn(&mut physics, 1.9, 10.0);

        player.push_input(InputEvent::movement(1.0, 0.0));
        run(&mut player, &mut physics, 60);
        assert_eq!(player.describe(), "Airborne/WallSlide");
        assert_eq!(player.contacts().wall_side, WallSide::Right);
        assert!(!player.is_facing_right(), "faces away from the wall");

        let start = player.position(&physics).unwrap();
        run(&mut player, &mut physics, 30);
        let end = player.position(&physics).unwrap();

        assert_eq!(player.describe(), "Airborne/WallSlide");
        assert!(end.x < 2.1, "held against the wall, not through it");
        // Half a second at the capped slide speed
        assert_relative_eq!(end.y - start.y, config.max_wall_slide_speed * 0.5, epsilon = 0.1);
        assert_relative_eq!(
            player.velocity(&physics).unwrap().y,
            config.max_wall_slide_speed,
            epsilon = 0.15
        );

        player.push_input(InputEvent::JumpPressed);
        run(&mut player, &mut physics, 1);
        assert_eq!(player.describe(), "Airborne/WallJump");

        let velocity = player.velocity(&physics).unwrap();
        assert!(velocity.x < -5.0, "launched away from the wall: {velocity}");
        assert!(velocity.y > 5.0);
        assert!(!player.is_facing_right());

        run(&mut player, &mut physics, 10);
        assert!(player.position(&physics).unwrap().x < end.x - 0.5);
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let mut physics = level();
        let mut player = spawn(&mut physics, 0.0, 1.0);
        physics.remove_rigid_body(player.body_handle());

        assert!(matches!(
            player.fixed_update(&mut physics),
            Err(PlayerError::MissingBody(_))
        ));
        assert!(player.update(&mut physics, FIXED_TIMESTEP).is_err());
    }
}
