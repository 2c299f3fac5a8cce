use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

use rusted_platformer::engine::game_loop::FixedStepClock;
use rusted_platformer::engine::input::InputEvent;
use rusted_platformer::engine::physics::{presets, ContactProbe, PhysicsWorld};
use rusted_platformer::game::player::{PlayerConfig, PlayerController};

/// Simulated frame length
const FRAME_TIME: Duration = Duration::from_millis(20);

/// How long the demo runs, in seconds
const DEMO_LENGTH: f32 = 6.0;

/// Scripted input: (time in seconds, event)
fn timeline() -> Vec<(f32, InputEvent)> {
    vec![
        (0.2, InputEvent::movement(1.0, 0.0)),
        (0.8, InputEvent::JumpPressed),
        (0.9, InputEvent::JumpReleased), // short hop
        (1.8, InputEvent::movement(0.0, -1.0)),
        (2.3, InputEvent::movement(0.6, -0.8)), // crawl
        (2.8, InputEvent::movement(1.0, 0.0)),
        (3.0, InputEvent::JumpPressed), // into the wall
        (3.1, InputEvent::JumpReleased),
        (4.4, InputEvent::JumpPressed), // off the wall
        (4.5, InputEvent::JumpReleased),
        (4.6, InputEvent::movement(0.0, 0.0)),
    ]
}

/// Floor plus a tall wall on the right
fn build_level(physics: &mut PhysicsWorld) {
    let floor = physics.add_rigid_body(presets::platform_body(0.0, -0.5));
    physics.add_collider(presets::platform_collider(60.0, 1.0), floor);

    let wall = physics.add_rigid_body(presets::platform_body(24.0, 10.0));
    physics.add_collider(presets::platform_collider(1.0, 20.0), wall);
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Rusted Platformer demo...");

    let mut physics = PhysicsWorld::new();
    build_level(&mut physics);

    let probe = ContactProbe::new(Vec2::new(0.5, 1.0)).context("building contact probe")?;
    let mut player = PlayerController::spawn(PlayerConfig::default(), probe, &mut physics, 0.0, 1.0)
        .context("spawning player")?;

    let mut clock = FixedStepClock::new();
    let mut script = timeline().into_iter().peekable();
    let mut elapsed = 0.0;
    let mut last_path = player.describe();

    while elapsed < DEMO_LENGTH {
        let steps = clock.advance(FRAME_TIME);
        elapsed += clock.frame_delta();

        while let Some((_, event)) = script.next_if(|(at, _)| *at <= elapsed) {
            info!("t={elapsed:.2}s input {event:?}");
            player.push_input(event);
        }

        player.update(&mut physics, clock.frame_delta())?;
        for _ in 0..steps {
            player.fixed_update(&mut physics)?;
            physics.step();
        }

        let path = player.describe();
        if path != last_path {
            let position = player.position(&physics).unwrap_or_default();
            info!(
                "t={elapsed:.2}s {last_path} -> {path} at ({:.2}, {:.2})",
                position.x, position.y
            );
            last_path = path;
        }
    }

    info!(
        "Demo finished after {} frames and {} physics steps",
        clock.frame_count(),
        clock.step_count()
    );
    Ok(())
}
