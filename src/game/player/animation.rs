// Player animation clips and playback

use std::collections::HashMap;

use super::actuators::ClipPlayer;

/// Every clip the player's states can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Idle,
    Walk,
    Jog,
    Jump,
    Falling,
    CrouchIdle,
    CrouchWalk,
    CrouchSlide,
    WallCling,
    WallSlide,
}

impl Clip {
    /// All clips, in sprite sheet row order
    pub const ALL: [Clip; 10] = [
        Clip::Idle,
        Clip::Walk,
        Clip::Jog,
        Clip::Jump,
        Clip::Falling,
        Clip::CrouchIdle,
        Clip::CrouchWalk,
        Clip::CrouchSlide,
        Clip::WallCling,
        Clip::WallSlide,
    ];

    /// Name of the clip in the sprite sheet
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Jog => "jog",
            Self::Jump => "jump",
            Self::Falling => "falling",
            Self::CrouchIdle => "crouch_idle",
            Self::CrouchWalk => "crouch_walk",
            Self::CrouchSlide => "crouch_slide",
            Self::WallCling => "wall_cling",
            Self::WallSlide => "wall_slide",
        }
    }
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "walk", "jump")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Manages animation playback for a character
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
    /// Number of times a different clip was started
    clip_changes: usize,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            flip_horizontal: false,
            clip_changes: 0,
        }
    }

    /// Create an animation player with every player clip registered
    pub fn with_player_animations() -> Self {
        let mut player = Self::new();

        for clip in Clip::ALL {
            let animation = match clip {
                // Take-off and landing poses hold their last frame
                Clip::Jump => AnimationClip::one_shot(clip.name(), 6, 12.0),
                Clip::Walk | Clip::Jog | Clip::CrouchWalk => {
                    AnimationClip::looping(clip.name(), 8, 12.0)
                }
                _ => AnimationClip::looping(clip.name(), 8, 10.0),
            };
            player.add_animation(animation);
        }

        player.play_name(Clip::Idle.name());
        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Play an animation by name. Restarting the current animation is a no-op.
    pub fn play_name(&mut self, name: &str) {
        if self.current_animation != name {
            self.current_animation = name.to_string();
            self.current_frame = 0;
            self.frame_timer = 0.0;
            self.playing = true;
            self.clip_changes += 1;
        }
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Update the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };
        // Empty clips and non-positive frame durations have nothing to advance
        if clip.frame_count == 0 || !(clip.frame_duration > 0.0) {
            return;
        }

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// How many times playback switched to a different clip
    pub fn clip_changes(&self) -> usize {
        self.clip_changes
    }
}

impl ClipPlayer for AnimationPlayer {
    fn play(&mut self, clip: Clip) {
        self.play_name(clip.name());
    }
}
