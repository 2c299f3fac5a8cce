// Environment contact data delivered to the state machine once per physics step

/// Which side of the character a touched wall is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// Horizontal direction pointing away from the wall (+1 right, -1 left, 0 none)
    pub fn away_direction(&self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// Facing that turns the character's back to the wall, if there is one
    pub fn facing_away(&self) -> Option<bool> {
        match self {
            Self::None => None,
            Self::Left => Some(true),
            Self::Right => Some(false),
        }
    }
}

/// Snapshot of what the character is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub grounded: bool,
    pub on_wall: bool,
    pub wall_side: WallSide,
    pub on_ceiling: bool,
}

impl Contacts {
    /// Standing on the ground and touching nothing else
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    /// Touching nothing at all
    pub fn airborne() -> Self {
        Self::default()
    }

    /// Touching a wall on the given side, not grounded
    pub fn on_wall(side: WallSide) -> Self {
        Self {
            on_wall: side != WallSide::None,
            wall_side: side,
            ..Default::default()
        }
    }

    /// Same contacts with the ceiling flag set
    pub fn with_ceiling(mut self) -> Self {
        self.on_ceiling = true;
        self
    }
}

/// Anything that can report the character's contacts for the current step
pub trait ContactSensor {
    fn contacts(&self) -> Contacts;
}
