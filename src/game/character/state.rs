// Sprite selection and input direction types

use std::fmt;

/// Which spritesheet the character is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SpriteKey {
    /// Standing still
    #[default]
    Stance,
    /// Moving in any direction
    Walk,
    /// Primary pointer held
    Slash,
}

impl SpriteKey {
    pub const ALL: [SpriteKey; 3] = [SpriteKey::Stance, SpriteKey::Walk, SpriteKey::Slash];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Stance => "stance",
            Self::Walk => "walk",
            Self::Slash => "slash",
        }
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Directional key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn axis(&self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Sign of the velocity component in screen space (y grows downward)
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left | Self::Up => -1.0,
            Self::Right | Self::Down => 1.0,
        }
    }

    /// Facing implied by this direction, if it is horizontal
    pub fn facing_right(&self) -> Option<bool> {
        match self {
            Self::Left => Some(false),
            Self::Right => Some(true),
            Self::Up | Self::Down => None,
        }
    }
}
