// Character system
//
// This module contains the single animated character:
// - Spritesheet layouts and the sprite registry
// - Frame timer for the active sheet
// - Position, velocity and facing
// - The character itself, driven by host callbacks

pub mod animation;
pub mod character;
pub mod motion;
pub mod sprite_set;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationState, FRAME_INTERVAL};
pub use character::{AnimatedCharacter, CharacterCommand, DrawCommand, InputMemory};
pub use motion::{MotionState, WALK_SPEED};
pub use sprite_set::{SheetLayout, SpriteRegistry, SpriteSet, SpriteSlot};
pub use state::{Axis, Direction, SpriteKey};
