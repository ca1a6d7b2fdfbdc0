// The animated character driven by the host callbacks

use std::collections::HashSet;
use std::time::Duration;

use glam::Vec2;
use log::{debug, info};

use super::animation::AnimationState;
use super::motion::{MotionState, WALK_SPEED};
use super::sprite_set::SpriteRegistry;
use super::state::{Direction, SpriteKey};
use crate::core::math::FrameRect;
use crate::game::config::CharacterTuning;

/// A single draw call: copy `source` from the sheet into `destination`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteKey,
    /// Region of the sheet, in sheet pixels
    pub source: FrameRect,
    /// Region of the canvas, same size as `source`
    pub destination: FrameRect,
    /// Mirror about the destination's own center
    pub flip_horizontal: bool,
}

/// Input translated into character terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterCommand {
    Direction { direction: Direction, pressed: bool },
    PrimaryPointer { pressed: bool },
}

/// What the character remembers about input between callbacks
#[derive(Debug, Clone, Default)]
pub struct InputMemory {
    /// Sprite active before the slash started
    pub saved_sprite: Option<SpriteKey>,
    /// Directional keys currently down
    pub held: HashSet<Direction>,
    pub walking: bool,
}

impl InputMemory {
    pub fn any_direction_held(&self) -> bool {
        !self.held.is_empty()
    }
}

/// One character: sheets, frame timer, motion and input memory
///
/// Every host callback maps to one method here. Nothing is shared, so the host
/// simply owns the value and calls into it from its event loop.
#[derive(Debug)]
pub struct AnimatedCharacter {
    registry: SpriteRegistry,
    animation: AnimationState,
    motion: MotionState,
    input: InputMemory,
    canvas: Vec2,
    walk_speed: f32,
}

impl AnimatedCharacter {
    /// Create the character standing in the middle of the canvas
    pub fn initialize(registry: SpriteRegistry, canvas: Vec2, now: Duration) -> Self {
        let center = canvas / 2.0;
        info!(
            "Character spawned at ({}, {}) on a {}x{} canvas",
            center.x, center.y, canvas.x, canvas.y
        );

        Self {
            registry,
            animation: AnimationState::new(SpriteKey::Stance, now),
            motion: MotionState::new(center),
            input: InputMemory::default(),
            canvas,
            walk_speed: WALK_SPEED,
        }
    }

    /// Replace the frame interval and walk speed
    pub fn with_tuning(mut self, tuning: &CharacterTuning) -> Self {
        self.animation = AnimationState::with_interval(
            self.animation.active(),
            self.animation.last_advance(),
            tuning.frame_interval,
        );
        self.walk_speed = tuning.walk_speed;
        self
    }

    /// Per-refresh update; returns what to draw, or `None` if the active sheet is unusable
    pub fn on_frame(&mut self, now: Duration) -> Option<DrawCommand> {
        let active = self.animation.active();
        let (frame_count, frame_size) = {
            let sprite = self.registry.get(active)?;
            (sprite.frame_count, sprite.frame_size())
        };

        self.animation.tick(now, frame_count);

        self.motion.step();
        self.motion.clamp_to(frame_size, self.canvas);

        let offset = self.animation.frame_index() as f32 * frame_size.x;
        Some(DrawCommand {
            sprite: active,
            source: FrameRect::new(offset, 0.0, frame_size.x, frame_size.y),
            destination: FrameRect::centered(self.motion.center, frame_size),
            flip_horizontal: !self.motion.facing_right,
        })
    }

    /// Dispatch a translated input event
    pub fn apply(&mut self, command: CharacterCommand, now: Duration) {
        match command {
            CharacterCommand::Direction { direction, pressed } => {
                self.set_direction_key(direction, pressed, now)
            }
            CharacterCommand::PrimaryPointer { pressed: true } => {
                self.on_primary_pointer_down(now)
            }
            CharacterCommand::PrimaryPointer { pressed: false } => {
                self.on_primary_pointer_up(now)
            }
        }
    }

    pub fn set_direction_key(&mut self, direction: Direction, pressed: bool, now: Duration) {
        if pressed {
            self.animation.play(SpriteKey::Walk, now);
            self.input.held.insert(direction);
            self.input.walking = true;
            self.motion.push(direction, self.walk_speed);
            return;
        }

        self.input.held.remove(&direction);
        self.motion.release(direction);

        if !self.input.any_direction_held() {
            self.animation.play(SpriteKey::Stance, now);
            self.input.walking = false;
        }
    }

    pub fn on_primary_pointer_down(&mut self, now: Duration) {
        self.input.saved_sprite = Some(self.animation.active());
        self.animation.play_from_start(SpriteKey::Slash, now);
    }

    pub fn on_primary_pointer_up(&mut self, now: Duration) {
        let restore = if self.input.any_direction_held() {
            SpriteKey::Walk
        } else {
            self.input.saved_sprite.unwrap_or(SpriteKey::Stance)
        };
        self.animation.play_from_start(restore, now);
        self.input.saved_sprite = None;
    }

    /// New canvas bounds; the character is pulled back in on the next frame
    pub fn on_resize(&mut self, canvas: Vec2) {
        debug!("Canvas resized to {}x{}", canvas.x, canvas.y);
        self.canvas = canvas;
    }

    pub fn active_sprite(&self) -> SpriteKey {
        self.animation.active()
    }

    pub fn frame_index(&self) -> u32 {
        self.animation.frame_index()
    }

    /// Frame size of the active sheet, zero if it is unusable
    pub fn frame_size(&self) -> Vec2 {
        self.registry.frame_size(self.animation.active())
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn input(&self) -> &InputMemory {
        &self.input
    }

    pub fn registry(&self) -> &SpriteRegistry {
        &self.registry
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn is_walking(&self) -> bool {
        self.input.walking
    }
}
