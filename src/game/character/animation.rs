// Frame timer for the active spritesheet

use std::time::Duration;

use log::debug;

use super::state::SpriteKey;

/// Time each frame stays on screen
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Which sheet is showing, which frame of it, and when that frame started
///
/// Pacing is wall-clock based: the frame advances when at least `interval` has
/// passed since the last advance, no matter how often `tick` is called.
#[derive(Debug, Clone)]
pub struct AnimationState {
    active: SpriteKey,
    frame_index: u32,
    last_advance: Duration,
    interval: Duration,
}

impl AnimationState {
    pub fn new(active: SpriteKey, now: Duration) -> Self {
        Self::with_interval(active, now, FRAME_INTERVAL)
    }

    pub fn with_interval(active: SpriteKey, now: Duration, interval: Duration) -> Self {
        Self {
            active,
            frame_index: 0,
            last_advance: now,
            interval,
        }
    }

    /// Switch to `key` unless it is already active
    ///
    /// Returns true if the sprite changed.
    pub fn play(&mut self, key: SpriteKey, now: Duration) -> bool {
        if self.active == key {
            return false;
        }
        self.play_from_start(key, now);
        true
    }

    /// Switch to `key` and restart it, even if it is already active
    pub fn play_from_start(&mut self, key: SpriteKey, now: Duration) {
        if self.active != key {
            debug!("Sprite {} -> {}", self.active, key);
        }
        self.active = key;
        self.frame_index = 0;
        self.last_advance = now;
    }

    /// Advance one frame if the interval has elapsed
    ///
    /// Returns true if the frame index changed. `frame_count` must be positive.
    pub fn tick(&mut self, now: Duration, frame_count: u32) -> bool {
        if now.saturating_sub(self.last_advance) < self.interval {
            return false;
        }
        self.frame_index = (self.frame_index + 1) % frame_count.max(1);
        self.last_advance = now;
        true
    }

    pub fn active(&self) -> SpriteKey {
        self.active
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn last_advance(&self) -> Duration {
        self.last_advance
    }
}
