// Application configuration
//
// Everything is configured in code; there are no config files. Two environment
// variables override the asset settings, `RUST_LOG` is read by env_logger.

use std::path::PathBuf;
use std::time::Duration;

use super::character::{FRAME_INTERVAL, WALK_SPEED};
use crate::engine::input::InputBindings;

/// Overrides `AnimatorConfig::asset_root`
pub const ASSET_ROOT_VAR: &str = "SPRITE_ANIMATOR_ASSETS";

/// Set to `1`/`true` to abort startup on the first sheet that fails to load
pub const STRICT_ASSETS_VAR: &str = "SPRITE_ANIMATOR_STRICT_ASSETS";

/// Timing and speed of the character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterTuning {
    /// Time each animation frame stays on screen
    pub frame_interval: Duration,
    /// Pixels per tick while a direction is held
    pub walk_speed: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            frame_interval: FRAME_INTERVAL,
            walk_speed: WALK_SPEED,
        }
    }
}

/// Top-level settings for the animator window
#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    pub window_title: String,
    /// Initial logical window size
    pub window_size: (u32, u32),
    /// Directory the sheet paths are resolved against
    pub asset_root: PathBuf,
    /// Canvas clear colour (sRGB)
    pub background: [u8; 3],
    /// Abort startup when any sheet fails to load; otherwise that sprite is
    /// unusable for the session and is simply not drawn
    pub strict_assets: bool,
    pub tuning: CharacterTuning,
    pub bindings: InputBindings,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            window_title: "Sprite Animator".to_string(),
            window_size: (1280, 720),
            asset_root: PathBuf::from("assets"),
            background: [0xe6, 0xcc, 0xb2],
            strict_assets: false,
            tuning: CharacterTuning::default(),
            bindings: InputBindings::default(),
        }
    }
}

impl AnimatorConfig {
    /// Defaults with the environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(root) = lookup(ASSET_ROOT_VAR).filter(|root| !root.is_empty()) {
            config = config.with_asset_root(root);
        }
        if let Some(value) = lookup(STRICT_ASSETS_VAR) {
            let strict = matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
            config = config.with_strict_assets(strict);
        }
        config
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn with_strict_assets(mut self, strict: bool) -> Self {
        self.strict_assets = strict;
        self
    }
}
