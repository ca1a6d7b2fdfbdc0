// Asset loading functionality

use super::AssetError;
use image::RgbaImage;
use log::info;
use std::path::{Path, PathBuf};

/// Image file extensions the loader will decode
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A decoded spritesheet bitmap
#[derive(Debug, Clone)]
pub struct SheetImage {
    /// Path the image was loaded from (used as a debug label)
    pub label: String,
    pub pixels: RgbaImage,
}

impl SheetImage {
    pub fn new(label: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            label: label.into(),
            pixels,
        }
    }

    /// Decode an image from encoded bytes (PNG/JPEG)
    pub fn from_bytes(label: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            path: PathBuf::from(label),
            source,
        })?;
        Ok(Self::new(label, img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Asset loader responsible for finding and decoding sheet files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path));
        }

        Ok(std::fs::read(&path)?)
    }

    /// Load and decode a spritesheet image
    pub fn load_image(&self, name: &str) -> Result<SheetImage, AssetError> {
        let path = self.resolve_path(name);
        if !Self::is_supported(&path) {
            return Err(AssetError::UnsupportedFormat(path));
        }

        let bytes = self.load_bytes(name)?;
        let image = SheetImage::from_bytes(&path.to_string_lossy(), &bytes)?;
        info!(
            "Loaded sheet {} ({}x{})",
            image.label,
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn is_supported(path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_ascii_lowercase();
                SUPPORTED_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}
