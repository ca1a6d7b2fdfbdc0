// Asset loading
//
// Resolves sheet paths under an asset root and decodes them into RGBA bitmaps.

mod loader;

pub use loader::{AssetLoader, SheetImage};

use std::path::PathBuf;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid sheet layout for {name}: {reason}")]
    InvalidLayout { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
