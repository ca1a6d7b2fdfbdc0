// Spritesheet layouts and the sprite registry

use std::collections::BTreeMap;

use glam::Vec2;
use log::{error, info};

use super::state::SpriteKey;
use crate::engine::assets::{AssetError, AssetLoader, SheetImage};

/// How a sheet file is cut into frames
///
/// Sheets are single-row horizontal strips. When no fixed cell size is given the
/// frame width is `image.width / frame_count` and the height is the full image.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Path relative to the asset root
    pub path: String,
    pub frame_count: u32,
    pub fixed_size: Option<Vec2>,
}

impl SheetLayout {
    pub fn strip(path: &str, frame_count: u32) -> Self {
        Self {
            path: path.to_string(),
            frame_count,
            fixed_size: None,
        }
    }

    pub fn with_fixed_size(mut self, width: f32, height: f32) -> Self {
        self.fixed_size = Some(Vec2::new(width, height));
        self
    }

    /// Layouts of the three character sheets
    pub fn standard(key: SpriteKey) -> Self {
        match key {
            SpriteKey::Stance => Self::strip("1/stance/all.png", 10),
            SpriteKey::Walk => Self::strip("1/walk/all.png", 6),
            // 755x140 sheet, 5 cells
            SpriteKey::Slash => Self::strip("1/slash/all.png", 5).with_fixed_size(151.0, 140.0),
        }
    }

    fn validate(&self, key: SpriteKey, image: &SheetImage) -> Result<(), AssetError> {
        let invalid = |reason: String| AssetError::InvalidLayout {
            name: key.name().to_string(),
            reason,
        };

        if self.frame_count == 0 {
            return Err(invalid("frame count must be positive".to_string()));
        }
        if let Some(size) = self.fixed_size {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(invalid(format!("fixed cell {}x{} is empty", size.x, size.y)));
            }
            let strip_width = size.x * self.frame_count as f32;
            if strip_width > image.width() as f32 || size.y > image.height() as f32 {
                return Err(invalid(format!(
                    "{} cells of {}x{} do not fit in {}x{}",
                    self.frame_count,
                    size.x,
                    size.y,
                    image.width(),
                    image.height()
                )));
            }
        }
        Ok(())
    }
}

/// A decoded sheet together with its layout
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub image: SheetImage,
    pub frame_count: u32,
    pub fixed_size: Option<Vec2>,
}

impl SpriteSet {
    pub fn new(image: SheetImage, frame_count: u32) -> Self {
        Self {
            image,
            frame_count,
            fixed_size: None,
        }
    }

    pub fn with_fixed_size(mut self, width: f32, height: f32) -> Self {
        self.fixed_size = Some(Vec2::new(width, height));
        self
    }

    /// Size of a single frame in pixels
    pub fn frame_size(&self) -> Vec2 {
        self.fixed_size.unwrap_or_else(|| {
            Vec2::new(
                self.image.width() as f32 / self.frame_count as f32,
                self.image.height() as f32,
            )
        })
    }
}

/// Registry entry; `sprite` is `None` when the sheet failed to load
#[derive(Debug, Clone)]
pub struct SpriteSlot {
    pub frame_count: u32,
    pub sprite: Option<SpriteSet>,
}

impl SpriteSlot {
    pub fn is_usable(&self) -> bool {
        self.sprite.is_some()
    }
}

/// Name to sheet mapping, built once at startup
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    slots: BTreeMap<SpriteKey, SpriteSlot>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all three standard sheets; the first failure aborts
    pub fn load(loader: &AssetLoader) -> Result<Self, AssetError> {
        let mut registry = Self::new();
        for key in SpriteKey::ALL {
            let sprite = Self::load_sheet(loader, key, &SheetLayout::standard(key))?;
            registry.insert(key, sprite);
        }
        info!("Loaded {} sprite sheets", registry.slots.len());
        Ok(registry)
    }

    /// Load all three standard sheets, keeping failed ones as unusable slots
    pub fn load_partial(loader: &AssetLoader) -> (Self, Vec<AssetError>) {
        let mut registry = Self::new();
        let mut errors = Vec::new();

        for key in SpriteKey::ALL {
            let layout = SheetLayout::standard(key);
            match Self::load_sheet(loader, key, &layout) {
                Ok(sprite) => registry.insert(key, sprite),
                Err(err) => {
                    error!("Sprite '{}' is unusable: {}", key, err);
                    registry.insert_missing(key, layout.frame_count);
                    errors.push(err);
                }
            }
        }

        (registry, errors)
    }

    fn load_sheet(
        loader: &AssetLoader,
        key: SpriteKey,
        layout: &SheetLayout,
    ) -> Result<SpriteSet, AssetError> {
        let image = loader.load_image(&layout.path)?;
        layout.validate(key, &image)?;

        let mut sprite = SpriteSet::new(image, layout.frame_count);
        sprite.fixed_size = layout.fixed_size;
        Ok(sprite)
    }

    pub fn insert(&mut self, key: SpriteKey, sprite: SpriteSet) {
        self.slots.insert(
            key,
            SpriteSlot {
                frame_count: sprite.frame_count,
                sprite: Some(sprite),
            },
        );
    }

    pub fn insert_missing(&mut self, key: SpriteKey, frame_count: u32) {
        self.slots.insert(
            key,
            SpriteSlot {
                frame_count,
                sprite: None,
            },
        );
    }

    pub fn slot(&self, key: SpriteKey) -> Option<&SpriteSlot> {
        self.slots.get(&key)
    }

    /// The loaded sheet for `key`, if it exists and decoded successfully
    pub fn get(&self, key: SpriteKey) -> Option<&SpriteSet> {
        self.slots.get(&key).and_then(|slot| slot.sprite.as_ref())
    }

    /// Frame size for `key`, zero if the sheet is unusable
    pub fn frame_size(&self, key: SpriteKey) -> Vec2 {
        self.get(key).map(SpriteSet::frame_size).unwrap_or(Vec2::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteKey, &SpriteSlot)> {
        self.slots.iter().map(|(key, slot)| (*key, slot))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::RgbaImage;

    pub(crate) fn blank_sheet(width: u32, height: u32) -> SheetImage {
        SheetImage::new("test", RgbaImage::new(width, height))
    }

    /// Registry with the real sheet dimensions: stance 10x(60x80), walk 6x(50x90), slash 755x140
    pub(crate) fn standard_registry() -> SpriteRegistry {
        let mut registry = SpriteRegistry::new();
        registry.insert(SpriteKey::Stance, SpriteSet::new(blank_sheet(600, 80), 10));
        registry.insert(SpriteKey::Walk, SpriteSet::new(blank_sheet(300, 90), 6));
        registry.insert(
            SpriteKey::Slash,
            SpriteSet::new(blank_sheet(755, 140), 5).with_fixed_size(151.0, 140.0),
        );
        registry
    }

    #[test]
    fn test_standard_layouts() {
        assert_eq!(SheetLayout::standard(SpriteKey::Stance).frame_count, 10);
        assert_eq!(SheetLayout::standard(SpriteKey::Walk).frame_count, 6);

        let slash = SheetLayout::standard(SpriteKey::Slash);
        assert_eq!(slash.frame_count, 5);
        assert_eq!(slash.fixed_size, Some(Vec2::new(151.0, 140.0)));
        assert_eq!(slash.path, "1/slash/all.png");
    }

    #[test]
    fn test_derived_frame_size() {
        let sprite = SpriteSet::new(blank_sheet(600, 80), 10);
        assert_eq!(sprite.frame_size(), Vec2::new(60.0, 80.0));
    }

    #[test]
    fn test_fixed_frame_size_wins() {
        let sprite = SpriteSet::new(blank_sheet(800, 200), 5).with_fixed_size(151.0, 140.0);
        assert_eq!(sprite.frame_size(), Vec2::new(151.0, 140.0));
    }

    #[test]
    fn test_fractional_frame_width() {
        let sprite = SpriteSet::new(blank_sheet(100, 10), 3);
        approx::assert_relative_eq!(sprite.frame_size().x, 100.0 / 3.0);
    }

    #[test]
    fn test_layout_rejects_zero_frames() {
        let layout = SheetLayout::strip("x.png", 0);
        let err = layout.validate(SpriteKey::Walk, &blank_sheet(10, 10)).unwrap_err();
        assert!(matches!(err, AssetError::InvalidLayout { .. }));
    }

    #[test]
    fn test_layout_rejects_oversized_cells() {
        let layout = SheetLayout::standard(SpriteKey::Slash);
        assert!(layout.validate(SpriteKey::Slash, &blank_sheet(755, 140)).is_ok());
        assert!(layout.validate(SpriteKey::Slash, &blank_sheet(700, 140)).is_err());
    }

    #[test]
    fn test_registry_lookup() {
        let registry = standard_registry();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.frame_size(SpriteKey::Walk), Vec2::new(50.0, 90.0));
        assert!(registry.get(SpriteKey::Slash).is_some());
    }

    #[test]
    fn test_registry_iterates_in_key_order() {
        let registry = standard_registry();
        let keys: Vec<_> = registry.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, SpriteKey::ALL.to_vec());
    }

    #[test]
    fn test_missing_slot_is_unusable() {
        let mut registry = standard_registry();
        registry.insert_missing(SpriteKey::Walk, 6);

        let slot = registry.slot(SpriteKey::Walk).unwrap();
        assert!(!slot.is_usable());
        assert_eq!(slot.frame_count, 6);
        assert!(registry.get(SpriteKey::Walk).is_none());
        assert_eq!(registry.frame_size(SpriteKey::Walk), Vec2::ZERO);
    }

    #[test]
    fn test_load_fails_without_assets() {
        let loader = AssetLoader::new("/definitely/not/here");
        assert!(SpriteRegistry::load(&loader).is_err());
    }

    #[test]
    fn test_load_partial_keeps_every_slot() {
        let loader = AssetLoader::new("/definitely/not/here");
        let (registry, errors) = SpriteRegistry::load_partial(&loader);

        assert_eq!(errors.len(), 3);
        assert_eq!(registry.len(), 3);
        assert!(registry.iter().all(|(_, slot)| !slot.is_usable()));
        assert_eq!(registry.slot(SpriteKey::Stance).unwrap().frame_count, 10);
    }

    fn write_png(path: &std::path::Path, width: u32, height: u32) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_missing_sheet_leaves_others_drawable() {
        use crate::game::character::AnimatedCharacter;
        use std::time::Duration;

        let dir = std::env::temp_dir().join(format!("sprite-animator-partial-{}", std::process::id()));
        write_png(&dir.join("1/stance/all.png"), 600, 80);
        write_png(&dir.join("1/walk/all.png"), 300, 90);

        let loader = AssetLoader::new(&dir);
        assert!(SpriteRegistry::load(&loader).is_err());

        let (registry, errors) = SpriteRegistry::load_partial(&loader);
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], AssetError::NotFound(_)));
        assert!(!registry.slot(SpriteKey::Slash).unwrap().is_usable());

        let ms = Duration::from_millis;
        let mut character = AnimatedCharacter::initialize(registry, Vec2::new(800.0, 600.0), ms(0));
        let stance = character.on_frame(ms(16)).unwrap();
        assert_eq!(stance.sprite, SpriteKey::Stance);
        assert_eq!(stance.source.width, 60.0);

        // Nothing is drawn and nothing moves while the broken sheet is active
        character.on_primary_pointer_down(ms(20));
        assert_eq!(character.on_frame(ms(40)), None);

        character.on_primary_pointer_up(ms(60));
        character.set_direction_key(crate::game::character::Direction::Right, true, ms(70));
        let walk = character.on_frame(ms(80)).unwrap();
        assert_eq!(walk.sprite, SpriteKey::Walk);
        assert_eq!(walk.source.height, 90.0);
    }
}
