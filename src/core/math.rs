// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
///
/// Unlike `f32::clamp` this never panics when `min > max`; the lower bound is
/// checked first and the upper bound wins, which matches how a box wider than the
/// canvas gets pinned.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let value = if value < min { min } else { value };
    if value > max {
        max
    } else {
        value
    }
}

/// Keep a box of `size` centered at `center` inside `[0, bounds]` on both axes
pub fn clamp_center(center: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        clamp(center.x, half.x, bounds.x - half.x),
        clamp(center.y, half.y, bounds.y - half.y),
    )
}

/// Axis-aligned rectangle in pixel space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` whose center sits at `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Convert an 8-bit sRGB channel to linear light
///
/// wgpu clear colours are linear when the surface format is sRGB.
pub fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_bounds_prefers_max() {
        // Box wider than the canvas: left edge check then right edge check
        assert_eq!(clamp(50.0, 80.0, 20.0), 20.0);
    }

    #[test]
    fn test_clamp_center_inside_untouched() {
        let c = clamp_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 40.0), Vec2::new(800.0, 600.0));
        assert_eq!(c, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_clamp_center_all_edges() {
        let size = Vec2::new(20.0, 40.0);
        let bounds = Vec2::new(800.0, 600.0);

        assert_eq!(clamp_center(Vec2::new(-5.0, 3.0), size, bounds), Vec2::new(10.0, 20.0));
        assert_eq!(
            clamp_center(Vec2::new(900.0, 700.0), size, bounds),
            Vec2::new(790.0, 580.0)
        );
    }

    #[test]
    fn test_frame_rect_centered() {
        let rect = FrameRect::centered(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(rect, FrameRect::new(80.0, 40.0, 40.0, 20.0));
        assert_eq!(rect.center(), Vec2::new(100.0, 50.0));
        assert_eq!(rect.max(), Vec2::new(120.0, 60.0));
    }

    #[test]
    fn test_srgb_to_linear() {
        assert_relative_eq!(srgb_to_linear(0), 0.0);
        assert_relative_eq!(srgb_to_linear(255), 1.0);
        assert_relative_eq!(srgb_to_linear(128), 0.2158605, epsilon = 1e-6);
    }
}
