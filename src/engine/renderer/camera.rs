// Screen-space camera: one world unit is one canvas pixel, origin top-left, y down

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

#[derive(Debug, Clone)]
pub struct Camera {
    /// Canvas size in pixels
    viewport: Vec2,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport: Vec2::new(viewport_width, viewport_height),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        // bottom = height, top = 0 flips y so pixel rows grow downward
        self.view_proj =
            Mat4::orthographic_rh(0.0, self.viewport.x, self.viewport.y, 0.0, -1.0, 1.0);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.update_view_proj();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
