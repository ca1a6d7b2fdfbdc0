// Vertex structure for 2D sprite rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::core::math::FrameRect;

/// Vertex for 2D sprite rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in canvas pixels
    pub position: [f32; 2],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec2, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Index order for a quad built by `quad`
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Four corners of `destination` (TL, TR, BR, BL) with UVs spanning `uv_min..uv_max`
pub fn quad(destination: &FrameRect, uv_min: Vec2, uv_max: Vec2) -> [Vertex; 4] {
    let min = destination.min();
    let max = destination.max();
    [
        Vertex::new(Vec2::new(min.x, min.y), Vec2::new(uv_min.x, uv_min.y)),
        Vertex::new(Vec2::new(max.x, min.y), Vec2::new(uv_max.x, uv_min.y)),
        Vertex::new(Vec2::new(max.x, max.y), Vec2::new(uv_max.x, uv_max.y)),
        Vertex::new(Vec2::new(min.x, max.y), Vec2::new(uv_min.x, uv_max.y)),
    ]
}
