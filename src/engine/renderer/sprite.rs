// Sprite rendering: one textured quad per frame

use std::collections::HashMap;

use super::camera::{Camera, CameraUniform};
use super::texture::Texture;
use super::vertex::{quad, Vertex, QUAD_INDICES};
use crate::engine::assets::SheetImage;
use crate::game::character::{DrawCommand, SpriteKey};
use anyhow::Result;
use glam::Vec2;
use wgpu::util::DeviceExt;

/// Quad for a draw command on a sheet of `sheet_size` pixels
///
/// The source rect becomes UVs; a horizontal flip swaps the left and right U so
/// the mirror happens around the quad's own center.
pub fn sprite_quad(command: &DrawCommand, sheet_size: Vec2) -> [Vertex; 4] {
    let source = &command.source;
    let mut uv_min = source.min() / sheet_size;
    let mut uv_max = source.max() / sheet_size;
    if command.flip_horizontal {
        std::mem::swap(&mut uv_min.x, &mut uv_max.x);
    }
    quad(&command.destination, uv_min, uv_max)
}

/// A sheet uploaded to the GPU
struct SheetBinding {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sheets: HashMap<SpriteKey, SheetBinding>,
    /// Sheet to draw this frame, set by `prepare`
    pending: Option<SpriteKey>,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection reverses winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: std::mem::size_of::<[Vertex; 4]>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let camera_uniform = CameraUniform {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            sheets: HashMap::new(),
            pending: None,
        })
    }

    /// Upload a sheet so draw commands for `key` can be rendered
    pub fn upload_sheet(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        key: SpriteKey,
        image: &SheetImage,
    ) -> Result<()> {
        let texture = Texture::from_image(device, queue, &image.pixels, Some(image.label.as_str()))?;

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(key.name()),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        self.sheets.insert(key, SheetBinding { texture, bind_group });
        Ok(())
    }

    /// Write the camera uniform
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(camera)]),
        );
    }

    /// Stage this frame's draw command; `None` draws nothing
    ///
    /// Returns false if the command's sheet was never uploaded.
    pub fn prepare(&mut self, queue: &wgpu::Queue, command: Option<&DrawCommand>) -> bool {
        self.pending = None;
        let Some(command) = command else {
            return true;
        };
        let Some(sheet) = self.sheets.get(&command.sprite) else {
            return false;
        };

        let sheet_size = Vec2::new(sheet.texture.width as f32, sheet.texture.height as f32);
        let vertices = sprite_quad(command, sheet_size);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.pending = Some(command.sprite);
        true
    }

    /// Record the staged quad into the render pass
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(sheet) = self.pending.and_then(|key| self.sheets.get(&key)) else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &sheet.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Number of sheets on the GPU
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::FrameRect;
    use approx::assert_relative_eq;

    fn command(flip: bool) -> DrawCommand {
        DrawCommand {
            sprite: SpriteKey::Walk,
            source: FrameRect::new(100.0, 0.0, 50.0, 90.0),
            destination: FrameRect::new(375.0, 255.0, 50.0, 90.0),
            flip_horizontal: flip,
        }
    }

    #[test]
    fn test_sprite_quad_uvs() {
        let verts = sprite_quad(&command(false), Vec2::new(300.0, 90.0));

        assert_relative_eq!(verts[0].tex_coords[0], 1.0 / 3.0);
        assert_relative_eq!(verts[1].tex_coords[0], 0.5);
        assert_eq!(verts[0].tex_coords[1], 0.0);
        assert_eq!(verts[2].tex_coords[1], 1.0);
        assert_eq!(verts[0].position, [375.0, 255.0]);
        assert_eq!(verts[2].position, [425.0, 345.0]);
    }

    #[test]
    fn test_flipped_quad_swaps_u_only() {
        let plain = sprite_quad(&command(false), Vec2::new(300.0, 90.0));
        let flipped = sprite_quad(&command(true), Vec2::new(300.0, 90.0));

        assert_eq!(flipped[0].tex_coords[0], plain[1].tex_coords[0]);
        assert_eq!(flipped[1].tex_coords[0], plain[0].tex_coords[0]);
        assert_eq!(flipped[0].tex_coords[1], plain[0].tex_coords[1]);
        // Positions are untouched
        for (a, b) in plain.iter().zip(flipped.iter()) {
            assert_eq!(a.position, b.position);
        }
    }
}
