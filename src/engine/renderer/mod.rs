// Rendering system using wgpu

mod camera;
mod sprite;
mod texture;
mod vertex;

use camera::Camera;
pub use sprite::SpriteRenderer;

use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

use crate::core::math::srgb_to_linear;
use crate::engine::assets::SheetImage;
use crate::game::character::{DrawCommand, SpriteKey};

/// Main renderer responsible for initializing wgpu and drawing the character
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_renderer: SpriteRenderer,
    camera: Camera,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>, background: [u8; 3]) -> Result<Self> {
        // Some platforms report 0x0 until the window is mapped
        let size = surface_size(window.inner_size());

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, surface_format)?;
        let camera = Camera::new(config.width as f32, config.height as f32);
        sprite_renderer.update_camera(&queue, &camera);

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_renderer,
            camera,
            clear_color: clear_color(background, surface_format.is_srgb()),
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera
                .resize(new_size.width as f32, new_size.height as f32);
            self.sprite_renderer.update_camera(&self.queue, &self.camera);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Upload a decoded sheet
    pub fn upload_sheet(&mut self, key: SpriteKey, image: &SheetImage) -> Result<()> {
        self.sprite_renderer
            .upload_sheet(&self.device, &self.queue, key, image)
    }

    /// Clear the canvas and draw this frame's command, if any
    pub fn render(&mut self, command: Option<&DrawCommand>) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and skip this frame
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        if !self.sprite_renderer.prepare(&self.queue, command) {
            warn!("No texture uploaded for {:?}", command.map(|c| c.sprite));
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Canvas size in physical pixels, never zero
    pub fn canvas_size(&self) -> Vec2 {
        self.camera.viewport()
    }

    pub fn sprite_renderer(&self) -> &SpriteRenderer {
        &self.sprite_renderer
    }
}

fn surface_size(size: winit::dpi::PhysicalSize<u32>) -> winit::dpi::PhysicalSize<u32> {
    winit::dpi::PhysicalSize::new(size.width.max(1), size.height.max(1))
}

/// Clear colour for an sRGB byte triple; sRGB surfaces expect linear values
fn clear_color(rgb: [u8; 3], srgb_surface: bool) -> wgpu::Color {
    let channel = |c: u8| {
        if srgb_surface {
            srgb_to_linear(c)
        } else {
            c as f64 / 255.0
        }
    };
    wgpu::Color {
        r: channel(rgb[0]),
        g: channel(rgb[1]),
        b: channel(rgb[2]),
        a: 1.0,
    }
}
