use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::FrameClock;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::character::{AnimatedCharacter, SpriteRegistry};
use game::config::AnimatorConfig;

fn main() -> Result<()> {
    // Initialize logger; RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Sprite Animator...");

    let config = AnimatorConfig::from_env();

    // Decode every sheet before the first frame
    let loader = AssetLoader::new(&config.asset_root);
    let registry = if config.strict_assets {
        SpriteRegistry::load(&loader).with_context(|| {
            format!("Failed to load sprite sheets from {}", loader.base_path().display())
        })?
    } else {
        // Failed sheets stay unusable for the session
        let (registry, errors) = SpriteRegistry::load_partial(&loader);
        if !errors.is_empty() {
            warn!(
                "{} sprite sheet(s) under {} unavailable; those sprites will not be drawn",
                errors.len(),
                loader.base_path().display()
            );
        }
        registry
    };

    let event_loop = EventLoop::new()?;
    let (width, height) = config.window_size;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), config.background))?;
    for (key, slot) in registry.iter().filter(|(_, slot)| slot.is_usable()) {
        if let Some(sprite) = &slot.sprite {
            renderer.upload_sheet(key, &sprite.image)?;
        }
    }
    info!(
        "Uploaded {} of {} sprite sheets",
        renderer.sprite_renderer().sheet_count(),
        registry.len()
    );

    let mut clock = FrameClock::new();
    let mut input = InputManager::new(config.bindings.clone());
    if input.bindings().is_empty() {
        warn!("No input bindings; the character cannot be controlled");
    } else {
        info!("{} input bindings active", input.bindings().len());
    }
    let mut character =
        AnimatedCharacter::initialize(registry, renderer.canvas_size(), clock.now())
            .with_tuning(&config.tuning);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!(
                        "Close requested after {} frames ({:.1} fps), shutting down...",
                        clock.frame_count(),
                        clock.fps()
                    );
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    character.on_resize(renderer.canvas_size());
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some(command) = input.process_keyboard_event(&event) {
                        character.apply(command, clock.now());
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if let Some(command) = input.process_mouse_button(button, state) {
                        character.apply(command, clock.now());
                    }
                }
                WindowEvent::Focused(false) => {
                    // Key releases are not delivered while unfocused
                    for command in input.release_all() {
                        character.apply(command, clock.now());
                    }
                    debug!(
                        "Focus lost, showing {} (walking: {})",
                        character.active_sprite(),
                        character.is_walking()
                    );
                }
                WindowEvent::RedrawRequested => {
                    let now = clock.begin_frame();
                    let command = character.on_frame(now);
                    if let Err(e) = renderer.render(command.as_ref()) {
                        error!("Render failed: {:#}", e);
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
