use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use crate::core::config::GameConfig;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::Game;

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 300;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting car game...");

    let config_path = GameConfig::resolve_path();
    let (config, config_error) = GameConfig::load_or_default(&config_path);
    if let Some(err) = config_error {
        warn!("{err}; using default configuration");
    }

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let size = renderer.size();
    let mut game = Game::new(&config, size.width, size.height)?;
    let input = InputManager::default();
    let mut game_loop = GameLoop::new();
    let mut shown_points = game.score().points();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                game.resize(physical_size.width, physical_size.height);
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if let Some(input_event) = input.process_keyboard_event(&event) {
                    game.handle_input(input_event);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let now = Instant::now();
                let updates = game_loop.begin_frame_at(now);
                for _ in 0..updates {
                    if let Err(err) = game.update(now) {
                        error!("Game update failed: {err}");
                        elwt.exit();
                        return;
                    }
                }

                let points = game.score().points();
                if points != shown_points {
                    shown_points = points;
                    window.set_title(&game.score().text());
                }

                match renderer.render(game.scene(), game.camera()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory, shutting down");
                        elwt.exit();
                    }
                    Err(err) => warn!("Skipped frame: {err}"),
                }

                if game_loop.frame_count() % FPS_LOG_INTERVAL == 0 {
                    debug!(
                        "FPS: {:.1} ({} updates)",
                        game_loop.fps(),
                        game_loop.update_count()
                    );
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
