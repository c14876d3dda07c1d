//! Fitting-room viewer: shows the model resolved from the stored profile.
//!
//! Usage: aina-view [--model <key>] [--placeholder] [--config <file>]
//!
//! Controls:
//! - Left mouse drag: Turn the model
//! - Scroll wheel: Zoom in/out
//! - R: Reset model and camera
//! - L: Reload the model
//! - Escape: Quit

mod mesh_gpu;
mod renderer;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use aina::config::Config;
use aina::io::{AssetLoader, FileLoader};
use aina::resolve::{AssetFormat, AssetKey, ResolverMode};
use aina::storage::{self, FileStorage};
use aina::units::UnitSystem;
use aina::viewer::{LoadOutcome, ViewerSession};

use renderer::Renderer;

#[derive(Parser)]
#[command(name = "aina-view")]
#[command(author, version, about = "Fitting-room model viewer", long_about = None)]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Profile store directory (overrides the config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Show this model instead of the one resolved from the profile
    #[arg(short, long)]
    model: Option<String>,

    /// Use the average placeholder model set
    #[arg(long)]
    placeholder: bool,

    /// Model directory (overrides the config)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Model file format (glb or obj)
    #[arg(short, long)]
    format: Option<AssetFormat>,
}

/// Application state.
struct App {
    session: ViewerSession<Renderer>,
    /// Model shown; reloaded with L.
    key: AssetKey,
    /// The window (created after resume).
    window: Option<Arc<Window>>,
    /// Last cursor position.
    cursor: PhysicalPosition<f64>,
}

impl App {
    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let title = if self.session.is_loading() {
            format!("Aina - loading {}", self.key)
        } else {
            match self.session.current_key() {
                Some(key) => format!("Aina - {}", key),
                None => "Aina - no model".to_string(),
            }
        };
        window.set_title(&title);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Aina")
            .with_inner_size(winit::dpi::LogicalSize::new(720, 960));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => {
                let size = window.inner_size();
                self.session.attach(renderer);
                self.session.resize(size.width, size.height);
            }
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.update_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.session.backend_mut() {
                    renderer.resize(new_size);
                }
                self.session.resize(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.logical_key {
                        Key::Named(NamedKey::Escape) => {
                            event_loop.exit();
                        }
                        Key::Character(ref c) if c == "r" || c == "R" => {
                            self.session.reset();
                            log::info!("View reset");
                        }
                        Key::Character(ref c) if c == "l" || c == "L" => {
                            self.session.load(self.key.clone());
                            self.update_title();
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            self.session.pointer_down(self.cursor.x, self.cursor.y)
                        }
                        ElementState::Released => self.session.pointer_up(),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
                self.session.pointer_move(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.session.pointer_up();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.session.zoom(1.0 - scroll * 0.1);
            }

            WindowEvent::RedrawRequested => {
                let outcomes = self.session.tick();
                for notice in self.session.take_notices() {
                    log::warn!("{}", notice.message);
                }
                if outcomes.iter().any(|o| !matches!(o, LoadOutcome::Superseded { .. })) {
                    self.update_title();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Request continuous redraws for smooth interaction
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(store) = args.store {
        config.store_dir = store;
    }
    if let Some(root) = args.root {
        config.viewer.source.root = root;
    }
    if let Some(format) = args.format {
        config.viewer.source.format = format;
    }

    let key = match args.model {
        Some(name) => AssetKey::normalize(&name),
        None => {
            let mut store = FileStorage::new(&config.store_dir);
            let profile = storage::load_profile(&mut store, UnitSystem::Metric, config.weight_policy)?;
            let mode = if args.placeholder {
                ResolverMode::Placeholder
            } else {
                config.resolver
            };
            mode.resolve_profile(&profile)
        }
    };
    log::info!("Showing {}", key);

    let loader: Arc<dyn AssetLoader> = Arc::new(FileLoader::new());
    let mut session = ViewerSession::new(config.viewer, Some(loader));
    // Starts fetching before the window exists; the model is uploaded on attach.
    session.load(key.clone());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        session,
        key,
        window: None,
        cursor: PhysicalPosition::new(0.0, 0.0),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
