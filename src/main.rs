use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use scene_sketches::app::Application;
use scene_sketches::assets::AssetServer;
use scene_sketches::cli::Cli;
use scene_sketches::config::Settings;
use scene_sketches::controls::InputEvent;
use scene_sketches::core::WinitInput;
use scene_sketches::frame::FpsMeter;
use scene_sketches::renderer::{FrameRenderer, GpuRenderer};
use scene_sketches::scenes;

// === Constants ===

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<GpuRenderer>,
    app: Application,
    input: WinitInput,
    fps: Option<FpsMeter>,
    title: String,
    size: (u32, u32),
}

impl App {
    fn new(settings: &Settings, cli: &Cli) -> Self {
        let setup = scenes::setup(cli.scene);
        let (preferred_width, preferred_height) = setup
            .preferred_size()
            .unwrap_or((DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));
        let size = (
            settings.width.unwrap_or(preferred_width),
            settings.height.unwrap_or(preferred_height),
        );
        let title = settings
            .title
            .clone()
            .unwrap_or_else(|| format!("scene-sketches: {}", setup.name()));

        let assets = AssetServer::gltf(settings.assets.clone());
        let app = Application::new(setup, assets, size.0, size.1);

        Self {
            window: None,
            renderer: None,
            app,
            input: WinitInput::new(),
            fps: settings.show_fps.then(|| FpsMeter::new(settings.fps_interval)),
            title,
            size,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match self.app.tick(renderer) {
            Ok(frame) => {
                if let Some(fps) = self.fps.as_mut().and_then(|meter| meter.record(&frame)) {
                    log::info!("FPS: {fps:.1}");
                }
            }
            Err(e) => {
                log::error!("Render error: {e:#}");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(GpuRenderer::new(window.clone())) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.app.handle_input(&InputEvent::Resize {
            width: size.width,
            height: size.height,
        });
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                for input in self.input.translate(&other) {
                    if let (InputEvent::Resize { width, height }, Some(renderer)) = (&input, self.renderer.as_mut()) {
                        renderer.resize(*width, *height);
                    }
                    self.app.handle_input(&input);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&settings, &cli);

    log::info!("Drag or use the mouse wheel to move the camera, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
