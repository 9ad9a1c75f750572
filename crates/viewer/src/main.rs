//! Orrery - an interactive solar system viewer with picking, comparison, and music

mod catalog;
mod config;
mod events;
mod music;
mod render;
mod scene;
mod state;
mod ui;
mod update;

use anyhow::Result;
use engine_core::{Time, World};
use input::InputState;
use picking::PickScene;
use renderer::{OrbitCamera, Renderer};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use config::ViewerConfig;
use music::MusicPlayer;
use scene::{SceneAssets, SceneEntities};
use state::{CameraAnimation, CompareQueue, DebugPanel, Selection, StatusLine, UiState, ViewMode};

/// Top-level viewer state: the ECS world, renderer, camera, and overlay UI.
pub struct ViewerState {
    // Core systems
    world: World,
    time: Time,
    input: InputState,
    pick_scene: PickScene,

    // Renderer
    renderer: Renderer,
    camera: OrbitCamera,

    // Scene
    assets: SceneAssets,
    entities: SceneEntities,

    // Camera mode and the single fly-to slot. Starting a new fly-to replaces
    // whatever was in flight; manual orbit or zoom clears it.
    view_mode: ViewMode,
    camera_animation: Option<CameraAnimation>,

    // Interaction
    selection: Option<Selection>,
    hovered: Option<usize>,
    compare: CompareQueue,
    ui: UiState,
    status: StatusLine,
    debug: DebugPanel,

    // Audio
    music: MusicPlayer,

    // Settings
    config: ViewerConfig,

    /// Casters drawn into the most recent shadow pass, for the debug panel.
    shadow_casting_count: usize,
}

impl ViewerState {
    async fn new(window: Arc<Window>, config: ViewerConfig) -> Result<Self> {
        let mut renderer = Renderer::new(window.clone()).await?;

        let mut camera = OrbitCamera::new();
        let (width, height) = renderer.dimensions();
        camera.set_aspect(width, height);

        let mut world = World::new();
        let mut pick_scene = PickScene::new();
        let entities = scene::spawn_world(&mut world, &mut pick_scene, &config);
        let assets = SceneAssets::load(&mut renderer, &config);

        let music = MusicPlayer::new(config.music_volume, config.sfx_volume);

        Ok(Self {
            world,
            time: Time::new(),
            input: InputState::new(),
            pick_scene,
            renderer,
            camera,
            assets,
            entities,
            view_mode: ViewMode::Orbit,
            camera_animation: None,
            selection: None,
            hovered: None,
            compare: CompareQueue::new(),
            ui: UiState::new(),
            status: StatusLine::new(),
            debug: DebugPanel::new(),
            music,
            config,
            shadow_casting_count: 0,
        })
    }

    fn update(&mut self) {
        self.time.update();
        // Cap delta so a hitch doesn't teleport the planets.
        let dt = self.time.delta_seconds().min(0.05);
        update::frame(self, dt);
        // Clear input for next frame
        self.input.begin_frame();
    }

    fn render(&mut self) -> Result<()> {
        render::run(self)
    }
}

/// Application handler for winit.
struct App {
    state: Option<ViewerState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = ViewerConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("Orrery")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(ViewerState::new(window.clone(), config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize viewer: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                          Orrery                          ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                               ║");
    println!("║    Left drag  - Orbit camera  │  Wheel  - Zoom           ║");
    println!("║    Click body - Select planet │  V      - Toggle view    ║");
    println!("║    M          - Music panel   │  Space  - Play / pause   ║");
    println!("║    Escape     - Close / clear │  F3     - Debug stats    ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    log::info!("Starting Orrery");

    let event_loop = EventLoop::new()?;
    // Poll continuously for lower input latency. Wait blocks until events arrive, which can delay
    // RedrawRequested and cause the "high FPS but laggy" feel. Poll ensures we process input
    // and redraw as fast as possible.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
