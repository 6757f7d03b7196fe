//! Application shell implementing winit `ApplicationHandler`
//!
//! Wires the window, renderer, audio, input and frame clock to `Game`.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::AudioManager;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::{FrameOutcome, Game};
use crate::platform::{FrameClock, InputState, KeyAction};
use crate::renderer::{HudOptions, RenderInitError, RenderState, build_scene};
use crate::settings::Settings;

pub const WINDOW_TITLE: &str = "Dodge Block";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] OsError),
    #[error("renderer initialization failed: {0}")]
    RenderInit(#[from] RenderInitError),
}

/// Seed derived from wall-clock time
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

pub struct App {
    settings: Settings,
    game: Game,
    audio: AudioManager,
    input: InputState,
    clock: FrameClock,

    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    /// Fatal error that ended the event loop
    error: Option<AppError>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(time_seed);
        let audio = AudioManager::from_settings(&settings);
        Self {
            game: Game::new(seed),
            audio,
            input: InputState::new(),
            clock: FrameClock::new(),
            window: None,
            render_state: None,
            error: None,
            settings,
        }
    }

    /// The error that stopped the app, if any
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let scale = self.settings.window_scale as f64;
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                SCREEN_WIDTH as f64 * scale,
                SCREEN_HEIGHT as f64 * scale,
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let render_state = pollster::block_on(RenderState::new(window.clone()))?;

        log::info!(
            "Window ready at {}x{} (seed {})",
            render_state.size.0,
            render_state.size.1,
            self.game.seed()
        );

        self.window = Some(window);
        self.render_state = Some(render_state);
        self.clock = FrameClock::new();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// Advance the game one frame and play its sounds
    fn step(&mut self, event_loop: &ActiveEventLoop, now: Instant) {
        let input = self.input.take_frame_input(self.clock.elapsed_ms(now));
        let outcome = self.game.frame(&input);
        self.clock.mark_frame(now);

        for event in self.game.drain_events() {
            self.audio.play_event(event);
        }

        if outcome == FrameOutcome::Quit {
            log::info!("Quit requested");
            event_loop.exit();
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let hud = HudOptions {
            fps: self.settings.show_fps.then(|| self.clock.fps()),
            muted: self.audio.is_muted(),
        };
        let Some(render_state) = &mut self.render_state else {
            return;
        };

        let vertices = build_scene(&self.game, &hud);
        match render_state.render(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, action: KeyAction) {
        match action {
            KeyAction::ToggleMute => {
                let muted = self.audio.toggle_muted();
                log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
            }
            KeyAction::Quit => {
                log::info!("Quit requested");
                event_loop.exit();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.input.request_quit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(new_size.width, new_size.height);
                }
            }

            WindowEvent::Focused(false) => self.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if let Some(action) =
                                self.input.process_key_down(key_code, event.repeat)
                            {
                                self.handle_key(event_loop, action);
                            }
                        }
                        ElementState::Released => self.input.process_key_up(key_code),
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if self.clock.is_frame_due(now) {
                    self.step(event_loop, now);
                }
                self.render(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else { return };

        if self.clock.is_frame_due(Instant::now()) {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame_at()));
    }
}
