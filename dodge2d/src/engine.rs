use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{error::InitError, input::InputState, render::Renderer};

/// Configuration values for the engine window and runtime behavior.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Fixed updates per second.
    pub tick_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Dodge2D Game".into(),
            width: 800,
            height: 600,
            vsync: true,
            tick_rate: 60,
        }
    }
}

/// Main entrypoint for running a Dodge2D game.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine instance with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Override the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Override the window size in logical pixels. The window is not resizable.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable or disable vertical sync.
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    /// Set how many fixed updates run per second.
    #[must_use]
    pub fn with_tick_rate(mut self, ticks_per_second: u32) -> Self {
        self.config.tick_rate = ticks_per_second.max(1);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the provided game until the window is closed or Escape is pressed.
    ///
    /// Returns an error if any part of the window/graphics bootstrap fails, or
    /// if the game returns an error from one of its hooks. Everything created
    /// up to that point is released before this returns.
    pub fn run<G: Game + 'static>(self, game: G) -> Result<()> {
        let event_loop = EventLoop::new().map_err(|err| {
            let err = InitError::from(err);
            log::error!("{err}");
            err
        })?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            config: self.config,
            game,
            runtime: None,
            failure: None,
        };
        event_loop.run_app(&mut app)?;

        match app.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Event-loop handler. Owns the game and, once resumed, the runtime.
struct App<G: Game> {
    config: EngineConfig,
    game: G,
    runtime: Option<Runtime>,
    failure: Option<anyhow::Error>,
}

/// Everything tied to the live window. Dropping it releases the surface,
/// device and window.
struct Runtime {
    ctx: EngineContext,
    last_frame: Instant,
}

impl<G: Game> App<G> {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = event_loop
            .create_window(attributes)
            .map_err(InitError::from)?;

        let mut ctx = EngineContext::new(Arc::new(window), &self.config)?;
        self.game.init(&mut ctx)?;
        ctx.window.request_redraw();

        self.runtime = Some(Runtime {
            ctx,
            last_frame: Instant::now(),
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.runtime = None;
        event_loop.exit();
    }
}

impl<G: Game> ApplicationHandler for App<G> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, _cause: StartCause) {
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.ctx.begin_frame();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.is_some() || self.failure.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };
        runtime.ctx.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if is_escape_pressed(&event) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                runtime.ctx.resize_renderer(new_size);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.game.draw(&mut runtime.ctx) {
                    self.fail(event_loop, err.context("draw failed"));
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };

        let now = Instant::now();
        runtime.ctx.advance_clock(now - runtime.last_frame);
        runtime.last_frame = now;

        if let Err(err) = self.game.update(&mut runtime.ctx) {
            self.fail(event_loop, err.context("update failed"));
            return;
        }

        runtime.ctx.window.request_redraw();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.runtime.take().is_some() {
            log::info!("Window closed, shutting down");
        }
    }
}

fn is_escape_pressed(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && matches!(event.physical_key, PhysicalKey::Code(KeyCode::Escape))
}

/// Accumulates frame time and hands it out in fixed-size steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs_f64(1.0 / f64::from(ticks_per_second.max(1))),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn accumulate(&mut self, delta: Duration) {
        self.accumulator += delta;
    }

    /// Consume one step if enough time has accumulated.
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}

/// Shared context provided to game code each frame.
pub struct EngineContext {
    window: Arc<Window>,
    timestep: FixedTimestep,
    input: InputState,
    renderer: Renderer,
}

impl EngineContext {
    fn new(window: Arc<Window>, config: &EngineConfig) -> Result<Self, InitError> {
        let renderer = Renderer::new(
            Arc::clone(&window),
            (config.width, config.height),
            config.vsync,
        )?;
        log::info!(
            "Window \"{}\" ready at {}x{}",
            config.title,
            config.width,
            config.height
        );

        Ok(Self {
            window,
            timestep: FixedTimestep::new(config.tick_rate),
            input: InputState::new(),
            renderer,
        })
    }

    fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    fn advance_clock(&mut self, delta: Duration) {
        self.timestep.accumulate(delta);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            self.input.handle_key(event);
        }
    }

    fn resize_renderer(&mut self, new_size: PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    /// Check if a fixed timestep update should run and consume accumulated time.
    ///
    /// Call this in a loop until it returns `false` to handle multiple fixed
    /// updates per frame.
    pub fn should_run_fixed_update(&mut self) -> bool {
        self.timestep.consume()
    }

    /// Mutable input access, used to drain queued key events.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Access the renderer for drawing operations.
    pub fn renderer(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}

/// Trait implemented by user code to hook into the engine lifecycle.
pub trait Game {
    /// Called once after the window is created but before the first frame.
    fn init(&mut self, _ctx: &mut EngineContext) -> Result<()> {
        Ok(())
    }

    /// Update game state. Called once per frame before drawing.
    fn update(&mut self, ctx: &mut EngineContext) -> Result<()>;

    /// Draw the current frame. Called after update when a redraw is requested.
    fn draw(&mut self, ctx: &mut EngineContext) -> Result<()>;
}
