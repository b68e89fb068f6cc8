use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::core::{App, FrameLoop, FrameOutcome};
use crate::device::{Egl, Gl, GraphicsSession, NativeWindow, SessionInit};
use crate::loader::{EglEntryPoints, GlEntryPoints, LibraryNames};
use crate::time::{FixedStep, TimestepConfig};

use super::handle::window_handle_of;
use super::lifecycle::LifecycleCommand;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Ignored on Android, where the window always fills the activity.
    pub initial_size: LogicalSize<f64>,
    pub libraries: LibraryNames,
    pub session: SessionInit,
    pub timestep: TimestepConfig,
    /// Sleep per iteration while no surface is bound.
    pub idle_sleep: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let timestep = TimestepConfig::default();
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(720.0, 1280.0),
            libraries: LibraryNames::default(),
            session: SessionInit::default(),
            timestep,
            idle_sleep: timestep.step,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Loads the native libraries and runs `app` until the host exits.
    pub fn run<A>(event_loop: EventLoop<()>, config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App,
    {
        let egl = EglEntryPoints::load(&config.libraries.egl)
            .context("failed to load windowing library")?;
        let gl = GlEntryPoints::load(&config.libraries.gles)
            .context("failed to load rendering library")?;
        for table in [egl.table(), gl.table()] {
            log::info!("{}: {} entry points", table.library_name(), table.len());
        }

        Self::run_with(event_loop, config, egl, gl, app)
    }

    /// Runs `app` over already-resolved entry points.
    ///
    /// Each iteration drains pending host events without blocking, advances the
    /// simulation, then renders if a surface is bound or sleeps otherwise.
    pub fn run_with<E, G, A>(
        mut event_loop: EventLoop<()>,
        config: RuntimeConfig,
        egl: E,
        gl: G,
        app: A,
    ) -> Result<()>
    where
        E: Egl,
        G: Gl,
        A: App,
    {
        let session = GraphicsSession::new(egl, gl, config.session.clone());
        let stepper = FixedStep::new(config.timestep);
        let mut host = Host {
            frame_loop: FrameLoop::new(session, stepper, app),
            window: None,
            title: config.title,
            initial_size: config.initial_size,
            idle_sleep: config.idle_sleep,
            fatal: None,
            exit: false,
        };

        loop {
            let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut host);

            if let Some(err) = host.fatal.take() {
                return Err(err);
            }
            if let PumpStatus::Exit(code) = status {
                log::info!("event loop exited with code {code}");
                return Ok(());
            }
            if host.exit {
                log::info!("app requested exit");
                return Ok(());
            }

            host.iterate()?;
        }
    }
}

struct Host<E: Egl, G: Gl, A: App> {
    // Declared before `window`: surfaces must be destroyed before their window.
    frame_loop: FrameLoop<E, G, A>,
    window: Option<Window>,

    title: String,
    initial_size: LogicalSize<f64>,
    idle_sleep: Duration,

    fatal: Option<anyhow::Error>,
    exit: bool,
}

impl<E: Egl, G: Gl, A: App> Host<E, G, A> {
    fn iterate(&mut self) -> Result<()> {
        if self.frame_loop.rebind_pending() {
            let native = self.available_native_window();
            self.frame_loop
                .rebind(native)
                .context("rebind after context loss")?;
        }

        let size = self
            .window
            .as_ref()
            .map_or(PhysicalSize::new(0, 0), Window::inner_size);

        match self.frame_loop.iterate(size, Instant::now()).outcome {
            FrameOutcome::Unbound => thread::sleep(self.idle_sleep),
            FrameOutcome::Exit => self.exit = true,
            FrameOutcome::Presented | FrameOutcome::Dropped | FrameOutcome::Lost => {}
        }
        Ok(())
    }

    /// The window's native handle, or `None` while the platform has none
    /// (e.g. Android between suspend and resume).
    fn available_native_window(&self) -> Option<NativeWindow> {
        let window = self.window.as_ref()?;
        match window_handle_of(window) {
            Ok(native) => Some(native),
            Err(err) => {
                log::debug!("no native window: {err}");
                None
            }
        }
    }

    /// Acquires the session against the window's current native handle.
    fn bind_current_window(&mut self) -> Result<()> {
        let Some(window) = &self.window else {
            return Ok(());
        };
        let native = window_handle_of(window).context("window-available")?;
        self.apply(LifecycleCommand::WindowAvailable(native))
    }

    fn apply(&mut self, command: LifecycleCommand) -> Result<()> {
        self.frame_loop
            .handle(command)
            .with_context(|| format!("{} failed", command.name()))?;
        Ok(())
    }

    fn record(&mut self, event_loop: &ActiveEventLoop, result: Result<()>) {
        if let Err(err) = result {
            self.fatal = Some(err);
            event_loop.exit();
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        self.window = Some(window);
        Ok(())
    }
}

impl<E: Egl, G: Gl, A: App> ApplicationHandler for Host<E, G, A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let result = self
            .create_window(event_loop)
            .and_then(|()| self.bind_current_window());
        self.record(event_loop, result);
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.apply(LifecycleCommand::WindowDestroyed);
        self.record(event_loop, result);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                let result = self.apply(LifecycleCommand::SessionDestroy);
                self.record(event_loop, result);
                event_loop.exit();
            }
            WindowEvent::RedrawRequested | WindowEvent::Resized(_) => {}
            other => {
                let _ = self.frame_loop.app_mut().on_input(&other);
            }
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        let result = self.apply(LifecycleCommand::SessionDestroy);
        self.record(event_loop, result);
    }
}
