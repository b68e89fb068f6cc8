//! Color-cycling client of the glint engine.
//!
//! Each simulation step nudges three color channels; each frame clears the surface
//! to the current color. Built as a `cdylib` for NativeActivity on Android and as
//! a desktop binary for development.

mod cycle;

use std::time::Duration;

use anyhow::Result;
use winit::event_loop::EventLoop;

use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::device::SessionError;
use glint_engine::loader::LoadError;
use glint_engine::window::{Runtime, RuntimeConfig};

pub use cycle::ColorCycle;

/// The demo application.
#[derive(Debug, Default)]
pub struct Demo {
    cycle: ColorCycle,
}

impl App for Demo {
    fn on_step(&mut self, _step: Duration) {
        self.cycle.advance();
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        ctx.clear(self.cycle.color());
        AppControl::Continue
    }
}

/// Runs the demo on `event_loop` until the host exits.
pub fn run(event_loop: EventLoop<()>) -> Result<()> {
    let config = RuntimeConfig {
        title: "glint demo".to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(event_loop, config, Demo::default())
}

/// Top-level handler: logs a fatal error with the failing operation and exits.
pub fn exit_on_error(result: Result<()>) {
    let Err(err) = result else {
        return;
    };

    if let Some(session) = err.downcast_ref::<SessionError>() {
        log::error!("fatal: {} failed", session.operation());
    } else if let Some(load) = err.downcast_ref::<LoadError>() {
        if let Some(symbol) = load.symbol() {
            log::error!("fatal: entry point {symbol} unresolved");
        }
    }
    log::error!("{err:#}");
    std::process::exit(1);
}

#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
fn android_main(app: winit::platform::android::activity::AndroidApp) {
    use glint_engine::logging::{init_logging, LoggingConfig};
    use winit::platform::android::EventLoopBuilderExtAndroid;

    init_logging(LoggingConfig::default());

    let result = EventLoop::builder()
        .with_android_app(app)
        .build()
        .map_err(anyhow::Error::from)
        .and_then(run);
    exit_on_error(result);
}
