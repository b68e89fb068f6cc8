use anyhow::Context;
use winit::event_loop::EventLoop;

use glint_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    let mut builder = EventLoop::builder();

    // EGL window surfaces need an X11 window id.
    #[cfg(target_os = "linux")]
    {
        use winit::platform::x11::EventLoopBuilderExtX11;
        builder.with_x11();
    }

    let result = builder
        .build()
        .context("failed to create winit EventLoop")
        .and_then(glint_demo::run);
    glint_demo::exit_on_error(result);
}
