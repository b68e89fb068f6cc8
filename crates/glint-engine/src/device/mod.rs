//! EGL session management.
//!
//! This module is responsible for:
//! - the native seam (`Egl` / `Gl` traits, handle types, constants)
//! - choosing a framebuffer config for a display connection
//! - binding and releasing the display/config/context/surface unit

mod api;
mod config;
mod error;
mod init;
mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use api::*;
pub use config::{best_sample_index, select_config, SurfaceConfig};
pub use error::{EglErrorCode, NativeError, PresentErrorAction, SessionError};
pub use init::SessionInit;
pub use session::{Acquire, Binding, Frame, GraphicsSession, SessionState, SessionStats};

pub(crate) use error::classify_present_error;
