//! Window lifecycle and runtime loop.
//!
//! Translates host lifecycle notifications into graphics-session transitions and
//! owns the `winit` event loop that drives the render loop.

mod handle;
mod lifecycle;
mod runtime;

pub use handle::{native_window, window_handle_of};
pub use lifecycle::{dispatch, LifecycleCommand, Transition};
pub use runtime::{Runtime, RuntimeConfig};
