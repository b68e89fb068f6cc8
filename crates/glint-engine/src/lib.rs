//! Glint engine crate.
//!
//! Manages an EGL/GLES rendering session whose native window appears and
//! disappears asynchronously, and drives a fixed-timestep update/render loop
//! against it.

pub mod device;
pub mod loader;
pub mod time;
pub mod window;
pub mod core;

pub mod logging;
pub mod paint;
