//! Logging utilities.
//!
//! Centralizes logger initialization: `env_logger` on desktop, logcat on Android.
//! Everything else in the crate only uses the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
