//! Core engine-facing contracts.
//!
//! This module defines the interface between the host runtime and client code,
//! and the `FrameLoop` that ties a graphics session, the fixed-timestep driver
//! and an `App` together. `FrameLoop` has no platform dependency, so the whole
//! per-iteration behavior can be driven from tests with a fake native layer.

mod app;
mod ctx;
mod frame_loop;

pub use app::{App, AppControl, InputResponse};
pub use ctx::FrameCtx;
pub use frame_loop::{FrameLoop, FrameOutcome, Iteration};
