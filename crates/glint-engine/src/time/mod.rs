//! Time subsystem.
//!
//! Provides the fixed-timestep driver that advances simulation state independently
//! of presentation. Intended usage:
//! - one `FixedStep` per render loop
//! - call `tick(now, ..)` once per loop iteration, whether or not a surface is bound
//! - hand the resulting `FrameTime` to the frame that is presented afterwards

mod fixed_step;

pub use fixed_step::{FixedStep, FrameTime, TimestepConfig};
