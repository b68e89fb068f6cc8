use std::ffi::c_void;

use winit::dpi::PhysicalSize;

use crate::device::{Egl, Frame, Gl, SurfaceConfig, GL_COLOR_BUFFER_BIT};
use crate::paint::Color;
use crate::time::FrameTime;

/// Resolves client-API functions for the frame being drawn.
pub(crate) trait ProcResolver {
    fn proc_address(&self, name: &str) -> Option<*mut c_void>;
}

impl<E: Egl, G: Gl> ProcResolver for Frame<'_, E, G> {
    fn proc_address(&self, name: &str) -> Option<*mut c_void> {
        Frame::proc_address(self, name)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Exists only while the session is bound, so every call made through it has a
/// current context.
pub struct FrameCtx<'a> {
    gl: &'a dyn Gl,
    procs: &'a dyn ProcResolver,
    config: &'a SurfaceConfig,
    /// Viewport size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub time: FrameTime,
}

impl<'a> FrameCtx<'a> {
    pub(crate) fn new(
        gl: &'a dyn Gl,
        procs: &'a dyn ProcResolver,
        config: &'a SurfaceConfig,
        size: PhysicalSize<u32>,
        time: FrameTime,
    ) -> Self {
        Self { gl, procs, config, size, time }
    }

    /// Rendering entry points for this frame.
    pub fn gl(&self) -> &'a dyn Gl {
        self.gl
    }

    pub fn config(&self) -> &'a SurfaceConfig {
        self.config
    }

    /// Clears the color buffer to `color`.
    pub fn clear(&self, color: Color) {
        let Color { r, g, b, a } = color.clamped();
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(GL_COLOR_BUFFER_BIT);
    }

    /// Address of a client-API function beyond [`Gl`] (e.g. `glDrawArrays`).
    pub fn proc_address(&self, name: &str) -> Option<*mut c_void> {
        self.procs.proc_address(name)
    }

    /// Resolves `name` as the function pointer type `F`.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type matching the function's C
    /// signature, and the pointer may only be called while a session context is
    /// current on this thread.
    pub unsafe fn function<F: Copy>(&self, name: &str) -> Option<F> {
        assert_eq!(
            size_of::<F>(),
            size_of::<*mut c_void>(),
            "client function type must be a function pointer"
        );
        let address = self.proc_address(name)?;
        // SAFETY: sizes match (checked above); the caller guarantees the signature.
        Some(unsafe { std::mem::transmute_copy::<*mut c_void, F>(&address) })
    }
}
