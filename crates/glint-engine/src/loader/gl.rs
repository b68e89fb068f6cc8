use std::ffi::{c_char, CStr};

use crate::device::Gl;

entry_points! {
    /// Typed OpenGL ES entry points resolved from the rendering library.
    pub struct GlEntryPoints {
        viewport = "glViewport": fn(i32, i32, i32, i32);
        clear_color = "glClearColor": fn(f32, f32, f32, f32);
        clear = "glClear": fn(u32);
        get_string = "glGetString": fn(u32) -> *const u8;
        get_error = "glGetError": fn() -> u32;
    }
}

// SAFETY (all calls below): `Gl` is only reachable through a bound session's
// frame, so a context is current on this thread.
impl Gl for GlEntryPoints {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { (self.viewport)(x, y, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { (self.clear_color)(r, g, b, a) }
    }

    fn clear(&self, mask: u32) {
        unsafe { (self.clear)(mask) }
    }

    fn get_string(&self, name: u32) -> Option<String> {
        let raw = unsafe { (self.get_string)(name) };
        if raw.is_null() {
            return None;
        }
        // SAFETY: glGetString returns a static NUL-terminated string.
        let text = unsafe { CStr::from_ptr(raw.cast::<c_char>()) };
        Some(text.to_string_lossy().into_owned())
    }

    fn get_error(&self) -> u32 {
        unsafe { (self.get_error)() }
    }
}
