use std::ffi::c_void;

use super::NativeError;

/// `EGLint`.
pub type EglInt = i32;

/// `EGLBoolean`.
pub type EglBoolean = u32;

pub const EGL_FALSE: EglBoolean = 0;
pub const EGL_TRUE: EglBoolean = 1;

pub const EGL_SUCCESS: EglInt = 0x3000;
pub const EGL_NOT_INITIALIZED: EglInt = 0x3001;
pub const EGL_BAD_ACCESS: EglInt = 0x3002;
pub const EGL_BAD_ALLOC: EglInt = 0x3003;
pub const EGL_BAD_ATTRIBUTE: EglInt = 0x3004;
pub const EGL_BAD_CONFIG: EglInt = 0x3005;
pub const EGL_BAD_CONTEXT: EglInt = 0x3006;
pub const EGL_BAD_CURRENT_SURFACE: EglInt = 0x3007;
pub const EGL_BAD_DISPLAY: EglInt = 0x3008;
pub const EGL_BAD_MATCH: EglInt = 0x3009;
pub const EGL_BAD_NATIVE_PIXMAP: EglInt = 0x300A;
pub const EGL_BAD_NATIVE_WINDOW: EglInt = 0x300B;
pub const EGL_BAD_PARAMETER: EglInt = 0x300C;
pub const EGL_BAD_SURFACE: EglInt = 0x300D;
pub const EGL_CONTEXT_LOST: EglInt = 0x300E;

pub const EGL_ALPHA_SIZE: EglInt = 0x3021;
pub const EGL_BLUE_SIZE: EglInt = 0x3022;
pub const EGL_GREEN_SIZE: EglInt = 0x3023;
pub const EGL_RED_SIZE: EglInt = 0x3024;
pub const EGL_SAMPLES: EglInt = 0x3031;
pub const EGL_SURFACE_TYPE: EglInt = 0x3033;
pub const EGL_NONE: EglInt = 0x3038;
pub const EGL_COLOR_BUFFER_TYPE: EglInt = 0x303F;
pub const EGL_RENDERABLE_TYPE: EglInt = 0x3040;
pub const EGL_CONFORMANT: EglInt = 0x3042;
pub const EGL_VENDOR: EglInt = 0x3053;
pub const EGL_VERSION: EglInt = 0x3054;
pub const EGL_HEIGHT: EglInt = 0x3056;
pub const EGL_WIDTH: EglInt = 0x3057;
pub const EGL_RGB_BUFFER: EglInt = 0x308E;
pub const EGL_CONTEXT_MAJOR_VERSION: EglInt = 0x3098;
pub const EGL_CONTEXT_MINOR_VERSION: EglInt = 0x30FB;

pub const EGL_WINDOW_BIT: EglInt = 0x0004;
pub const EGL_OPENGL_ES2_BIT: EglInt = 0x0004;
pub const EGL_OPENGL_ES3_BIT: EglInt = 0x0040;

pub const GL_COLOR_BUFFER_BIT: u32 = 0x0000_4000;
pub const GL_NO_ERROR: u32 = 0;
pub const GL_VENDOR: u32 = 0x1F00;
pub const GL_RENDERER: u32 = 0x1F01;
pub const GL_VERSION: u32 = 0x1F02;

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// The null sentinel is never representable; absence is `Option::None`.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(*mut c_void);

        impl $name {
            /// Wraps a raw handle, returning `None` for the null sentinel.
            #[inline]
            pub fn from_raw(raw: *mut c_void) -> Option<Self> {
                if raw.is_null() { None } else { Some(Self(raw)) }
            }

            #[inline]
            pub fn as_raw(self) -> *mut c_void {
                self.0
            }
        }
    };
}

native_handle! {
    /// `EGLDisplay` connection.
    Display
}

native_handle! {
    /// `EGLConfig` belonging to one display connection.
    Config
}

native_handle! {
    /// `EGLContext`.
    Context
}

native_handle! {
    /// `EGLSurface` bound to a native window.
    Surface
}

native_handle! {
    /// Platform window (`ANativeWindow*` on Android, an X11 window id elsewhere).
    ///
    /// Owned by the platform; only valid until the next lifecycle release.
    NativeWindow
}

/// The windowing-API calls a graphics session needs.
///
/// Implemented by [`crate::loader::EglEntryPoints`] for the real driver and by a
/// call-counting fake in tests. Every method must be called from the render-loop thread.
pub trait Egl {
    /// `eglGetDisplay(EGL_DEFAULT_DISPLAY)`.
    fn get_display(&self) -> Option<Display>;

    /// Returns the `(major, minor)` EGL version.
    fn initialize(&self, display: Display) -> Result<(EglInt, EglInt), NativeError>;

    fn terminate(&self, display: Display);

    /// Returns at most `capacity` configs matching the `EGL_NONE`-terminated `attribs`,
    /// in platform order.
    fn choose_config(
        &self,
        display: Display,
        attribs: &[EglInt],
        capacity: usize,
    ) -> Result<Vec<Config>, NativeError>;

    fn config_attrib(
        &self,
        display: Display,
        config: Config,
        attribute: EglInt,
    ) -> Result<EglInt, NativeError>;

    fn create_context(
        &self,
        display: Display,
        config: Config,
        attribs: &[EglInt],
    ) -> Result<Context, NativeError>;

    fn destroy_context(&self, display: Display, context: Context);

    fn create_window_surface(
        &self,
        display: Display,
        config: Config,
        window: NativeWindow,
    ) -> Result<Surface, NativeError>;

    fn destroy_surface(&self, display: Display, surface: Surface);

    /// Binds `surface` (draw + read) and `context`; `None` for both detaches.
    fn make_current(
        &self,
        display: Display,
        surface: Option<Surface>,
        context: Option<Context>,
    ) -> Result<(), NativeError>;

    fn swap_buffers(&self, display: Display, surface: Surface) -> Result<(), NativeError>;

    fn query_surface(
        &self,
        display: Display,
        surface: Surface,
        attribute: EglInt,
    ) -> Result<EglInt, NativeError>;

    fn query_string(&self, display: Display, name: EglInt) -> Option<String>;

    /// `eglGetProcAddress`: address of a client-API function, `None` if unknown.
    fn proc_address(&self, name: &str) -> Option<*mut c_void>;
}

/// The rendering-API calls used per frame.
///
/// Only reachable through a bound session's [`super::Frame`].
pub trait Gl {
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: u32);
    fn get_string(&self, name: u32) -> Option<String>;
    fn get_error(&self) -> u32;
}
