use std::ffi::{c_char, c_void, CStr, CString};
use std::ptr;

use crate::device::{
    Config, Context, Display, Egl, EglBoolean, EglInt, NativeError, NativeWindow, Surface,
    EGL_NONE, EGL_TRUE,
};

type Handle = *mut c_void;

entry_points! {
    /// Typed EGL entry points resolved from the windowing library.
    pub struct EglEntryPoints {
        get_display = "eglGetDisplay": fn(Handle) -> Handle;
        initialize = "eglInitialize": fn(Handle, *mut EglInt, *mut EglInt) -> EglBoolean;
        terminate = "eglTerminate": fn(Handle) -> EglBoolean;
        choose_config = "eglChooseConfig": fn(Handle, *const EglInt, *mut Handle, EglInt, *mut EglInt) -> EglBoolean;
        get_config_attrib = "eglGetConfigAttrib": fn(Handle, Handle, EglInt, *mut EglInt) -> EglBoolean;
        create_context = "eglCreateContext": fn(Handle, Handle, Handle, *const EglInt) -> Handle;
        destroy_context = "eglDestroyContext": fn(Handle, Handle) -> EglBoolean;
        create_window_surface = "eglCreateWindowSurface": fn(Handle, Handle, Handle, *const EglInt) -> Handle;
        destroy_surface = "eglDestroySurface": fn(Handle, Handle) -> EglBoolean;
        make_current = "eglMakeCurrent": fn(Handle, Handle, Handle, Handle) -> EglBoolean;
        swap_buffers = "eglSwapBuffers": fn(Handle, Handle) -> EglBoolean;
        get_error = "eglGetError": fn() -> EglInt;
        query_string = "eglQueryString": fn(Handle, EglInt) -> *const c_char;
        query_surface = "eglQuerySurface": fn(Handle, Handle, EglInt, *mut EglInt) -> EglBoolean;
        get_proc_address = "eglGetProcAddress": fn(*const c_char) -> Handle;
    }
}

impl EglEntryPoints {
    fn last_error(&self, call: &'static str) -> NativeError {
        // SAFETY: eglGetError takes no arguments and only reads thread-local state.
        NativeError::new(call, unsafe { (self.get_error)() })
    }

    fn check(&self, call: &'static str, result: EglBoolean) -> Result<(), NativeError> {
        if result == EGL_TRUE {
            Ok(())
        } else {
            Err(self.last_error(call))
        }
    }
}

fn terminated(attribs: &[EglInt]) -> bool {
    attribs.last() == Some(&EGL_NONE)
}

// SAFETY (all calls below): handles passed in were produced by this same EGL
// implementation, attribute lists are EGL_NONE-terminated, and out-pointers refer
// to live locals.
impl Egl for EglEntryPoints {
    fn get_display(&self) -> Option<Display> {
        // EGL_DEFAULT_DISPLAY is the null native display.
        Display::from_raw(unsafe { (self.get_display)(ptr::null_mut()) })
    }

    fn initialize(&self, display: Display) -> Result<(EglInt, EglInt), NativeError> {
        let (mut major, mut minor) = (0, 0);
        let ok = unsafe { (self.initialize)(display.as_raw(), &mut major, &mut minor) };
        self.check("eglInitialize", ok)?;
        Ok((major, minor))
    }

    fn terminate(&self, display: Display) {
        let ok = unsafe { (self.terminate)(display.as_raw()) };
        if let Err(err) = self.check("eglTerminate", ok) {
            log::warn!("{err}");
        }
    }

    fn choose_config(
        &self,
        display: Display,
        attribs: &[EglInt],
        capacity: usize,
    ) -> Result<Vec<Config>, NativeError> {
        debug_assert!(terminated(attribs));

        let capacity = capacity.min(EglInt::MAX as usize);
        let mut configs: Vec<Handle> = vec![ptr::null_mut(); capacity];
        let mut count: EglInt = 0;
        let ok = unsafe {
            (self.choose_config)(
                display.as_raw(),
                attribs.as_ptr(),
                configs.as_mut_ptr(),
                capacity as EglInt,
                &mut count,
            )
        };
        self.check("eglChooseConfig", ok)?;

        configs.truncate(usize::try_from(count).unwrap_or(0).min(capacity));
        Ok(configs.into_iter().filter_map(Config::from_raw).collect())
    }

    fn config_attrib(
        &self,
        display: Display,
        config: Config,
        attribute: EglInt,
    ) -> Result<EglInt, NativeError> {
        let mut value = 0;
        let ok = unsafe {
            (self.get_config_attrib)(display.as_raw(), config.as_raw(), attribute, &mut value)
        };
        self.check("eglGetConfigAttrib", ok)?;
        Ok(value)
    }

    fn create_context(
        &self,
        display: Display,
        config: Config,
        attribs: &[EglInt],
    ) -> Result<Context, NativeError> {
        debug_assert!(terminated(attribs));

        let raw = unsafe {
            (self.create_context)(
                display.as_raw(),
                config.as_raw(),
                ptr::null_mut(),
                attribs.as_ptr(),
            )
        };
        Context::from_raw(raw).ok_or_else(|| self.last_error("eglCreateContext"))
    }

    fn destroy_context(&self, display: Display, context: Context) {
        let ok = unsafe { (self.destroy_context)(display.as_raw(), context.as_raw()) };
        if let Err(err) = self.check("eglDestroyContext", ok) {
            log::warn!("{err}");
        }
    }

    fn create_window_surface(
        &self,
        display: Display,
        config: Config,
        window: NativeWindow,
    ) -> Result<Surface, NativeError> {
        let raw = unsafe {
            (self.create_window_surface)(
                display.as_raw(),
                config.as_raw(),
                window.as_raw(),
                ptr::null(),
            )
        };
        Surface::from_raw(raw).ok_or_else(|| self.last_error("eglCreateWindowSurface"))
    }

    fn destroy_surface(&self, display: Display, surface: Surface) {
        let ok = unsafe { (self.destroy_surface)(display.as_raw(), surface.as_raw()) };
        if let Err(err) = self.check("eglDestroySurface", ok) {
            log::warn!("{err}");
        }
    }

    fn make_current(
        &self,
        display: Display,
        surface: Option<Surface>,
        context: Option<Context>,
    ) -> Result<(), NativeError> {
        let surface = surface.map_or(ptr::null_mut(), Surface::as_raw);
        let context = context.map_or(ptr::null_mut(), Context::as_raw);
        let ok = unsafe { (self.make_current)(display.as_raw(), surface, surface, context) };
        self.check("eglMakeCurrent", ok)
    }

    fn swap_buffers(&self, display: Display, surface: Surface) -> Result<(), NativeError> {
        let ok = unsafe { (self.swap_buffers)(display.as_raw(), surface.as_raw()) };
        self.check("eglSwapBuffers", ok)
    }

    fn query_surface(
        &self,
        display: Display,
        surface: Surface,
        attribute: EglInt,
    ) -> Result<EglInt, NativeError> {
        let mut value = 0;
        let ok = unsafe {
            (self.query_surface)(display.as_raw(), surface.as_raw(), attribute, &mut value)
        };
        self.check("eglQuerySurface", ok)?;
        Ok(value)
    }

    fn query_string(&self, display: Display, name: EglInt) -> Option<String> {
        let raw = unsafe { (self.query_string)(display.as_raw(), name) };
        if raw.is_null() {
            return None;
        }
        // SAFETY: EGL returns a static NUL-terminated string owned by the driver.
        let text = unsafe { CStr::from_ptr(raw) };
        Some(text.to_string_lossy().into_owned())
    }

    fn proc_address(&self, name: &str) -> Option<*mut c_void> {
        let name = CString::new(name).ok()?;
        let address = unsafe { (self.get_proc_address)(name.as_ptr()) };
        (!address.is_null()).then_some(address)
    }
}
