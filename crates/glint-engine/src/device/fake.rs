//! Call-counting native layer for tests.
//!
//! `FakeEgl` and `FakeGl` share one state so tests can check that rendering calls
//! only happen while a context is current, and that every created handle is
//! destroyed exactly once.

use std::cell::RefCell;
use std::collections::HashSet;
use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use super::api::*;
use super::NativeError;

const DISPLAY: usize = 0xD15;
const CONFIG_BASE: usize = 0x1000;

/// Client-API functions the fake driver exports through `eglGetProcAddress`.
const EXPORTED_GL: &[&str] = &["glDrawArrays", "glUseProgram", "glUniform1f"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Calls {
    pub get_display: usize,
    pub initialize: usize,
    pub terminate: usize,
    pub choose_config: usize,
    pub create_context: usize,
    pub destroy_context: usize,
    pub create_surface: usize,
    pub destroy_surface: usize,
    pub make_current: usize,
    pub detach: usize,
    pub swap_buffers: usize,
    pub proc_address: usize,
    pub gl: usize,
    /// GL calls or swaps issued with no context current.
    pub render_while_unbound: usize,
    /// Destroy/terminate calls on handles that were not live.
    pub invalid_destroy: usize,
}

#[derive(Debug, Default)]
struct State {
    calls: Calls,
    samples: Vec<EglInt>,
    fail: HashSet<&'static str>,
    swap_error: Option<EglInt>,
    gl_error: Option<u32>,
    next_handle: usize,
    initialized: bool,
    contexts: HashSet<usize>,
    surfaces: HashSet<usize>,
    current: bool,
    windows: Vec<usize>,
}

impl State {
    fn fails(&self, call: &'static str) -> bool {
        self.fail.contains(call)
    }

    fn allocate(&mut self) -> usize {
        self.next_handle += 1;
        0x2000 + self.next_handle
    }
}

fn raw(addr: usize) -> *mut c_void {
    ptr::without_provenance_mut(addr)
}

pub(crate) fn window(addr: usize) -> NativeWindow {
    NativeWindow::from_raw(raw(addr)).unwrap()
}

#[derive(Debug, Clone)]
pub(crate) struct FakeEgl {
    state: Rc<RefCell<State>>,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeGl {
    state: Rc<RefCell<State>>,
}

/// Builds a fake native layer whose config query returns one candidate per entry
/// of `samples`, in order.
pub(crate) fn native(samples: &[EglInt]) -> (FakeEgl, FakeGl) {
    let state = Rc::new(RefCell::new(State {
        samples: samples.to_vec(),
        ..State::default()
    }));
    (FakeEgl { state: state.clone() }, FakeGl { state })
}

impl FakeEgl {
    pub fn calls(&self) -> Calls {
        self.state.borrow().calls.clone()
    }

    pub fn fail_on(&self, call: &'static str) {
        self.state.borrow_mut().fail.insert(call);
    }

    pub fn succeed_on(&self, call: &'static str) {
        self.state.borrow_mut().fail.remove(call);
    }

    pub fn fail_swap_with(&self, code: Option<EglInt>) {
        self.state.borrow_mut().swap_error = code;
    }

    /// Makes the next `glGetError` report `code`.
    pub fn raise_gl_error(&self, code: u32) {
        self.state.borrow_mut().gl_error = Some(code);
    }

    /// Contexts and surfaces not yet destroyed, plus the display if initialized.
    pub fn live_handles(&self) -> usize {
        let s = self.state.borrow();
        s.contexts.len() + s.surfaces.len() + usize::from(s.initialized)
    }

    /// Windows passed to `eglCreateWindowSurface`, in call order.
    pub fn surface_windows(&self) -> Vec<usize> {
        self.state.borrow().windows.clone()
    }

    fn config_index(&self, config: Config) -> Option<usize> {
        let index = (config.as_raw() as usize).checked_sub(CONFIG_BASE)?;
        (index < self.state.borrow().samples.len()).then_some(index)
    }
}

impl Egl for FakeEgl {
    fn get_display(&self) -> Option<Display> {
        let mut s = self.state.borrow_mut();
        s.calls.get_display += 1;
        if s.fails("eglGetDisplay") {
            return None;
        }
        Display::from_raw(raw(DISPLAY))
    }

    fn initialize(&self, _display: Display) -> Result<(EglInt, EglInt), NativeError> {
        let mut s = self.state.borrow_mut();
        s.calls.initialize += 1;
        if s.fails("eglInitialize") {
            return Err(NativeError::new("eglInitialize", EGL_NOT_INITIALIZED));
        }
        s.initialized = true;
        Ok((1, 5))
    }

    fn terminate(&self, _display: Display) {
        let mut s = self.state.borrow_mut();
        s.calls.terminate += 1;
        if !s.initialized {
            s.calls.invalid_destroy += 1;
        }
        s.initialized = false;
    }

    fn choose_config(
        &self,
        _display: Display,
        attribs: &[EglInt],
        capacity: usize,
    ) -> Result<Vec<Config>, NativeError> {
        let mut s = self.state.borrow_mut();
        s.calls.choose_config += 1;
        assert_eq!(attribs.last(), Some(&EGL_NONE), "attribute list must be terminated");
        if s.fails("eglChooseConfig") {
            return Err(NativeError::new("eglChooseConfig", EGL_BAD_ATTRIBUTE));
        }
        Ok((0..s.samples.len().min(capacity))
            .filter_map(|i| Config::from_raw(raw(CONFIG_BASE + i)))
            .collect())
    }

    fn config_attrib(
        &self,
        _display: Display,
        config: Config,
        attribute: EglInt,
    ) -> Result<EglInt, NativeError> {
        let index = self
            .config_index(config)
            .ok_or(NativeError::new("eglGetConfigAttrib", EGL_BAD_CONFIG))?;
        let s = self.state.borrow();
        if s.fails("eglGetConfigAttrib") {
            return Err(NativeError::new("eglGetConfigAttrib", EGL_BAD_ATTRIBUTE));
        }
        match attribute {
            EGL_SAMPLES => Ok(s.samples[index]),
            EGL_RED_SIZE | EGL_GREEN_SIZE | EGL_BLUE_SIZE => Ok(8),
            EGL_ALPHA_SIZE => Ok(0),
            _ => Err(NativeError::new("eglGetConfigAttrib", EGL_BAD_ATTRIBUTE)),
        }
    }

    fn create_context(
        &self,
        _display: Display,
        _config: Config,
        attribs: &[EglInt],
    ) -> Result<Context, NativeError> {
        let mut s = self.state.borrow_mut();
        s.calls.create_context += 1;
        assert_eq!(attribs.last(), Some(&EGL_NONE), "attribute list must be terminated");
        if s.fails("eglCreateContext") {
            return Err(NativeError::new("eglCreateContext", EGL_BAD_CONFIG));
        }
        let handle = s.allocate();
        s.contexts.insert(handle);
        Ok(Context::from_raw(raw(handle)).unwrap())
    }

    fn destroy_context(&self, _display: Display, context: Context) {
        let mut s = self.state.borrow_mut();
        s.calls.destroy_context += 1;
        if !s.contexts.remove(&(context.as_raw() as usize)) {
            s.calls.invalid_destroy += 1;
        }
    }

    fn create_window_surface(
        &self,
        _display: Display,
        _config: Config,
        window: NativeWindow,
    ) -> Result<Surface, NativeError> {
        let mut s = self.state.borrow_mut();
        s.calls.create_surface += 1;
        if s.fails("eglCreateWindowSurface") {
            return Err(NativeError::new("eglCreateWindowSurface", EGL_BAD_NATIVE_WINDOW));
        }
        s.windows.push(window.as_raw() as usize);
        let handle = s.allocate();
        s.surfaces.insert(handle);
        Ok(Surface::from_raw(raw(handle)).unwrap())
    }

    fn destroy_surface(&self, _display: Display, surface: Surface) {
        let mut s = self.state.borrow_mut();
        s.calls.destroy_surface += 1;
        if !s.surfaces.remove(&(surface.as_raw() as usize)) {
            s.calls.invalid_destroy += 1;
        }
    }

    fn make_current(
        &self,
        _display: Display,
        surface: Option<Surface>,
        context: Option<Context>,
    ) -> Result<(), NativeError> {
        let mut s = self.state.borrow_mut();
        match (surface, context) {
            (Some(surface), Some(context)) => {
                s.calls.make_current += 1;
                if s.fails("eglMakeCurrent") {
                    return Err(NativeError::new("eglMakeCurrent", EGL_BAD_MATCH));
                }
                let live = s.surfaces.contains(&(surface.as_raw() as usize))
                    && s.contexts.contains(&(context.as_raw() as usize));
                if !live {
                    return Err(NativeError::new("eglMakeCurrent", EGL_BAD_CONTEXT));
                }
                s.current = true;
            }
            _ => {
                s.calls.detach += 1;
                s.current = false;
            }
        }
        Ok(())
    }

    fn swap_buffers(&self, _display: Display, _surface: Surface) -> Result<(), NativeError> {
        let mut s = self.state.borrow_mut();
        s.calls.swap_buffers += 1;
        if !s.current {
            s.calls.render_while_unbound += 1;
        }
        match s.swap_error {
            Some(code) => Err(NativeError::new("eglSwapBuffers", code)),
            None => Ok(()),
        }
    }

    fn query_surface(
        &self,
        _display: Display,
        surface: Surface,
        attribute: EglInt,
    ) -> Result<EglInt, NativeError> {
        let s = self.state.borrow();
        if !s.surfaces.contains(&(surface.as_raw() as usize)) {
            return Err(NativeError::new("eglQuerySurface", EGL_BAD_SURFACE));
        }
        match attribute {
            EGL_WIDTH => Ok(1080),
            EGL_HEIGHT => Ok(1920),
            _ => Err(NativeError::new("eglQuerySurface", EGL_BAD_ATTRIBUTE)),
        }
    }

    fn query_string(&self, _display: Display, _name: EglInt) -> Option<String> {
        Some("fake".to_string())
    }

    fn proc_address(&self, name: &str) -> Option<*mut c_void> {
        self.state.borrow_mut().calls.proc_address += 1;
        let index = EXPORTED_GL.iter().position(|&exported| exported == name)?;
        Some(raw(0x5000 + index))
    }
}

impl FakeGl {
    fn record(&self) {
        let mut s = self.state.borrow_mut();
        s.calls.gl += 1;
        if !s.current {
            s.calls.render_while_unbound += 1;
        }
    }
}

impl Gl for FakeGl {
    fn viewport(&self, _x: i32, _y: i32, _width: i32, _height: i32) {
        self.record();
    }

    fn clear_color(&self, _r: f32, _g: f32, _b: f32, _a: f32) {
        self.record();
    }

    fn clear(&self, _mask: u32) {
        self.record();
    }

    fn get_string(&self, _name: u32) -> Option<String> {
        self.record();
        Some("fake gl".to_string())
    }

    fn get_error(&self) -> u32 {
        self.record();
        self.state.borrow_mut().gl_error.take().unwrap_or(GL_NO_ERROR)
    }
}
