use std::ffi::c_void;

use super::api::*;
use super::config::{select_config, SurfaceConfig};
use super::{NativeError, SessionError, SessionInit};

/// Native handles held while a session is bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Binding {
    pub display: Display,
    pub config: SurfaceConfig,
    pub context: Context,
    pub surface: Surface,
    pub window: NativeWindow,
}

/// Lifecycle state of a [`GraphicsSession`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No display, context or surface.
    Unbound,
    /// Display, config, context and surface all valid and current.
    Bound(Binding),
}

/// Result of a successful [`GraphicsSession::acquire`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Acquire {
    /// Handles were created against the window.
    Bound,
    /// The session was already bound; nothing was created.
    AlreadyBound,
}

/// Bind/release counters for diagnostics.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub binds: u64,
    pub releases: u64,
}

/// Owns the display connection, config, context and surface as one unit.
///
/// The session is bound to at most one native window at a time. All transitions
/// happen on the thread that owns it; the handle types are `!Send`, so the
/// compiler keeps it there.
///
/// Rendering calls are only reachable through [`GraphicsSession::frame`], which
/// returns `None` while unbound.
pub struct GraphicsSession<E: Egl, G: Gl> {
    egl: E,
    gl: G,
    init: SessionInit,
    state: SessionState,
    stats: SessionStats,
}

impl<E: Egl, G: Gl> GraphicsSession<E, G> {
    /// Creates an unbound session over already-resolved entry points.
    pub fn new(egl: E, gl: G, init: SessionInit) -> Self {
        Self {
            egl,
            gl,
            init,
            state: SessionState::Unbound,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, SessionState::Bound(_))
    }

    pub fn binding(&self) -> Option<&Binding> {
        match &self.state {
            SessionState::Bound(binding) => Some(binding),
            SessionState::Unbound => None,
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Binds the session to `window`.
    ///
    /// A second acquire while bound is a no-op. On failure every handle created
    /// by this call is destroyed again and the session stays unbound.
    pub fn acquire(&mut self, window: NativeWindow) -> Result<Acquire, SessionError> {
        if self.is_bound() {
            log::debug!("acquire ignored: session already bound");
            return Ok(Acquire::AlreadyBound);
        }

        let binding = self.bind(window)?;
        self.state = SessionState::Bound(binding);
        self.stats.binds += 1;
        self.log_renderer();

        log::info!(
            "graphics session bound (config {}, {} samples)",
            binding.config.index,
            binding.config.samples
        );
        Ok(Acquire::Bound)
    }

    /// Detaches and destroys the context, surface and display connection.
    ///
    /// Returns `false` when the session was already unbound; no native call is
    /// made in that case.
    pub fn release(&mut self) -> bool {
        let SessionState::Bound(binding) = std::mem::replace(&mut self.state, SessionState::Unbound)
        else {
            return false;
        };

        teardown(
            &self.egl,
            binding.display,
            Some(binding.context),
            Some(binding.surface),
        );
        self.stats.releases += 1;
        log::info!(
            "graphics session released ({} binds, {} releases)",
            self.stats.binds,
            self.stats.releases
        );
        true
    }

    /// Returns the current frame target, or `None` while unbound.
    pub fn frame(&self) -> Option<Frame<'_, E, G>> {
        self.binding().map(|binding| Frame {
            egl: &self.egl,
            gl: &self.gl,
            binding,
        })
    }

    fn bind(&self, window: NativeWindow) -> Result<Binding, SessionError> {
        let display = self.egl.get_display().ok_or(SessionError::NoDisplay)?;
        let (major, minor) = self
            .egl
            .initialize(display)
            .map_err(SessionError::Initialize)?;

        let mut partial = PartialBinding::new(&self.egl, display);

        log::info!(
            "EGL {major}.{minor} initialized (vendor: {}, version: {})",
            self.egl.query_string(display, EGL_VENDOR).unwrap_or_default(),
            self.egl.query_string(display, EGL_VERSION).unwrap_or_default(),
        );

        let config = select_config(&self.egl, display, &self.init)?;

        let context = self
            .egl
            .create_context(display, config.handle(), &self.init.context_attribs())
            .map_err(SessionError::CreateContext)?;
        partial.context = Some(context);

        let surface = self
            .egl
            .create_window_surface(display, config.handle(), window)
            .map_err(SessionError::CreateSurface)?;
        partial.surface = Some(surface);

        self.egl
            .make_current(display, Some(surface), Some(context))
            .map_err(SessionError::MakeCurrent)?;

        partial.commit();

        Ok(Binding {
            display,
            config,
            context,
            surface,
            window,
        })
    }

    fn log_renderer(&self) {
        let query = |name| self.gl.get_string(name).unwrap_or_default();
        log::info!(
            "GL renderer: {} / {} / {}",
            query(GL_VENDOR),
            query(GL_RENDERER),
            query(GL_VERSION)
        );
    }
}

impl<E: Egl, G: Gl> Drop for GraphicsSession<E, G> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Rolls back a half-finished bind unless committed.
struct PartialBinding<'a, E: Egl> {
    egl: &'a E,
    display: Display,
    context: Option<Context>,
    surface: Option<Surface>,
    committed: bool,
}

impl<'a, E: Egl> PartialBinding<'a, E> {
    fn new(egl: &'a E, display: Display) -> Self {
        Self {
            egl,
            display,
            context: None,
            surface: None,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl<E: Egl> Drop for PartialBinding<'_, E> {
    fn drop(&mut self) {
        if !self.committed {
            log::warn!("rolling back partially bound graphics session");
            teardown(self.egl, self.display, self.context, self.surface);
        }
    }
}

/// Detach, destroy context, destroy surface, terminate display. In that order.
fn teardown<E: Egl>(
    egl: &E,
    display: Display,
    context: Option<Context>,
    surface: Option<Surface>,
) {
    if let Err(err) = egl.make_current(display, None, None) {
        log::warn!("failed to detach EGL context: {err}");
    }
    if let Some(context) = context {
        egl.destroy_context(display, context);
    }
    if let Some(surface) = surface {
        egl.destroy_surface(display, surface);
    }
    egl.terminate(display);
}

/// Render target for one loop iteration of a bound session.
///
/// Borrowing the session keeps lifecycle transitions out while the frame exists.
pub struct Frame<'s, E: Egl, G: Gl> {
    egl: &'s E,
    gl: &'s G,
    binding: &'s Binding,
}

impl<'s, E: Egl, G: Gl> Frame<'s, E, G> {
    pub fn gl(&self) -> &'s G {
        self.gl
    }

    pub fn config(&self) -> &'s SurfaceConfig {
        &self.binding.config
    }

    /// Address of the client-API function `name`, for entry points beyond [`Gl`].
    ///
    /// `None` when the driver does not export it. Cast the pointer to the
    /// function's C signature before calling it.
    pub fn proc_address(&self, name: &str) -> Option<*mut c_void> {
        self.egl.proc_address(name)
    }

    /// Surface size in pixels as reported by EGL.
    pub fn surface_size(&self) -> Result<(EglInt, EglInt), NativeError> {
        let Binding { display, surface, .. } = *self.binding;
        let width = self.egl.query_surface(display, surface, EGL_WIDTH)?;
        let height = self.egl.query_surface(display, surface, EGL_HEIGHT)?;
        Ok((width, height))
    }

    /// Swaps the surface's buffers.
    pub fn present(self) -> Result<(), NativeError> {
        self.egl.swap_buffers(self.binding.display, self.binding.surface)
    }
}
