use std::fmt;

use super::api::*;

/// EGL error code as reported by `eglGetError`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EglErrorCode(pub EglInt);

impl EglErrorCode {
    /// Symbolic name, when the code is a known EGL error.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            EGL_SUCCESS => "EGL_SUCCESS",
            EGL_NOT_INITIALIZED => "EGL_NOT_INITIALIZED",
            EGL_BAD_ACCESS => "EGL_BAD_ACCESS",
            EGL_BAD_ALLOC => "EGL_BAD_ALLOC",
            EGL_BAD_ATTRIBUTE => "EGL_BAD_ATTRIBUTE",
            EGL_BAD_CONFIG => "EGL_BAD_CONFIG",
            EGL_BAD_CONTEXT => "EGL_BAD_CONTEXT",
            EGL_BAD_CURRENT_SURFACE => "EGL_BAD_CURRENT_SURFACE",
            EGL_BAD_DISPLAY => "EGL_BAD_DISPLAY",
            EGL_BAD_MATCH => "EGL_BAD_MATCH",
            EGL_BAD_NATIVE_PIXMAP => "EGL_BAD_NATIVE_PIXMAP",
            EGL_BAD_NATIVE_WINDOW => "EGL_BAD_NATIVE_WINDOW",
            EGL_BAD_PARAMETER => "EGL_BAD_PARAMETER",
            EGL_BAD_SURFACE => "EGL_BAD_SURFACE",
            EGL_CONTEXT_LOST => "EGL_CONTEXT_LOST",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for EglErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:#06x})", self.0),
            None => write!(f, "unknown EGL error {:#06x}", self.0),
        }
    }
}

/// A failed native call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{call} failed: {code}")]
pub struct NativeError {
    /// Native entry point that reported the failure (e.g. `eglCreateContext`).
    pub call: &'static str,
    pub code: EglErrorCode,
}

impl NativeError {
    pub fn new(call: &'static str, code: EglInt) -> Self {
        Self { call, code: EglErrorCode(code) }
    }
}

/// Fatal initialization/lifecycle failure of a [`super::GraphicsSession`].
///
/// A session that returns one of these is always left `Unbound`.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no EGL display available")]
    NoDisplay,

    #[error("failed to initialize EGL display")]
    Initialize(#[source] NativeError),

    #[error("failed to query EGL configs")]
    ChooseConfig(#[source] NativeError),

    #[error("no EGL config matches the required attributes")]
    NoMatchingConfig,

    #[error("failed to read EGL config attribute")]
    ConfigAttrib(#[source] NativeError),

    #[error("failed to create EGL context")]
    CreateContext(#[source] NativeError),

    #[error("failed to create EGL window surface")]
    CreateSurface(#[source] NativeError),

    #[error("failed to make EGL surface and context current")]
    MakeCurrent(#[source] NativeError),

    #[error("native window handle unavailable: {0}")]
    WindowHandle(String),
}

impl SessionError {
    /// Name of the operation that failed, for the fatal diagnostic.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::NoDisplay => "eglGetDisplay",
            Self::Initialize(_) => "eglInitialize",
            Self::ChooseConfig(_) | Self::NoMatchingConfig => "eglChooseConfig",
            Self::ConfigAttrib(_) => "eglGetConfigAttrib",
            Self::CreateContext(_) => "eglCreateContext",
            Self::CreateSurface(_) => "eglCreateWindowSurface",
            Self::MakeCurrent(_) => "eglMakeCurrent",
            Self::WindowHandle(_) => "window_handle",
        }
    }
}

/// High-level response after a failed present.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentErrorAction {
    /// Transient; drop this frame and keep the session.
    SkipFrame,
    /// Context state is gone; release and bind again against the current window.
    Rebind,
}

pub(crate) fn classify_present_error(err: &NativeError) -> PresentErrorAction {
    match err.code.0 {
        EGL_CONTEXT_LOST => PresentErrorAction::Rebind,
        _ => PresentErrorAction::SkipFrame,
    }
}
