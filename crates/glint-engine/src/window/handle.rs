use std::ptr;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};

use crate::device::{NativeWindow, SessionError};

/// Extracts the EGL native window from a platform window handle.
///
/// Supports Android (`ANativeWindow*`) and X11 (Xlib/XCB window ids).
pub fn native_window(handle: RawWindowHandle) -> Result<NativeWindow, SessionError> {
    let raw = match handle {
        RawWindowHandle::AndroidNdk(h) => h.a_native_window.as_ptr(),
        RawWindowHandle::Xlib(h) => ptr::without_provenance_mut(h.window as usize),
        RawWindowHandle::Xcb(h) => ptr::without_provenance_mut(h.window.get() as usize),
        other => {
            return Err(SessionError::WindowHandle(format!(
                "unsupported window handle {other:?}"
            )));
        }
    };

    NativeWindow::from_raw(raw)
        .ok_or_else(|| SessionError::WindowHandle("window handle is null".to_string()))
}

/// Native window currently backing `window`.
///
/// Fails while the platform has no window (e.g. Android between suspend and resume).
pub fn window_handle_of<W>(window: &W) -> Result<NativeWindow, SessionError>
where
    W: HasWindowHandle + ?Sized,
{
    let handle = window
        .window_handle()
        .map_err(|err| SessionError::WindowHandle(err.to_string()))?;
    native_window(handle.as_raw())
}
