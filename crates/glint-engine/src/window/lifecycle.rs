use crate::device::{Acquire, Egl, Gl, GraphicsSession, NativeWindow, SessionError};

/// Window-lifecycle notification from the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// A native window exists and may be rendered to.
    WindowAvailable(NativeWindow),
    /// The native window is about to be invalidated.
    WindowDestroyed,
    /// The host is tearing the session down.
    SessionDestroy,
    /// Any other notification; ignored.
    Other(&'static str),
}

impl LifecycleCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WindowAvailable(_) => "window-available",
            Self::WindowDestroyed => "window-destroyed",
            Self::SessionDestroy => "session-destroy",
            Self::Other(name) => *name,
        }
    }
}

/// Session transition caused by one notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Bound,
    AlreadyBound,
    Released,
    AlreadyUnbound,
    Ignored,
}

/// Applies one lifecycle notification to the session, synchronously.
///
/// Must run on the render-loop thread, between loop iterations, so the session is
/// consistent at the start of every iteration. Unknown notifications are ignored.
pub fn dispatch<E, G>(
    session: &mut GraphicsSession<E, G>,
    command: LifecycleCommand,
) -> Result<Transition, SessionError>
where
    E: Egl,
    G: Gl,
{
    let transition = match command {
        LifecycleCommand::WindowAvailable(window) => match session.acquire(window)? {
            Acquire::Bound => Transition::Bound,
            Acquire::AlreadyBound => Transition::AlreadyBound,
        },
        LifecycleCommand::WindowDestroyed | LifecycleCommand::SessionDestroy => {
            if session.release() {
                Transition::Released
            } else {
                Transition::AlreadyUnbound
            }
        }
        LifecycleCommand::Other(_) => Transition::Ignored,
    };

    log::info!("{} -> {transition:?}", command.name());
    Ok(transition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::fake::{self, FakeEgl, FakeGl};
    use crate::device::SessionInit;

    fn session() -> (GraphicsSession<FakeEgl, FakeGl>, FakeEgl) {
        let (egl, gl) = fake::native(&[0, 4]);
        (GraphicsSession::new(egl.clone(), gl, SessionInit::default()), egl)
    }

    #[test]
    fn window_available_binds_once() {
        let (mut s, egl) = session();
        let w = LifecycleCommand::WindowAvailable(fake::window(0xA1));
        assert_eq!(dispatch(&mut s, w).unwrap(), Transition::Bound);
        assert_eq!(dispatch(&mut s, w).unwrap(), Transition::AlreadyBound);
        assert_eq!(egl.calls().create_context, 1);
    }

    #[test]
    fn destroy_notifications_release() {
        let (mut s, egl) = session();
        dispatch(&mut s, LifecycleCommand::WindowAvailable(fake::window(0xA1))).unwrap();

        assert_eq!(
            dispatch(&mut s, LifecycleCommand::WindowDestroyed).unwrap(),
            Transition::Released
        );
        assert_eq!(
            dispatch(&mut s, LifecycleCommand::SessionDestroy).unwrap(),
            Transition::AlreadyUnbound
        );
        assert_eq!(egl.calls().terminate, 1);
    }

    #[test]
    fn unknown_notifications_are_ignored() {
        let (mut s, egl) = session();
        let other = LifecycleCommand::Other("focus-changed");
        assert_eq!(dispatch(&mut s, other).unwrap(), Transition::Ignored);
        assert_eq!(egl.calls(), fake::Calls::default());
        assert_eq!(other.name(), "focus-changed");
    }

    #[test]
    fn acquire_failure_is_propagated_unbound() {
        let (mut s, egl) = session();
        egl.fail_on("eglInitialize");
        let err = dispatch(&mut s, LifecycleCommand::WindowAvailable(fake::window(0xA1))).unwrap_err();
        assert_eq!(err.operation(), "eglInitialize");
        assert!(!s.is_bound());
    }
}
