use std::time::Instant;

use winit::dpi::PhysicalSize;

use crate::device::{
    classify_present_error, Egl, Frame, Gl, GraphicsSession, NativeWindow, PresentErrorAction,
    SessionError, GL_NO_ERROR,
};
use crate::time::{FixedStep, FrameTime};
use crate::window::{dispatch, LifecycleCommand, Transition};

use super::app::{App, AppControl};
use super::ctx::FrameCtx;

/// Result of one render attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The frame was drawn and swapped.
    Presented,
    /// No surface is bound; nothing was drawn.
    Unbound,
    /// The swap failed transiently; the frame was dropped and the session kept.
    Dropped,
    /// The context was lost; the session has been released and a rebind is
    /// pending until the next window notification (see [`FrameLoop::rebind`]).
    Lost,
    /// The app asked to stop; the frame was not presented.
    Exit,
}

/// One loop iteration: simulation steps taken, then the render attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Iteration {
    pub steps: u32,
    pub outcome: FrameOutcome,
}

/// Session + fixed-timestep driver + app, advanced one iteration at a time.
///
/// Holds no platform state: the host feeds it lifecycle commands, timestamps and
/// the window's pixel size.
pub struct FrameLoop<E: Egl, G: Gl, A: App> {
    session: GraphicsSession<E, G>,
    stepper: FixedStep,
    app: A,
    frame_index: u64,
    last_steps: u32,
    presented: u64,
    gl_errors: u64,
    rebind_pending: bool,
}

/// Upper bound on `glGetError` reads per frame; each read clears one flag.
const MAX_GL_ERRORS: usize = 8;

impl<E: Egl, G: Gl, A: App> FrameLoop<E, G, A> {
    pub fn new(session: GraphicsSession<E, G>, stepper: FixedStep, app: A) -> Self {
        Self {
            session,
            stepper,
            app,
            frame_index: 0,
            last_steps: 0,
            presented: 0,
            gl_errors: 0,
            rebind_pending: false,
        }
    }

    pub fn session(&self) -> &GraphicsSession<E, G> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GraphicsSession<E, G> {
        &mut self.session
    }

    pub fn stepper(&self) -> &FixedStep {
        &self.stepper
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    /// Frames successfully swapped so far.
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// GL errors reported after `App::on_frame` (checked in debug builds only).
    pub fn gl_errors(&self) -> u64 {
        self.gl_errors
    }

    /// Whether the session was released after a context loss and not yet rebound.
    pub fn rebind_pending(&self) -> bool {
        self.rebind_pending
    }

    /// Applies a lifecycle notification to the session.
    ///
    /// Any window notification settles a pending rebind: availability binds, and
    /// destruction means there is no window left to rebind to.
    pub fn handle(&mut self, command: LifecycleCommand) -> Result<Transition, SessionError> {
        if !matches!(command, LifecycleCommand::Other(_)) {
            self.rebind_pending = false;
        }
        dispatch(&mut self.session, command)
    }

    /// Re-acquires the session after a context loss.
    ///
    /// `window` is the host's current native window, `None` when the platform has
    /// none right now; the session then stays unbound and the rebind stays pending.
    /// Returns `None` when nothing was attempted.
    pub fn rebind(
        &mut self,
        window: Option<NativeWindow>,
    ) -> Result<Option<Transition>, SessionError> {
        if !self.rebind_pending {
            return Ok(None);
        }
        let Some(window) = window else {
            log::debug!("rebind deferred: no native window");
            return Ok(None);
        };
        self.handle(LifecycleCommand::WindowAvailable(window)).map(Some)
    }

    /// Runs every simulation step that has elapsed up to `now`.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let app = &mut self.app;
        self.last_steps = self.stepper.tick(now, |step| app.on_step(step));
        self.last_steps
    }

    /// Draws and presents one frame if the session is bound.
    ///
    /// `size` is the window's pixel size; an empty size falls back to the size EGL
    /// reports for the surface.
    pub fn render(&mut self, size: PhysicalSize<u32>, now: Instant) -> FrameOutcome {
        let Some(frame) = self.session.frame() else {
            return FrameOutcome::Unbound;
        };

        let size = viewport_size(&frame, size);
        let gl = frame.gl();
        gl.viewport(0, 0, clamp_i32(size.width), clamp_i32(size.height));

        let time = FrameTime {
            frame_index: self.frame_index,
            steps: self.last_steps,
            step: self.stepper.step(),
            alpha: self.stepper.alpha(),
            now,
        };
        self.frame_index += 1;

        let mut ctx = FrameCtx::new(gl, &frame, frame.config(), size, time);
        let control = self.app.on_frame(&mut ctx);
        self.gl_errors += drain_gl_errors(gl);
        if control == AppControl::Exit {
            return FrameOutcome::Exit;
        }

        let Err(err) = frame.present() else {
            self.presented += 1;
            return FrameOutcome::Presented;
        };

        match classify_present_error(&err) {
            PresentErrorAction::SkipFrame => {
                log::warn!("dropping frame: {err}");
                FrameOutcome::Dropped
            }
            PresentErrorAction::Rebind => {
                log::warn!("{err}; releasing graphics session");
                self.session.release();
                self.rebind_pending = true;
                FrameOutcome::Lost
            }
        }
    }

    /// `advance` followed by `render`, both at `now`.
    pub fn iterate(&mut self, size: PhysicalSize<u32>, now: Instant) -> Iteration {
        let steps = self.advance(now);
        let outcome = self.render(size, now);
        Iteration { steps, outcome }
    }
}

fn viewport_size<E, G>(frame: &Frame<'_, E, G>, size: PhysicalSize<u32>) -> PhysicalSize<u32>
where
    E: Egl,
    G: Gl,
{
    if size.width > 0 && size.height > 0 {
        return size;
    }
    match frame.surface_size() {
        Ok((w, h)) => PhysicalSize::new(w.max(0) as u32, h.max(0) as u32),
        Err(err) => {
            log::debug!("surface size unavailable: {err}");
            size
        }
    }
}

/// Reads and logs pending GL errors. Debug builds only: `glGetError` can stall
/// the pipeline.
fn drain_gl_errors<G: Gl>(gl: &G) -> u64 {
    if !cfg!(debug_assertions) {
        return 0;
    }
    let mut count = 0;
    for _ in 0..MAX_GL_ERRORS {
        let code = gl.get_error();
        if code == GL_NO_ERROR {
            break;
        }
        log::debug!("GL error {code:#06x} after frame");
        count += 1;
    }
    count
}

fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
