use std::time::Duration;

use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Answer to the host's input callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputResponse {
    Handled,
    NotHandled,
}

/// Application contract implemented by clients of the render loop.
pub trait App {
    /// Called for window events the runtime does not consume itself.
    fn on_input(&mut self, event: &WindowEvent) -> InputResponse {
        let _ = event;
        InputResponse::NotHandled
    }

    /// Advances simulation state by one fixed step.
    ///
    /// Runs whether or not a surface is bound.
    fn on_step(&mut self, step: Duration);

    /// Draws one frame. Only called while the session is bound; the runtime presents
    /// afterwards unless `Exit` is returned.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
