use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// What the runtime should do after an app callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Close the window and leave the event loop.
    Exit,
}

/// Application side of the runtime: receives window events and draws frames.
pub trait App {
    /// Raw window events, delivered after the input state has been updated.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Draws one frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Whether to keep drawing without new events. `false` lets the event
    /// loop sleep until input, a resize or an explicit redraw arrives.
    fn wants_redraw(&self) -> bool {
        true
    }
}
