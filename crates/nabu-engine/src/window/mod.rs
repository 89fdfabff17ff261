//! Window and event loop.
//!
//! Owns the `winit` event loop and the single window, and wires them to the
//! GPU layer and the input model.

mod runtime;
mod translate;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::window::CursorIcon;
