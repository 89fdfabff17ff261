//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and higher layers
//! (sketch host, studio). Runtime internals stay out of user code; every frame
//! arrives through one [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
