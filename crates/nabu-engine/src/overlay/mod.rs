//! Screen-space overlay draw stream.
//!
//! Everything drawn on top of the 3D scene in logical pixels: projected text
//! labels and the control panel widgets.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - provide deterministic ordering (z-index + insertion order)

mod cmd;
mod list;
mod order;

pub use cmd::{Border, DrawCmd, RoundedRectCmd, TextCmd};
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
