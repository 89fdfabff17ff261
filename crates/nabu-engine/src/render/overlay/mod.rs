//! Screen-space renderers for the overlay draw stream.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down)
//! - vertex shaders convert to NDC using a viewport uniform

mod rounded_rect;
mod text;

pub use rounded_rect::RoundedRectRenderer;
pub use text::TextRenderer;
