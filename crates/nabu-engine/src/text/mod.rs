//! Font loading and text measurement.
//!
//! Glyph rasterization lives in `render::overlay::text`; this module only owns
//! parsed fonts and layout queries shared by the renderer and the UI layer.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
