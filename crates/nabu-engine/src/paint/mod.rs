//! Paint model shared between the world renderers, the overlay and the UI.
//!
//! Colors are stored linear with straight alpha. Premultiplication happens at
//! upload time (`Color::premultiplied`), so callers can freely interpolate.

pub mod color;

pub use color::Color;
