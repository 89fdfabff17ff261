//! Coordinate and geometry types shared across engine renderers and UI.
//!
//! Two spaces exist side by side:
//! - overlay space: logical pixels, origin top-left, +X right, +Y down (`Vec2`, `Rect`)
//! - world space: right-handed, +Y up (`Vec3`, re-exported from `glam`)
//!
//! `Viewport` converts between overlay pixels and the centered pixel space the
//! default orthographic camera uses.

mod rect;
mod vec2;
mod viewport;

pub use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
