//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and build them
//! lazily on first use. Two families:
//! - `world`: depth-tested 3D scene geometry seen through a camera
//! - `overlay`: 2D draw lists in logical pixels (top-left origin, +Y down)
//!
//! Every pipeline is built against the surface format and the MSAA sample
//! count carried by [`RenderCtx`].

mod common;
mod ctx;
pub mod overlay;
pub mod world;

pub use ctx::{RenderCtx, RenderTarget};
