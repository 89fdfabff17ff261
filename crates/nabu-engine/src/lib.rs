//! Nabu engine crate.
//!
//! Retained 3D scene graph, cameras and orbit controls, wgpu renderers for the
//! world and the 2D overlay, plus the winit runtime that drives them.

pub mod camera;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;
