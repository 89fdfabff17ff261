//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - owning the depth buffer and multisample color target sized to the surface
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod frame;
mod init;
mod surface;
mod targets;

pub use context::Gpu;
pub use surface::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use targets::DEPTH_FORMAT;
