/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    /// Swapchain view. The resolve target when multisampling.
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
