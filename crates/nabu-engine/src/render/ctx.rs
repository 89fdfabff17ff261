use crate::coords::Viewport;

/// Renderer-facing context (device/queue + target formats + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Logical pixels.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
    /// MSAA sample count every pipeline must be built with.
    pub sample_count: u32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
        sample_count: u32,
    ) -> Self {
        Self { device, queue, surface_format, viewport, scale_factor, sample_count }
    }

    #[inline]
    pub(crate) fn multisample(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState { count: self.sample_count, ..Default::default() }
    }
}

/// Target for drawing: encoder, color view (multisampled when MSAA is on),
/// optional resolve target and the depth buffer.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub resolve_target: Option<&'a wgpu::TextureView>,
    pub depth_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        resolve_target: Option<&'a wgpu::TextureView>,
        depth_view: &'a wgpu::TextureView,
    ) -> Self {
        Self { encoder, color_view, resolve_target, depth_view }
    }

    // Attachments borrow the views for `'a` only, so they can be built while
    // `encoder` is borrowed mutably.

    /// Color attachment that keeps previous contents.
    pub(crate) fn color_load(&self) -> wgpu::RenderPassColorAttachment<'a> {
        self.color_attachment(wgpu::LoadOp::Load)
    }

    pub(crate) fn color_attachment(&self, load: wgpu::LoadOp<wgpu::Color>) -> wgpu::RenderPassColorAttachment<'a> {
        wgpu::RenderPassColorAttachment {
            view: self.color_view,
            resolve_target: self.resolve_target,
            ops: wgpu::Operations { load, store: wgpu::StoreOp::Store },
            depth_slice: None,
        }
    }

    pub(crate) fn depth_attachment(&self, load: wgpu::LoadOp<f32>) -> wgpu::RenderPassDepthStencilAttachment<'a> {
        wgpu::RenderPassDepthStencilAttachment {
            view: self.depth_view,
            depth_ops: Some(wgpu::Operations { load, store: wgpu::StoreOp::Store }),
            stencil_ops: None,
        }
    }
}
