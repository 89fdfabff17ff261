//! 3D scene rendering.
//!
//! A frame goes through two steps:
//! - `prepare` flattens the scene into a [`WorldBatch`] on the CPU
//! - `render` uploads the batch and draws it in one depth-tested pass
//!
//! Draw order inside the pass: opaque meshes, lines, points, then
//! transparent meshes with depth writes off.

mod batch;
mod line;
mod mesh;
mod point;

pub use batch::{MeshVertex, PointInstance, ScreenLabel, SegmentInstance, WorldBatch};

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::coords::Viewport;
use crate::device::DEPTH_FORMAT;
use crate::render::common::{uniform_layout, DynamicBuffer, QUAD_INDICES, QUAD_VERTICES};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{Lighting, Scene};

/// Per-frame uniform shared by every world pipeline (96 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct WorldUniform {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 3],
    ambient: f32,
    viewport: [f32; 2],
    directional: f32,
    _pad: f32,
}

fn depth_state(write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

#[derive(Default)]
struct Pipelines {
    opaque: Option<wgpu::RenderPipeline>,
    transparent: Option<wgpu::RenderPipeline>,
    lines: Option<wgpu::RenderPipeline>,
    points: Option<wgpu::RenderPipeline>,
}

/// Renders [`Scene`] graphs through a [`Camera`].
#[derive(Default)]
pub struct WorldRenderer {
    batch: WorldBatch,

    pipeline_key: Option<(wgpu::TextureFormat, u32)>,
    pipelines: Pipelines,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    world_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    opaque_vbo: DynamicBuffer,
    transparent_vbo: DynamicBuffer,
    segment_vbo: DynamicBuffer,
    point_vbo: DynamicBuffer,
}

impl WorldRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the CPU batch for this frame.
    pub fn prepare(&mut self, scene: &Scene, camera: &Camera, viewport: Viewport) {
        self.batch.build(scene, camera, viewport);
    }

    pub fn batch(&self) -> &WorldBatch {
        &self.batch
    }

    /// Labels from the last `prepare`, already projected to overlay pixels.
    pub fn labels(&self) -> &[ScreenLabel] {
        &self.batch.labels
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, camera: &Camera, lighting: &Lighting) {
        let batch = &self.batch;
        if batch.opaque.is_empty() && batch.transparent.is_empty() && batch.segments.is_empty() && batch.points.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.write_world_uniform(ctx, camera, lighting);

        let usage = wgpu::BufferUsages::VERTEX;
        let batch = &self.batch;
        let opaque = self.opaque_vbo.upload(ctx.device, ctx.queue, "nabu world opaque vbo", usage, &batch.opaque);
        let transparent =
            self.transparent_vbo.upload(ctx.device, ctx.queue, "nabu world transparent vbo", usage, &batch.transparent);
        let segments = self.segment_vbo.upload(ctx.device, ctx.queue, "nabu world segment vbo", usage, &batch.segments);
        let points = self.point_vbo.upload(ctx.device, ctx.queue, "nabu world point vbo", usage, &batch.points);

        let Some(bind_group) = self.bind_group.as_ref() else { return; };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return; };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return; };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("nabu world pass"),
            color_attachments: &[Some(target.color_load())],
            depth_stencil_attachment: Some(target.depth_attachment(wgpu::LoadOp::Load)),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_bind_group(0, bind_group, &[]);

        if let (Some(pipeline), Some(vbo)) = (self.pipelines.opaque.as_ref(), opaque) {
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..batch.opaque.len() as u32, 0..1);
        }

        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        if let (Some(pipeline), Some(vbo)) = (self.pipelines.lines.as_ref(), segments) {
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(1, vbo.slice(..));
            rpass.draw_indexed(0..6, 0, 0..batch.segments.len() as u32);
        }

        if let (Some(pipeline), Some(vbo)) = (self.pipelines.points.as_ref(), points) {
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(1, vbo.slice(..));
            rpass.draw_indexed(0..6, 0, 0..batch.points.len() as u32);
        }

        if let (Some(pipeline), Some(vbo)) = (self.pipelines.transparent.as_ref(), transparent) {
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..batch.transparent.len() as u32, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, ctx.sample_count);
        if self.pipeline_key == Some(key) && self.pipelines.opaque.is_some() {
            return;
        }

        let bind_group_layout = uniform_layout::<WorldUniform>(
            ctx.device,
            "nabu world bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("nabu world pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let (opaque, transparent) = mesh::create_pipelines(ctx, &layout);
        self.pipelines = Pipelines {
            opaque: Some(opaque),
            transparent: Some(transparent),
            lines: Some(line::create_pipeline(ctx, &layout)),
            points: Some(point::create_pipeline(ctx, &layout)),
        };

        log::debug!("world pipelines built for {:?} x{}", ctx.surface_format, ctx.sample_count);

        self.pipeline_key = Some(key);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.world_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.world_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };

        let world_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("nabu world ubo"),
            size: std::mem::size_of::<WorldUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("nabu world bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: world_ubo.as_entire_binding() }],
        });

        self.world_ubo = Some(world_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nabu world quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nabu world quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_world_uniform(&mut self, ctx: &RenderCtx<'_>, camera: &Camera, lighting: &Lighting) {
        let Some(ubo) = self.world_ubo.as_ref() else { return; };
        let uniform = WorldUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_dir: lighting.direction.normalize_or_zero().to_array(),
            ambient: lighting.ambient,
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            directional: lighting.directional,
            _pad: 0.0,
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn gpu_structs_match_shader_layouts() {
        assert_eq!(std::mem::size_of::<WorldUniform>(), 96);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 48);
        assert_eq!(std::mem::size_of::<SegmentInstance>(), 64);
        assert_eq!(std::mem::size_of::<PointInstance>(), 32);
    }

    #[test]
    fn transparent_depth_does_not_write() {
        assert!(depth_state(true).depth_write_enabled);
        assert!(!depth_state(false).depth_write_enabled);
    }
}
