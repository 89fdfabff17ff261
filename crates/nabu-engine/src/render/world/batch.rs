//! Flattens a [`Scene`] into world-space vertex lists for one frame.
//!
//! Transforms are baked on the CPU, so the GPU side only sees a handful of
//! large buffers regardless of how many nodes the scene holds.

use bytemuck::{Pod, Zeroable};
use glam::Mat3;

use crate::camera::Camera;
use crate::coords::{Mat4, Vec2, Vec3, Viewport};
use crate::paint::Color;
use crate::scene::{
    dash_segments,
    LineGeometry,
    LineTopology,
    Material,
    MaterialKind,
    MeshGeometry,
    Node,
    NodeKind,
    PointGeometry,
    Scene,
    TextLabel,
    TextSizing,
};

/// Shading selector stored per vertex.
const SHADE_BASIC: f32 = 0.0;
const SHADE_STANDARD: f32 = 1.0;
const SHADE_NORMAL: f32 = 2.0;

/// World-space triangle vertex (48 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub shading: f32,
    pub normal: [f32; 3],
    pub _pad: f32,
    /// Straight alpha.
    pub color: [f32; 4],
}

/// One stroked segment, expanded to a screen-space quad on the GPU (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub a: [f32; 3],
    pub width: f32,
    pub b: [f32; 3],
    pub _pad: f32,
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
}

/// One round point sprite (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Text label projected to overlay pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLabel {
    pub text: String,
    /// Projected anchor in logical pixels (top-left origin).
    pub anchor: Vec2,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
}

/// Everything the world renderer draws in a frame.
#[derive(Debug, Default)]
pub struct WorldBatch {
    pub opaque: Vec<MeshVertex>,
    /// Drawn after `opaque` without depth writes.
    pub transparent: Vec<MeshVertex>,
    pub segments: Vec<SegmentInstance>,
    pub points: Vec<PointInstance>,
    pub labels: Vec<ScreenLabel>,
}

impl WorldBatch {
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
        self.segments.clear();
        self.points.clear();
        self.labels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty()
            && self.transparent.is_empty()
            && self.segments.is_empty()
            && self.points.is_empty()
            && self.labels.is_empty()
    }

    /// Rebuilds the batch from `scene` as seen through `camera`.
    pub fn build(&mut self, scene: &Scene, camera: &Camera, viewport: Viewport) {
        self.clear();
        scene.walk(&mut |node, world| self.push_node(node, world, camera, viewport));
    }

    fn push_node(&mut self, node: &Node, world: Mat4, camera: &Camera, viewport: Viewport) {
        let material = &node.material;
        match &node.kind {
            NodeKind::Group => {}
            NodeKind::Mesh(mesh) if material.wireframe => self.push_wireframe(mesh, material, world),
            NodeKind::Mesh(mesh) => self.push_mesh(mesh, material, world),
            NodeKind::Lines(lines) => self.push_lines(lines, material, world),
            NodeKind::Points(points) => self.push_points(points, material, world),
            NodeKind::Text(label) => self.push_label(label, material, world, camera, viewport),
        }
    }

    fn push_mesh(&mut self, mesh: &MeshGeometry, material: &Material, world: Mat4) {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        let shading = match material.kind {
            MaterialKind::Basic => SHADE_BASIC,
            MaterialKind::Standard => SHADE_STANDARD,
            MaterialKind::Normal => SHADE_NORMAL,
        };
        let colors = vertex_colors(material, mesh.colors.as_deref(), mesh.positions.len());
        let base = material.effective_color();

        let out = if material.is_transparent() || colors.is_some_and(|c| c.iter().any(|c| c.a < 1.0)) {
            &mut self.transparent
        } else {
            &mut self.opaque
        };

        for &i in &mesh.indices {
            let i = i as usize;
            let Some(&p) = mesh.positions.get(i) else { continue; };
            let n = mesh.normals.get(i).copied().unwrap_or(Vec3::Y);
            let color = match colors {
                Some(c) => c[i].with_alpha(c[i].a * material.opacity),
                None => base,
            };
            out.push(MeshVertex {
                position: world.transform_point3(p).to_array(),
                shading,
                normal: (normal_matrix * n).normalize_or(Vec3::Y).to_array(),
                _pad: 0.0,
                color: [color.r, color.g, color.b, color.a],
            });
        }
    }

    fn push_wireframe(&mut self, mesh: &MeshGeometry, material: &Material, world: Mat4) {
        let color = to_array(material.effective_color());
        for (a, b) in mesh.edges() {
            let (Some(&pa), Some(&pb)) = (mesh.positions.get(a as usize), mesh.positions.get(b as usize)) else {
                continue;
            };
            self.segments.push(SegmentInstance {
                a: world.transform_point3(pa).to_array(),
                width: 1.0,
                b: world.transform_point3(pb).to_array(),
                _pad: 0.0,
                color_a: color,
                color_b: color,
            });
        }
    }

    fn push_lines(&mut self, lines: &LineGeometry, material: &Material, world: Mat4) {
        let colors = vertex_colors(material, lines.colors.as_deref(), lines.points.len());
        let color_at = |i: usize| match colors {
            Some(c) => to_array(c[i].with_alpha(c[i].a * material.opacity)),
            None => to_array(material.effective_color()),
        };

        let mut dashes = Vec::new();
        let mut phase = 0.0;
        for (a, b, ia, ib) in lines.segment_iter() {
            let wa = world.transform_point3(a);
            let wb = world.transform_point3(b);
            let (ca, cb) = (color_at(ia), color_at(ib));

            let Some((dash, gap)) = lines.dash else {
                self.segments.push(segment(wa, wb, lines.width, ca, cb));
                continue;
            };

            if lines.topology == LineTopology::Segments {
                phase = 0.0;
            }
            dashes.clear();
            phase = dash_segments(wa, wb, dash, gap, phase, &mut dashes);
            for &(da, db) in &dashes {
                self.segments.push(segment(da, db, lines.width, ca, cb));
            }
        }
    }

    fn push_points(&mut self, points: &PointGeometry, material: &Material, world: Mat4) {
        let colors = vertex_colors(material, points.colors.as_deref(), points.positions.len());
        for (i, &p) in points.positions.iter().enumerate() {
            let color = match colors {
                Some(c) => c[i].with_alpha(c[i].a * material.opacity),
                None => material.effective_color(),
            };
            self.points.push(PointInstance {
                position: world.transform_point3(p).to_array(),
                size: points.size,
                color: to_array(color),
            });
        }
    }

    fn push_label(&mut self, label: &TextLabel, material: &Material, world: Mat4, camera: &Camera, viewport: Viewport) {
        let Some(anchor) = camera.project(world.transform_point3(Vec3::ZERO), viewport) else {
            return;
        };
        let size = match label.sizing {
            TextSizing::Screen => label.size,
            TextSizing::World => {
                let world_scale = world.x_axis.truncate().length();
                label.size * world_scale * camera.pixels_per_unit(viewport)
            }
        };
        if size < 1.0 || !size.is_finite() {
            return;
        }
        self.labels.push(ScreenLabel {
            text: label.text.clone(),
            anchor,
            size,
            color: material.effective_color(),
        });
    }
}

/// Per-vertex colors when the material asks for them and they line up with the geometry.
fn vertex_colors<'a>(material: &Material, colors: Option<&'a [Color]>, len: usize) -> Option<&'a [Color]> {
    colors.filter(|c| material.vertex_colors && c.len() == len)
}

fn segment(a: Vec3, b: Vec3, width: f32, ca: [f32; 4], cb: [f32; 4]) -> SegmentInstance {
    SegmentInstance { a: a.to_array(), width, b: b.to_array(), _pad: 0.0, color_a: ca, color_b: cb }
}

#[inline]
fn to_array(c: Color) -> [f32; 4] {
    [c.r, c.g, c.b, c.a]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{primitives, NodeHandle};

    fn scene_with(nodes: &[NodeHandle]) -> Scene {
        let mut scene = Scene::new();
        for n in nodes {
            scene.insert(n);
        }
        scene
    }

    fn build(scene: &Scene) -> WorldBatch {
        let mut batch = WorldBatch::default();
        let cam = Camera::orthographic(200.0, 200.0);
        batch.build(scene, &cam, Viewport::new(200.0, 200.0));
        batch
    }

    // ── meshes ────────────────────────────────────────────────────────────

    #[test]
    fn mesh_is_expanded_per_index() {
        let mesh = primitives::cuboid(1.0, 1.0, 1.0);
        let node = NodeHandle::new(Node::new(NodeKind::Mesh(mesh), Material::default()));
        let batch = build(&scene_with(&[node]));
        assert_eq!(batch.opaque.len(), 36);
        assert!(batch.transparent.is_empty());
    }

    #[test]
    fn translucent_mesh_goes_to_transparent_list() {
        let mut material = Material::default();
        material.opacity = 0.5;
        let node = NodeHandle::new(Node::new(NodeKind::Mesh(primitives::circle(1.0, 8)), material));
        let batch = build(&scene_with(&[node]));
        assert!(batch.opaque.is_empty());
        assert_eq!(batch.transparent.len(), 24);
        assert_eq!(batch.transparent[0].color[3], 0.5);
    }

    #[test]
    fn wireframe_emits_segments_only() {
        let mut material = Material::default();
        material.wireframe = true;
        let node = NodeHandle::new(Node::new(NodeKind::Mesh(primitives::plane(1.0, 1.0, 1, 1)), material));
        let batch = build(&scene_with(&[node]));
        assert!(batch.opaque.is_empty());
        assert_eq!(batch.segments.len(), 5);
    }

    #[test]
    fn world_transform_is_baked() {
        let node = NodeHandle::new(Node::new(NodeKind::Points(PointGeometry {
            positions: vec![Vec3::ZERO],
            ..PointGeometry::default()
        }), Material::default()));
        node.borrow_mut().transform.position = Vec3::new(3.0, 0.0, 0.0);
        let batch = build(&scene_with(&[node]));
        assert_eq!(batch.points[0].position, [3.0, 0.0, 0.0]);
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn dashed_line_splits_segments() {
        let mut geom = LineGeometry::strip(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]);
        geom.dash = Some((1.0, 1.0));
        let node = NodeHandle::new(Node::new(NodeKind::Lines(geom), Material::default()));
        let batch = build(&scene_with(&[node]));
        assert_eq!(batch.segments.len(), 5);
    }

    #[test]
    fn vertex_colors_require_matching_length() {
        let mut geom = LineGeometry::strip(vec![Vec3::ZERO, Vec3::X]);
        geom.colors = Some(vec![Color::BLACK]);
        let mut material = Material::basic(Color::WHITE);
        material.vertex_colors = true;
        let node = NodeHandle::new(Node::new(NodeKind::Lines(geom), material));
        let batch = build(&scene_with(&[node]));
        assert_eq!(batch.segments[0].color_a, [1.0, 1.0, 1.0, 1.0]);
    }

    // ── visibility / labels ───────────────────────────────────────────────

    #[test]
    fn non_members_and_hidden_nodes_are_skipped() {
        let hidden = NodeHandle::new(Node::new(NodeKind::Mesh(primitives::circle(1.0, 8)), Material::default()));
        hidden.borrow_mut().visible = false;
        let batch = build(&scene_with(&[hidden]));
        assert!(batch.is_empty());
    }

    #[test]
    fn screen_label_keeps_pixel_size_under_zoom() {
        let label = NodeHandle::new(Node::new(
            NodeKind::Text(TextLabel::new("hi", 14.0, TextSizing::Screen)),
            Material::default(),
        ));
        let world = NodeHandle::new(Node::new(
            NodeKind::Text(TextLabel::new("hi", 14.0, TextSizing::World)),
            Material::default(),
        ));
        let scene = scene_with(&[label, world]);
        let mut cam = Camera::orthographic(200.0, 200.0);
        cam.set_zoom(2.0);
        let mut batch = WorldBatch::default();
        batch.build(&scene, &cam, Viewport::new(200.0, 200.0));

        assert_eq!(batch.labels.len(), 2);
        assert_eq!(batch.labels[0].size, 14.0);
        assert!((batch.labels[1].size - 28.0).abs() < 1e-3);
        assert!((batch.labels[0].anchor.x - 100.0).abs() < 1e-3);
    }
}
