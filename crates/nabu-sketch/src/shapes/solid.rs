use nabu_engine::scene::{primitives, Material, NodeHandle, NodeKind};

use crate::ctx::Ctx;
use crate::theme::ThemeRole;

use super::{impl_shape, node_of, set_mesh, Colorable, Materializable};

pub struct Sphere {
    node: NodeHandle,
    radius: f32,
    segments: u32,
}

impl Sphere {
    pub fn radius(mut self, r: f32) -> Self {
        self.radius = r;
        self.rebuild();
        self
    }

    /// Segments around the equator; half as many run pole to pole.
    pub fn segments(mut self, n: u32) -> Self {
        self.segments = n;
        self.rebuild();
        self
    }

    fn rebuild(&self) {
        set_mesh(&self.node, primitives::sphere(self.radius, self.segments, (self.segments / 2).max(2)));
    }
}

pub struct Cone {
    node: NodeHandle,
    radius: f32,
    height: f32,
    segments: u32,
}

impl Cone {
    pub fn radius(mut self, r: f32) -> Self {
        self.radius = r;
        self.rebuild();
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.height = h;
        self.rebuild();
        self
    }

    pub fn segments(mut self, n: u32) -> Self {
        self.segments = n;
        self.rebuild();
        self
    }

    fn rebuild(&self) {
        set_mesh(&self.node, primitives::cone(self.radius, self.height, self.segments));
    }
}

pub struct Cuboid {
    node: NodeHandle,
}

impl Cuboid {
    pub fn size(self, width: f32, height: f32, depth: f32) -> Self {
        set_mesh(&self.node, primitives::cuboid(width, height, depth));
        self
    }
}

pub struct Cylinder {
    node: NodeHandle,
    radius: f32,
    height: f32,
    segments: u32,
}

impl Cylinder {
    pub fn radius(mut self, r: f32) -> Self {
        self.radius = r;
        self.rebuild();
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.height = h;
        self.rebuild();
        self
    }

    pub fn segments(mut self, n: u32) -> Self {
        self.segments = n;
        self.rebuild();
        self
    }

    fn rebuild(&self) {
        set_mesh(&self.node, primitives::cylinder(self.radius, self.radius, self.height, self.segments));
    }
}

/// Flat rectangle in the XY plane.
pub struct Plane {
    node: NodeHandle,
}

impl Plane {
    pub fn size(self, width: f32, height: f32) -> Self {
        set_mesh(&self.node, primitives::plane(width, height, 1, 1));
        self
    }
}

pub struct Torus {
    node: NodeHandle,
    radius: f32,
    tube: f32,
    radial: u32,
    tubular: u32,
}

impl Torus {
    pub fn radius(mut self, r: f32) -> Self {
        self.radius = r;
        self.rebuild();
        self
    }

    pub fn tube(mut self, t: f32) -> Self {
        self.tube = t;
        self.rebuild();
        self
    }

    pub fn segments(mut self, radial: u32, tubular: u32) -> Self {
        self.radial = radial;
        self.tubular = tubular;
        self.rebuild();
        self
    }

    fn rebuild(&self) {
        set_mesh(&self.node, primitives::torus(self.radius, self.tube, self.radial, self.tubular));
    }
}

/// Filled disc in the XY plane.
pub struct Circle {
    node: NodeHandle,
    radius: f32,
    segments: u32,
}

impl Circle {
    pub fn radius(mut self, r: f32) -> Self {
        self.radius = r;
        self.rebuild();
        self
    }

    pub fn segments(mut self, n: u32) -> Self {
        self.segments = n;
        self.rebuild();
        self
    }

    fn rebuild(&self) {
        set_mesh(&self.node, primitives::circle(self.radius, self.segments));
    }
}

impl_shape!(Sphere, Cone, Cuboid, Cylinder, Plane, Torus, Circle);

impl Colorable for Sphere {}
impl Colorable for Cone {}
impl Colorable for Cuboid {}
impl Colorable for Cylinder {}
impl Colorable for Plane {}
impl Colorable for Torus {}
impl Colorable for Circle {}

impl Materializable for Sphere {}
impl Materializable for Cone {}
impl Materializable for Cuboid {}
impl Materializable for Cylinder {}
impl Materializable for Plane {}
impl Materializable for Torus {}
impl Materializable for Circle {}

impl Ctx {
    fn solid(&mut self) -> NodeHandle {
        let node = node_of(NodeKind::Group, Material::standard(self.color(ThemeRole::Primary)));
        self.spawn(&node);
        node
    }

    pub fn sphere(&mut self) -> Sphere {
        let s = Sphere { node: self.solid(), radius: 50.0, segments: 32 };
        s.rebuild();
        s
    }

    pub fn cone(&mut self) -> Cone {
        let c = Cone { node: self.solid(), radius: 40.0, height: 100.0, segments: 32 };
        c.rebuild();
        c
    }

    pub fn cuboid(&mut self) -> Cuboid {
        Cuboid { node: self.solid() }.size(80.0, 80.0, 80.0)
    }

    pub fn cylinder(&mut self) -> Cylinder {
        let c = Cylinder { node: self.solid(), radius: 40.0, height: 100.0, segments: 32 };
        c.rebuild();
        c
    }

    pub fn plane(&mut self) -> Plane {
        Plane { node: self.solid() }.size(200.0, 200.0)
    }

    pub fn torus(&mut self) -> Torus {
        let t = Torus { node: self.solid(), radius: 60.0, tube: 20.0, radial: 16, tubular: 48 };
        t.rebuild();
        t
    }

    pub fn circle(&mut self) -> Circle {
        let c = Circle { node: self.solid(), radius: 50.0, segments: 48 };
        c.rebuild();
        c
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::coords::Viewport;
    use nabu_engine::scene::MeshGeometry;

    use super::*;
    use crate::shapes::Shape;
    use crate::theme::Theme;

    fn ctx() -> Ctx {
        Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark)
    }

    fn mesh(shape: &impl Shape) -> MeshGeometry {
        match &shape.node().borrow().kind {
            NodeKind::Mesh(m) => m.clone(),
            other => panic!("not a mesh: {other:?}"),
        }
    }

    // ── factories ─────────────────────────────────────────────────────────

    #[test]
    fn factories_spawn_their_node() {
        let mut ctx = ctx();
        let s = ctx.sphere();
        let c = ctx.cuboid();
        assert_eq!(ctx.scene().len(), 2);
        assert!(ctx.scene().contains(s.node()));
        assert!(ctx.scene().contains(c.node()));
    }

    #[test]
    fn solids_default_to_theme_primary() {
        let mut ctx = ctx();
        let c = ctx.cone();
        assert_eq!(c.node().borrow().material.color, ctx.color(ThemeRole::Primary));
    }

    // ── dimensions ────────────────────────────────────────────────────────

    #[test]
    fn sphere_radius_rebuilds_geometry() {
        let mut ctx = ctx();
        let s = ctx.sphere().radius(5.0);
        let m = mesh(&s);
        assert!(m.positions.iter().all(|p| (p.length() - 5.0).abs() < 1e-3));
    }

    #[test]
    fn cuboid_size_sets_extents() {
        let mut ctx = ctx();
        let c = ctx.cuboid().size(2.0, 4.0, 6.0);
        let m = mesh(&c);
        let max = m.positions.iter().fold(nabu_engine::coords::Vec3::ZERO, |a, p| a.max(*p));
        assert_eq!(max.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(m.vertex_count(), 24);
    }

    #[test]
    fn circle_segments_change_vertex_count() {
        let mut ctx = ctx();
        let c = ctx.circle().segments(8);
        assert_eq!(mesh(&c).triangle_count(), 8);
    }

    #[test]
    fn existing_shapes_keep_color_after_theme_change() {
        let mut ctx = ctx();
        let s = ctx.sphere();
        let before = s.node().borrow().material.color;
        ctx.set_theme(Theme::Light);
        assert_eq!(s.node().borrow().material.color, before);
        let t = ctx.sphere();
        assert_ne!(t.node().borrow().material.color, before);
    }
}
