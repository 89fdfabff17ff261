use nabu_engine::coords::{Quat, Vec3};
use nabu_engine::scene::{primitives, LineGeometry, Material, NodeHandle, NodeKind};

use crate::ctx::Ctx;
use crate::theme::ThemeRole;

use super::{impl_shape, node_of, set_mesh, Colorable};

/// Arrow head length in pixels at the zoom the arrow was created with.
pub const ARROW_HEAD_PX: f32 = 12.0;

const HEAD_ASPECT: f32 = 0.35;

/// Shaft plus cone head, pointing from `from` to `to`.
///
/// Built along local +Y and rotated into place; the group node sits at `from`.
pub struct Arrow {
    node: NodeHandle,
    shaft: NodeHandle,
    head: NodeHandle,
    from: Vec3,
    to: Vec3,
    head_length: f32,
}

impl Arrow {
    /// Head length in world units, clamped to half the arrow.
    pub fn head_length(mut self, len: f32) -> Self {
        self.head_length = len.max(0.0);
        self.layout();
        self
    }

    pub fn tip(mut self, to: impl Into<Vec3>) -> Self {
        self.to = to.into();
        self.layout();
        self
    }

    fn layout(&self) {
        let dir = self.to - self.from;
        let len = dir.length();
        let head = self.head_length.min(len * 0.5);

        {
            let mut group = self.node.borrow_mut();
            group.transform.position = self.from;
            group.transform.rotation = if len > 0.0 { Quat::from_rotation_arc(Vec3::Y, dir / len) } else { Quat::IDENTITY };
        }

        let shaft = LineGeometry { width: 2.0, ..LineGeometry::segments(vec![Vec3::ZERO, Vec3::Y * (len - head)]) };
        self.shaft.borrow_mut().kind = NodeKind::Lines(shaft);

        set_mesh(&self.head, primitives::cone(head * HEAD_ASPECT, head, 16));
        self.head.borrow_mut().transform.position = Vec3::Y * (len - head * 0.5);
    }
}

impl_shape!(Arrow);

impl Colorable for Arrow {}

impl Ctx {
    pub fn arrow(&mut self, from: impl Into<Vec3>, to: impl Into<Vec3>) -> Arrow {
        let material = Material::basic(self.color(ThemeRole::Foreground));
        let shaft = node_of(NodeKind::Group, material.clone());
        let head = node_of(NodeKind::Group, material);
        let node = NodeHandle::group(vec![shaft.clone(), head.clone()]);

        let arrow = Arrow { node, shaft, head, from: from.into(), to: to.into(), head_length: ARROW_HEAD_PX / self.zoom() };
        arrow.layout();
        self.spawn(&arrow.node);
        arrow
    }

    /// Arrow from the origin to `v`.
    pub fn vector(&mut self, v: impl Into<Vec3>) -> Arrow {
        self.arrow(Vec3::ZERO, v)
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::coords::Viewport;

    use super::*;
    use crate::shapes::Shape;
    use crate::theme::Theme;

    fn ctx() -> Ctx {
        Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark)
    }

    fn head_tip(arrow: &Arrow) -> Vec3 {
        let group = arrow.node.borrow().transform.matrix();
        let head = arrow.head.borrow();
        let NodeKind::Mesh(mesh) = &head.kind else { panic!("head is not a mesh") };
        let top = mesh.positions.iter().fold(f32::MIN, |a, p| a.max(p.y));
        (group * head.transform.matrix()).transform_point3(Vec3::Y * top)
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn tip_lands_on_target() {
        let mut ctx = ctx();
        let a = ctx.arrow([10.0, 0.0, 0.0], [10.0, 0.0, 100.0]);
        assert!((head_tip(&a) - Vec3::new(10.0, 0.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn head_shrinks_with_zoom() {
        let mut ctx = ctx();
        ctx.set_zoom(4.0).unwrap();
        let a = ctx.vector([0.0, 100.0, 0.0]);
        assert_eq!(a.head_length, ARROW_HEAD_PX / 4.0);
    }

    #[test]
    fn short_arrow_clamps_head_to_half() {
        let mut ctx = ctx();
        let a = ctx.vector([0.0, 4.0, 0.0]).head_length(100.0);
        let shaft_end = match &a.shaft.borrow().kind {
            NodeKind::Lines(l) => l.points[1],
            _ => Vec3::NAN,
        };
        assert_eq!(shaft_end, Vec3::new(0.0, 2.0, 0.0));
        assert!((head_tip(&a) - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn only_the_group_is_a_member() {
        let mut ctx = ctx();
        let a = ctx.vector([1.0, 0.0, 0.0]);
        assert_eq!(ctx.scene().len(), 1);
        assert!(ctx.scene().contains(a.node()));
    }
}
