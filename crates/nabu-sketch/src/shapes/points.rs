use nabu_engine::coords::Vec3;
use nabu_engine::paint::Color;
use nabu_engine::scene::{Material, NodeHandle, NodeKind, PointGeometry};

use crate::ctx::Ctx;
use crate::error::{check_len, SketchError};
use crate::theme::ThemeRole;

use super::{check_finite_points, impl_shape, node_of, Colorable};

/// Round point sprites of constant pixel size.
pub struct Points {
    node: NodeHandle,
}

impl Points {
    /// Point diameter in logical pixels.
    pub fn size(self, px: f32) -> Self {
        if let NodeKind::Points(points) = &mut self.node.borrow_mut().kind {
            points.size = px.max(0.0);
        }
        self
    }
}

impl_shape!(Points);

impl Colorable for Points {}

impl Ctx {
    /// A point cloud. `colors`, when given, must match `positions` one to one.
    pub fn points<P: Into<Vec3>>(
        &mut self,
        positions: impl IntoIterator<Item = P>,
        colors: Option<Vec<Color>>,
    ) -> Result<Points, SketchError> {
        let positions: Vec<Vec3> = positions.into_iter().map(Into::into).collect();
        check_finite_points(&positions)?;
        if let Some(colors) = &colors {
            check_len("point colors", positions.len(), colors.len())?;
        }

        let mut material = Material::basic(self.color(ThemeRole::Accent));
        material.vertex_colors = colors.is_some();
        let geometry = PointGeometry { positions, colors, ..PointGeometry::default() };

        let node = node_of(NodeKind::Points(geometry), material);
        self.spawn(&node);
        Ok(Points { node })
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

    #[test]
    fn color_count_must_match() {
        let mut ctx = ctx();
        let res = ctx.points([[0.0, 0.0, 0.0]; 4], Some(vec![Color::WHITE; 3]));
        assert_eq!(
            res.err(),
            Some(SketchError::LengthMismatch { what: "point colors", expected: 4, actual: 3 })
        );
    }

    #[test]
    fn size_is_stored_in_pixels() {
        let mut ctx = ctx();
        let p = ctx.points([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], None).unwrap().size(9.0);
        match &p.node().borrow().kind {
            NodeKind::Points(g) => {
                assert_eq!(g.size, 9.0);
                assert_eq!(g.positions.len(), 2);
            }
            other => panic!("not points: {other:?}"),
        }
        assert!(!p.node().borrow().material.vertex_colors);
    }

    #[test]
    fn nan_position_is_rejected() {
        let mut ctx = ctx();
        let res = ctx.points([[f32::NAN, 0.0, 0.0]], None);
        assert!(matches!(res, Err(SketchError::NonFinite { .. })));
        assert!(ctx.scene().is_empty());
    }
}
