use nabu_engine::coords::Vec3;
use nabu_engine::paint::Color;
use nabu_engine::scene::{LineGeometry, Material, NodeHandle, NodeKind};

use crate::ctx::Ctx;
use crate::error::{check_len, SketchError};
use crate::theme::ThemeRole;

use super::{check_finite_points, impl_shape, node_of, Colorable};

/// Dash and gap length in pixels at the zoom a dashed line was created with.
pub const DASH_PX: f32 = 6.0;

fn with_lines(node: &NodeHandle, f: impl FnOnce(&mut LineGeometry)) {
    if let NodeKind::Lines(lines) = &mut node.borrow_mut().kind {
        f(lines);
    }
}

/// Straight segment between two points.
pub struct Line {
    node: NodeHandle,
    dash: f32,
}

impl Line {
    pub fn dashed(self, on: bool) -> Self {
        let dash = on.then_some((self.dash, self.dash));
        with_lines(&self.node, |l| l.dash = dash);
        self
    }

    /// Stroke width in logical pixels.
    pub fn width(self, px: f32) -> Self {
        with_lines(&self.node, |l| l.width = px.max(0.0));
        self
    }

    pub fn endpoints(self, a: impl Into<Vec3>, b: impl Into<Vec3>) -> Self {
        let (a, b) = (a.into(), b.into());
        with_lines(&self.node, |l| l.points = vec![a, b]);
        self
    }
}

/// Connected polyline, optionally colored per vertex.
pub struct LineStrip {
    node: NodeHandle,
    dash: f32,
}

impl LineStrip {
    pub fn dashed(self, on: bool) -> Self {
        let dash = on.then_some((self.dash, self.dash));
        with_lines(&self.node, |l| l.dash = dash);
        self
    }

    pub fn width(self, px: f32) -> Self {
        with_lines(&self.node, |l| l.width = px.max(0.0));
        self
    }
}

impl_shape!(Line, LineStrip);

impl Colorable for Line {}
impl Colorable for LineStrip {}

impl Ctx {
    pub fn line(&mut self, a: impl Into<Vec3>, b: impl Into<Vec3>) -> Line {
        let geometry = LineGeometry::segments(vec![a.into(), b.into()]);
        let node = node_of(NodeKind::Lines(geometry), Material::basic(self.color(ThemeRole::Foreground)));
        self.spawn(&node);
        Line { node, dash: DASH_PX / self.zoom() }
    }

    /// Polyline through `points`. `colors`, when given, must match `points` one to one.
    pub fn line_strip<P: Into<Vec3>>(
        &mut self,
        points: impl IntoIterator<Item = P>,
        colors: Option<Vec<Color>>,
    ) -> Result<LineStrip, SketchError> {
        let points: Vec<Vec3> = points.into_iter().map(Into::into).collect();
        check_finite_points(&points)?;
        if let Some(colors) = &colors {
            check_len("line colors", points.len(), colors.len())?;
        }

        let mut material = Material::basic(self.color(ThemeRole::Foreground));
        material.vertex_colors = colors.is_some();
        let geometry = LineGeometry { colors, ..LineGeometry::strip(points) };

        let node = node_of(NodeKind::Lines(geometry), material);
        self.spawn(&node);
        Ok(LineStrip { node, dash: DASH_PX / self.zoom() })
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::coords::Viewport;
    use nabu_engine::scene::LineTopology;

    use super::*;
    use crate::shapes::Shape;
    use crate::theme::Theme;

    fn ctx() -> Ctx {
        Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark)
    }

    fn lines(shape: &impl Shape) -> LineGeometry {
        match &shape.node().borrow().kind {
            NodeKind::Lines(l) => l.clone(),
            other => panic!("not lines: {other:?}"),
        }
    }

    // ── line ──────────────────────────────────────────────────────────────

    #[test]
    fn line_is_one_segment() {
        let mut ctx = ctx();
        let l = ctx.line([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]).width(3.0);
        let g = lines(&l);
        assert_eq!(g.topology, LineTopology::Segments);
        assert_eq!(g.points.len(), 2);
        assert_eq!(g.width, 3.0);
    }

    #[test]
    fn dash_length_follows_zoom_at_creation() {
        let mut ctx = ctx();
        ctx.set_zoom(2.0).unwrap();
        let l = ctx.line([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]).dashed(true);
        assert_eq!(lines(&l).dash, Some((DASH_PX / 2.0, DASH_PX / 2.0)));
        let l = l.dashed(false);
        assert_eq!(lines(&l).dash, None);
    }

    // ── strip ─────────────────────────────────────────────────────────────

    #[test]
    fn strip_color_count_must_match() {
        let mut ctx = ctx();
        let err = ctx
            .line_strip([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], Some(vec![Color::WHITE]))
            .err()
            .unwrap();
        assert_eq!(err, SketchError::LengthMismatch { what: "line colors", expected: 2, actual: 1 });
        assert!(ctx.scene().is_empty());
    }

    #[test]
    fn strip_uses_vertex_colors_when_given() {
        let mut ctx = ctx();
        let s = ctx
            .line_strip([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]], Some(vec![Color::WHITE; 3]))
            .unwrap();
        assert!(s.node().borrow().material.vertex_colors);
        assert_eq!(lines(&s).colors.map(|c| c.len()), Some(3));
    }

    #[test]
    fn strip_rejects_non_finite_points() {
        let mut ctx = ctx();
        let res = ctx.line_strip([[0.0, f32::INFINITY, 0.0]], None);
        assert!(matches!(res, Err(SketchError::NonFinite { .. })));
    }
}
