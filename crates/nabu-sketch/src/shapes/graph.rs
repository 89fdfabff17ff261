use std::rc::Rc;

use nabu_engine::coords::Vec3;
use nabu_engine::paint::Color;
use nabu_engine::scene::{primitives, LineGeometry, Material, NodeHandle, NodeKind};

use crate::ctx::Ctx;
use crate::error::{check_range, SketchError};
use crate::theme::ThemeRole;

use super::{impl_shape, node_of, Colorable, Materializable};

/// Target distance between graph samples, in screen pixels.
pub const SAMPLE_SPACING_PX: f32 = 2.0;

/// Height of surface grid lines above the surface, in screen pixels.
pub const GRID_LIFT_PX: f32 = 1.0;

/// Per-axis sample cap for surfaces; a 2D grid at line density would be
/// hundreds of thousands of vertices.
pub const MAX_SURFACE_SAMPLES: usize = 256;

/// Sample cap for a single curve. Huge ranges at high zoom are drawn coarser
/// rather than allocating without bound.
pub const MAX_GRAPH_SAMPLES: usize = 1 << 16;

/// One sample of a plotted function: a height and an optional color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GraphSample {
    pub y: f32,
    pub color: Option<Color>,
}

impl From<f32> for GraphSample {
    fn from(y: f32) -> Self {
        Self { y, color: None }
    }
}

impl From<(f32, Color)> for GraphSample {
    fn from((y, color): (f32, Color)) -> Self {
        Self { y, color: Some(color) }
    }
}

/// Samples needed for roughly one every [`SAMPLE_SPACING_PX`] screen pixels
/// over `from..to` at `zoom`, within `2..=MAX_GRAPH_SAMPLES`.
pub fn sample_count(from: f32, to: f32, zoom: f32) -> usize {
    let n = ((to - from) * zoom / SAMPLE_SPACING_PX).ceil() + 1.0;
    if n.is_finite() { (n as usize).clamp(2, MAX_GRAPH_SAMPLES) } else { 2 }
}

/// `n` evenly spaced positions; the first is exactly `from`, the last exactly `to`.
fn sample_positions(from: f32, to: f32, n: usize) -> impl Iterator<Item = f32> {
    let last = n - 1;
    (0..n).map(move |i| if i == last { to } else { from + (to - from) * i as f32 / last as f32 })
}

fn resolve_range(range: Option<(f32, f32)>, half_width: f32) -> Result<(f32, f32), SketchError> {
    match range {
        Some((from, to)) => {
            check_range(from, to)?;
            Ok((from, to))
        }
        None => Ok((-half_width, half_width)),
    }
}

/// Sampled plot of `y = f(x)` as a polyline in the XY plane.
pub struct Graph {
    node: NodeHandle,
}

impl Graph {
    /// The sampled vertices.
    pub fn points(&self) -> Vec<Vec3> {
        match &self.node.borrow().kind {
            NodeKind::Lines(l) => l.points.clone(),
            _ => Vec::new(),
        }
    }

    pub fn width(self, px: f32) -> Self {
        if let NodeKind::Lines(l) = &mut self.node.borrow_mut().kind {
            l.width = px.max(0.0);
        }
        self
    }
}

/// Sampled surface `y = f(x, z)`, optionally with grid lines traced on it.
pub struct Graph3d {
    node: NodeHandle,
    f: Rc<dyn Fn(f32, f32) -> f32>,
    range_x: (f32, f32),
    range_z: (f32, f32),
    samples: (usize, usize),
    lift: f32,
    grid_color: Color,
    grid: Option<NodeHandle>,
}

impl Graph3d {
    /// Samples per axis as `(x, z)`.
    pub fn samples(&self) -> (usize, usize) {
        self.samples
    }

    /// Traces `count` lines of constant z and `count` lines of constant x over
    /// the surface, re-sampled from the function. Replaces earlier grid lines.
    /// `count` is clamped to `2..=MAX_SURFACE_SAMPLES`.
    pub fn grid_lines(mut self, count: u32) -> Result<Self, SketchError> {
        let count = (count as usize).clamp(2, MAX_SURFACE_SAMPLES);
        let (x0, x1) = self.range_x;
        let (z0, z1) = self.range_z;
        let (nx, nz) = self.samples;

        let mut points = Vec::with_capacity(count * 2 * (nx.max(nz) - 1) * 2);
        for z in sample_positions(z0, z1, count) {
            self.trace(sample_positions(x0, x1, nx).map(|x| (x, z)), &mut points)?;
        }
        for x in sample_positions(x0, x1, count) {
            self.trace(sample_positions(z0, z1, nz).map(|z| (x, z)), &mut points)?;
        }

        let geometry = LineGeometry { width: 1.0, ..LineGeometry::segments(points) };
        let lines = node_of(NodeKind::Lines(geometry), Material::basic(self.grid_color));

        let mut group = self.node.borrow_mut();
        if let Some(old) = self.grid.take() {
            group.children.retain(|c| *c != old);
        }
        group.children.push(lines.clone());
        drop(group);
        self.grid = Some(lines);
        Ok(self)
    }

    /// Appends the path through `coords` as segment pairs.
    fn trace(&self, coords: impl Iterator<Item = (f32, f32)>, out: &mut Vec<Vec3>) -> Result<(), SketchError> {
        let mut prev: Option<Vec3> = None;
        for (x, z) in coords {
            let y = (self.f)(x, z);
            if !y.is_finite() {
                return Err(SketchError::NonFinite { x, value: y });
            }
            let p = Vec3::new(x, y + self.lift, z);
            if let Some(a) = prev {
                out.extend_from_slice(&[a, p]);
            }
            prev = Some(p);
        }
        Ok(())
    }
}

impl_shape!(Graph, Graph3d);

impl Colorable for Graph {}
impl Colorable for Graph3d {}
impl Materializable for Graph3d {}

impl Ctx {
    /// Plots `y = f(x)` over `range`, or over the visible width when `None`.
    ///
    /// Sampling density follows the current zoom so the curve stays smooth on
    /// screen. If any sample carries a color the line is vertex colored and
    /// `color` is ignored; uncolored samples then take the theme foreground.
    pub fn graph<S: Into<GraphSample>>(
        &mut self,
        mut f: impl FnMut(f32) -> S,
        color: Option<Color>,
        range: Option<(f32, f32)>,
    ) -> Result<Graph, SketchError> {
        let (from, to) = resolve_range(range, self.visible_half_width())?;
        let n = sample_count(from, to, self.zoom());

        let mut points = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n);
        let mut any_color = false;
        for x in sample_positions(from, to, n) {
            let sample: GraphSample = f(x).into();
            if !sample.y.is_finite() {
                return Err(SketchError::NonFinite { x, value: sample.y });
            }
            any_color |= sample.color.is_some();
            points.push(Vec3::new(x, sample.y, 0.0));
            colors.push(sample.color);
        }

        let fg = self.color(ThemeRole::Foreground);
        let mut material = Material::basic(color.unwrap_or(fg));
        let mut geometry = LineGeometry::strip(points);
        if any_color {
            material.color = Color::WHITE;
            material.vertex_colors = true;
            geometry.colors = Some(colors.into_iter().map(|c| c.unwrap_or(fg)).collect());
        }

        let node = node_of(NodeKind::Lines(geometry), material);
        self.spawn(&node);
        Ok(Graph { node })
    }

    /// Plots the surface `y = f(x, z)`. Each range defaults to the visible width.
    pub fn graph3d(
        &mut self,
        f: impl Fn(f32, f32) -> f32 + 'static,
        range_x: Option<(f32, f32)>,
        range_z: Option<(f32, f32)>,
    ) -> Result<Graph3d, SketchError> {
        let half = self.visible_half_width();
        let (x0, x1) = resolve_range(range_x, half)?;
        let (z0, z1) = resolve_range(range_z, half)?;
        let zoom = self.zoom();
        let nx = sample_count(x0, x1, zoom).min(MAX_SURFACE_SAMPLES);
        let nz = sample_count(z0, z1, zoom).min(MAX_SURFACE_SAMPLES);

        let xs: Vec<f32> = sample_positions(x0, x1, nx).collect();
        let zs: Vec<f32> = sample_positions(z0, z1, nz).collect();
        let mut heights = Vec::with_capacity(nx * nz);
        for &z in &zs {
            for &x in &xs {
                let y = f(x, z);
                if !y.is_finite() {
                    return Err(SketchError::NonFinite { x, value: y });
                }
                heights.push(y);
            }
        }

        let mesh = primitives::surface(nx as u32 - 1, nz as u32 - 1, |col, row| {
            Vec3::new(xs[col as usize], heights[row as usize * nx + col as usize], zs[row as usize])
        });
        let surface = node_of(NodeKind::Mesh(mesh), Material::standard(self.color(ThemeRole::Primary)));
        let node = NodeHandle::group(vec![surface]);
        self.spawn(&node);

        Ok(Graph3d {
            node,
            f: Rc::new(f),
            range_x: (x0, x1),
            range_z: (z0, z1),
            samples: (nx, nz),
            lift: GRID_LIFT_PX / zoom,
            grid_color: self.color(ThemeRole::Foreground).with_alpha(0.5),
            grid: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::coords::Viewport;

    use super::*;
    use crate::shapes::Shape;
    use crate::theme::{theme_color, Theme};

    fn ctx() -> Ctx {
        Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark)
    }

    // ── sample count ──────────────────────────────────────────────────────

    #[test]
    fn count_is_one_sample_per_two_pixels() {
        assert_eq!(sample_count(-5.0, 5.0, 1.0), 6);
        assert_eq!(sample_count(-5.0, 5.0, 10.0), 51);
        assert_eq!(sample_count(0.0, 0.001, 1.0), 2);
    }

    #[test]
    fn count_is_capped_for_huge_ranges() {
        assert_eq!(sample_count(-1e30, 1e30, 1.0), MAX_GRAPH_SAMPLES);
        assert_eq!(sample_count(-1e12, 1e12, 1.0), MAX_GRAPH_SAMPLES);
        assert_eq!(sample_count(0.0, f32::MAX, f32::MAX), 2);
    }

    #[test]
    fn positions_hit_both_ends_exactly() {
        let xs: Vec<f32> = sample_positions(-0.3, 0.7, 7).collect();
        assert_eq!(xs.len(), 7);
        assert_eq!(xs[0], -0.3);
        assert_eq!(xs[6], 0.7);
    }

    // ── graph ─────────────────────────────────────────────────────────────

    #[test]
    fn parabola_endpoints() {
        let mut ctx = ctx();
        let g = ctx.graph(|x| x * x, None, Some((-5.0, 5.0))).unwrap();
        let pts = g.points();
        assert_eq!(pts.len(), sample_count(-5.0, 5.0, 1.0));
        assert_eq!(pts[0], Vec3::new(-5.0, 25.0, 0.0));
        assert_eq!(*pts.last().unwrap(), Vec3::new(5.0, 25.0, 0.0));
    }

    #[test]
    fn inverted_range_is_an_error() {
        let mut ctx = ctx();
        let res = ctx.graph(|x| x, None, Some((5.0, -5.0)));
        assert_eq!(res.err(), Some(SketchError::InvalidRange { from: 5.0, to: -5.0 }));
        assert!(ctx.scene().is_empty());
    }

    #[test]
    fn default_range_is_visible_width() {
        let mut ctx = ctx();
        ctx.set_zoom(2.0).unwrap();
        let pts = ctx.graph(|_| 0.0, None, None).unwrap().points();
        assert_eq!(pts[0].x, -200.0);
        assert_eq!(pts.last().unwrap().x, 200.0);
        assert_eq!(pts.len(), sample_count(-200.0, 200.0, 2.0));
    }

    #[test]
    fn density_follows_zoom() {
        let mut ctx = ctx();
        let coarse = ctx.graph(|x| x, None, Some((0.0, 10.0))).unwrap().points().len();
        ctx.set_zoom(8.0).unwrap();
        let fine = ctx.graph(|x| x, None, Some((0.0, 10.0))).unwrap().points().len();
        assert!(fine > coarse);
    }

    #[test]
    fn non_finite_sample_fails() {
        let mut ctx = ctx();
        let res = ctx.graph(|x| 1.0 / x, None, Some((-2.0, 2.0)));
        assert!(matches!(res, Err(SketchError::NonFinite { x, .. }) if x == 0.0));
    }

    #[test]
    fn per_sample_colors_override_uniform_color() {
        let mut ctx = ctx();
        let red = Color::rgb(1.0, 0.0, 0.0);
        let g = ctx
            .graph(|x| if x < 0.0 { GraphSample::from((x, red)) } else { x.into() }, Some(Color::BLACK), Some((-1.0, 1.0)))
            .unwrap();
        let node = g.node().borrow();
        assert!(node.material.vertex_colors);
        assert_eq!(node.material.color, Color::WHITE);
        let NodeKind::Lines(lines) = &node.kind else { panic!("not lines") };
        let colors = lines.colors.as_ref().unwrap();
        assert_eq!(colors[0], red);
        assert_eq!(*colors.last().unwrap(), theme_color(Theme::Dark, ThemeRole::Foreground));
    }

    #[test]
    fn uniform_color_without_sample_colors() {
        let mut ctx = ctx();
        let g = ctx.graph(|x| x, Some(Color::BLACK), Some((0.0, 1.0))).unwrap();
        assert_eq!(g.node().borrow().material.color, Color::BLACK);
        assert!(!g.node().borrow().material.vertex_colors);
    }

    #[test]
    fn huge_finite_range_plots_at_the_cap() {
        let mut ctx = ctx();
        let pts = ctx.graph(|x| x, None, Some((-1e30, 1e30))).unwrap().points();
        assert_eq!(pts.len(), MAX_GRAPH_SAMPLES);
        assert_eq!(pts[0].x, -1e30);
        assert_eq!(pts.last().unwrap().x, 1e30);
    }

    // ── graph3d ───────────────────────────────────────────────────────────

    #[test]
    fn surface_resolution_per_axis() {
        let mut ctx = ctx();
        let g = ctx.graph3d(|x, z| x + z, Some((0.0, 10.0)), Some((0.0, 20.0))).unwrap();
        assert_eq!(g.samples(), (6, 11));
        let group = g.node().borrow();
        let surface = group.children[0].borrow();
        let NodeKind::Mesh(mesh) = &surface.kind else { panic!("not a mesh") };
        assert_eq!(mesh.vertex_count(), 66);
        assert_eq!(mesh.positions[65], Vec3::new(10.0, 30.0, 20.0));
    }

    #[test]
    fn surface_samples_are_capped() {
        let mut ctx = ctx();
        let g = ctx.graph3d(|_, _| 0.0, None, None).unwrap();
        assert_eq!(g.samples(), (MAX_SURFACE_SAMPLES, MAX_SURFACE_SAMPLES));
    }

    #[test]
    fn surface_rejects_bad_ranges_and_values() {
        let mut ctx = ctx();
        assert!(ctx.graph3d(|_, _| 0.0, Some((1.0, 0.0)), None).is_err());
        assert!(matches!(
            ctx.graph3d(|x, _| x.ln(), Some((-1.0, 1.0)), Some((0.0, 1.0))),
            Err(SketchError::NonFinite { .. })
        ));
    }

    #[test]
    fn grid_lines_are_lifted_and_replaced() {
        let mut ctx = ctx();
        ctx.set_zoom(2.0).unwrap();
        let g = ctx.graph3d(|_, _| 1.0, Some((0.0, 4.0)), Some((0.0, 4.0))).unwrap();
        let g = g.grid_lines(3).unwrap().grid_lines(2).unwrap();
        let group = g.node().borrow();
        assert_eq!(group.children.len(), 2);
        let grid = group.children[1].borrow();
        let NodeKind::Lines(lines) = &grid.kind else { panic!("not lines") };
        let lift = GRID_LIFT_PX / 2.0;
        assert!(lines.points.iter().all(|p| (p.y - (1.0 + lift)).abs() < 1e-6));
        // 2 lines per axis, (5 - 1) segments each, 2 points per segment.
        assert_eq!(lines.points.len(), 2 * 2 * 4 * 2);
    }

    #[test]
    fn grid_line_count_is_capped() {
        let mut ctx = ctx();
        let g = ctx.graph3d(|_, _| 0.0, Some((0.0, 2.0)), Some((0.0, 2.0))).unwrap();
        let (nx, nz) = g.samples();
        let g = g.grid_lines(u32::MAX).unwrap();
        let group = g.node().borrow();
        let grid = group.children[1].borrow();
        let NodeKind::Lines(lines) = &grid.kind else { panic!("not lines") };
        let expected = MAX_SURFACE_SAMPLES * ((nx - 1) + (nz - 1)) * 2;
        assert_eq!(lines.points.len(), expected);
    }
}
