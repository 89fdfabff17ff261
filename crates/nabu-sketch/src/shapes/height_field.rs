use nabu_engine::coords::Vec3;
use nabu_engine::paint::Color;
use nabu_engine::scene::{primitives, Material, NodeHandle, NodeKind};

use crate::ctx::Ctx;
use crate::error::{check_len, SketchError};
use crate::theme::ThemeRole;

use super::{impl_shape, node_of, Colorable, Materializable};

/// Mesh over the XZ plane with one height per grid vertex.
pub struct HeightField {
    node: NodeHandle,
}

impl HeightField {
    /// Per-vertex colors, one per height sample, row-major.
    pub fn vertex_colors(self, colors: Vec<Color>) -> Result<Self, SketchError> {
        let mut guard = self.node.borrow_mut();
        let node = &mut *guard;
        if let NodeKind::Mesh(mesh) = &mut node.kind {
            check_len("height field colors", mesh.vertex_count(), colors.len())?;
            mesh.colors = Some(colors);
            node.material.vertex_colors = true;
        }
        drop(guard);
        Ok(self)
    }
}

impl_shape!(HeightField);

impl Colorable for HeightField {}
impl Materializable for HeightField {}

impl Ctx {
    /// A `width` x `depth` surface split into `cols` x `rows` cells, centered
    /// on the origin. `heights` holds `(cols + 1) * (rows + 1)` values, row-major
    /// from `-z` to `+z`, each row from `-x` to `+x`.
    pub fn height_field(
        &mut self,
        (width, depth): (f32, f32),
        (cols, rows): (u32, u32),
        heights: &[f32],
    ) -> Result<HeightField, SketchError> {
        let (cols, rows) = (cols.max(1), rows.max(1));
        let expected = (cols as usize + 1) * (rows as usize + 1);
        check_len("heights", expected, heights.len())?;

        let x_at = |col: u32| -width * 0.5 + width * col as f32 / cols as f32;
        for (i, &h) in heights.iter().enumerate() {
            if !h.is_finite() {
                return Err(SketchError::NonFinite { x: x_at(i as u32 % (cols + 1)), value: h });
            }
        }

        let mesh = primitives::surface(cols, rows, |col, row| {
            let h = heights[(row * (cols + 1) + col) as usize];
            Vec3::new(x_at(col), h, -depth * 0.5 + depth * row as f32 / rows as f32)
        });

        let node = node_of(NodeKind::Mesh(mesh), Material::standard(self.color(ThemeRole::Primary)));
        self.spawn(&node);
        Ok(HeightField { node })
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

    // ── lengths ───────────────────────────────────────────────────────────

    #[test]
    fn wrong_height_count_reports_expected_and_actual() {
        let mut ctx = ctx();
        let res = ctx.height_field((10.0, 10.0), (3, 3), &[0.0; 15]);
        let err = res.err().unwrap();
        assert_eq!(err, SketchError::LengthMismatch { what: "heights", expected: 16, actual: 15 });
        assert!(err.to_string().contains("expected 16, got 15"));
        assert!(ctx.scene().is_empty());
    }

    #[test]
    fn color_count_must_match_vertices() {
        let mut ctx = ctx();
        let hf = ctx.height_field((10.0, 10.0), (1, 1), &[0.0; 4]).unwrap();
        assert!(hf.vertex_colors(vec![Color::WHITE; 3]).is_err());

        let hf = ctx.height_field((10.0, 10.0), (1, 1), &[0.0; 4]).unwrap();
        let hf = hf.vertex_colors(vec![Color::WHITE; 4]).unwrap();
        assert!(hf.node().borrow().material.vertex_colors);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn heights_land_on_grid_vertices() {
        let mut ctx = ctx();
        let heights = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let hf = ctx.height_field((4.0, 2.0), (2, 1), &heights).unwrap();
        let node = hf.node().borrow();
        let NodeKind::Mesh(mesh) = &node.kind else { panic!("not a mesh") };
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.positions[0], Vec3::new(-2.0, 1.0, -1.0));
        assert_eq!(mesh.positions[2], Vec3::new(2.0, 3.0, -1.0));
        assert_eq!(mesh.positions[5], Vec3::new(2.0, 6.0, 1.0));
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn non_finite_height_is_rejected() {
        let mut ctx = ctx();
        let res = ctx.height_field((4.0, 4.0), (1, 1), &[0.0, 0.0, f32::NAN, 0.0]);
        assert!(matches!(res, Err(SketchError::NonFinite { x, .. }) if x == -2.0));
    }
}
