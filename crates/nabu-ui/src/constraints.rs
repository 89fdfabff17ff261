use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::text::{FontId, FontSystem};

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on all four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed from parent to child during measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    #[inline]
    pub fn unbounded() -> Self {
        Self::loose(Vec2::new(f32::INFINITY, f32::INFINITY))
    }

    /// Clamps a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Shrinks max inward by `edges`. Min becomes zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self::loose(Vec2::new(
            (self.max.x - edges.h()).max(0.0),
            (self.max.y - edges.v()).max(0.0),
        ))
    }
}

// ── LayoutCtx ─────────────────────────────────────────────────────────────

/// Resources available to [`Widget::measure`](crate::widget::Widget::measure)
/// and event routing.
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
}

impl<'a> LayoutCtx<'a> {
    /// Text extent, or a one-line empty box when no font is loaded.
    pub fn measure_text(&self, text: &str, font: Option<FontId>, size: f32) -> Vec2 {
        match font {
            Some(font) if !text.is_empty() => self.fonts.measure_text(text, font, size, None),
            _ => Vec2::new(0.0, size),
        }
    }
}

// ── rect helper ───────────────────────────────────────────────────────────

/// Shrinks a rect by `edges`.
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    rect.inset(edges.left, edges.top, edges.right, edges.bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Constraints::constrain ────────────────────────────────────────────

    #[test]
    fn constrain_clamps_below_min() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 100.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 3.0)), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn constrain_clamps_above_max() {
        let c = Constraints::loose(Vec2::new(50.0, 50.0));
        assert_eq!(c.constrain(Vec2::new(200.0, 20.0)), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn unbounded_keeps_any_size() {
        let v = Vec2::new(1e6, 3.0);
        assert_eq!(Constraints::unbounded().constrain(v), v);
    }

    // ── Constraints::shrink ───────────────────────────────────────────────

    #[test]
    fn shrink_reduces_max_and_clamps() {
        let s = Constraints::loose(Vec2::new(100.0, 15.0)).shrink(Edges::all(10.0));
        assert_eq!(s.max, Vec2::new(80.0, 0.0));
        assert_eq!(s.min, Vec2::zero());
    }

    // ── inset_rect / edges ────────────────────────────────────────────────

    #[test]
    fn inset_rect_asymmetric_padding() {
        let edges = Edges { top: 4.0, bottom: 8.0, left: 6.0, right: 10.0 };
        let inner = inset_rect(Rect::new(5.0, 5.0, 100.0, 60.0), edges);
        assert_eq!(inner, Rect::new(11.0, 9.0, 84.0, 48.0));
    }

    #[test]
    fn edges_h_and_v() {
        let e = Edges::symmetric(4.0, 8.0);
        assert_eq!(e.h(), 16.0);
        assert_eq!(e.v(), 8.0);
    }

    // ── LayoutCtx ─────────────────────────────────────────────────────────

    #[test]
    fn measure_without_font_is_one_line() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        assert_eq!(ctx.measure_text("hello", None, 14.0), Vec2::new(0.0, 14.0));
    }
}
