use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::overlay::{Border, DrawList, ZIndex};
use nabu_engine::paint::Color;
use nabu_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's overlay `DrawList` and exposes the frame's pointer
/// state so widgets can express hover and pressed visuals directly.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    /// Next z offset above [`ZIndex::CONTROLS`]; later calls paint on top.
    z: i32,
    pub mouse_pos: Vec2,
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, mouse_pos: Vec2, mouse_pressed: bool) -> Self {
        Self { draw_list, fonts, z: 0, mouse_pos, mouse_pressed }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && rect.contains(self.mouse_pos)
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'_> {
        LayoutCtx { fonts: self.fonts }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Rounded rectangle with optional border. `radius = 0.0` for sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, fill: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, radius, fill, border);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, fill, border);
    }

    /// Text at `origin` (top-left of the first line). Does nothing without a font.
    pub fn text(&mut self, text: &str, font: Option<FontId>, size: f32, color: Color, origin: Vec2) {
        let Some(font) = font else { return; };
        if text.is_empty() {
            return;
        }
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin, None);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::CONTROLS.above(self.z);
        self.z += 1;
        z
    }
}
