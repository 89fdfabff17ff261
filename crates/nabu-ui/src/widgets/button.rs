use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::overlay::Border;
use nabu_engine::paint::Color;
use nabu_engine::text::FontId;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A push button with a text label.
///
/// Hover and press visuals are read from the `Painter`, so the button can be
/// rebuilt every frame without losing state.
///
/// ```rust,ignore
/// Button::new("Reset", Some(font))
///     .background(Color::from_hex(0x3b82f6))
///     .on_click(|| log::info!("reset"))
/// ```
pub struct Button {
    label: String,
    font: Option<FontId>,
    font_size: f32,
    text_color: Color,
    on_click: Option<Box<dyn FnMut()>>,

    background: Color,
    hover_background: Color,
    press_background: Color,
    border: Option<Border>,
    corner_radius: f32,
    padding: Edges,
    min_width: f32,
}

impl Button {
    pub fn new(label: impl Into<String>, font: Option<FontId>) -> Self {
        let background = Color::rgb(0.22, 0.24, 0.3);
        Self {
            label: label.into(),
            font,
            font_size: 13.0,
            text_color: Color::WHITE,
            on_click: None,
            background,
            hover_background: background.lerp(Color::WHITE, 0.12),
            press_background: background.lerp(Color::BLACK, 0.2),
            border: None,
            corner_radius: 4.0,
            padding: Edges::symmetric(5.0, 10.0),
            min_width: 48.0,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Sets the resting background and derives hover/press shades from it.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self.hover_background = color.lerp(Color::WHITE, 0.12);
        self.press_background = color.lerp(Color::BLACK, 0.2);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let text = ctx.measure_text(&self.label, self.font, self.font_size);
        let w = (text.x + self.padding.h()).max(self.min_width);
        let h = text.y + self.padding.v();
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = if painter.is_pressed(rect) {
            self.press_background
        } else if painter.is_hovered(rect) {
            self.hover_background
        } else {
            self.background
        };
        painter.fill_rounded_rect(rect, self.corner_radius, bg, self.border);

        let inner = inset_rect(rect, self.padding);
        let text = painter.layout_ctx().measure_text(&self.label, self.font, self.font_size);
        let origin = Vec2::new(inner.origin.x + (inner.size.x - text.x).max(0.0) * 0.5, inner.origin.y);
        painter.text(&self.label, self.font, self.font_size, self.text_color, origin);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => {
                if let Some(f) = &mut self.on_click {
                    f();
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use nabu_engine::text::FontSystem;

    use super::*;

    fn click(button: &mut Button, x: f32, y: f32) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        button.on_event(&UiEvent::Click { pos: Vec2::new(x, y) }, Rect::new(0.0, 0.0, 80.0, 24.0), &ctx)
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn click_inside_fires_callback() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut button = Button::new("go", None).on_click(move || c.set(c.get() + 1));

        assert_eq!(click(&mut button, 10.0, 10.0), EventResult::Consumed);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn click_outside_is_ignored() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut button = Button::new("go", None).on_click(move || c.set(c.get() + 1));

        assert_eq!(click(&mut button, 100.0, 10.0), EventResult::Ignored);
        assert_eq!(count.get(), 0);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn measure_respects_min_width() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let size = Button::new("", None).measure(Constraints::unbounded(), &ctx);
        assert_eq!(size.x, 48.0);
        assert_eq!(size.y, 13.0 + 10.0);
    }
}
