use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::overlay::Border;
use nabu_engine::paint::Color;
use nabu_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A checkbox with an optional text label. Clicking anywhere on the row toggles it.
pub struct Checkbox {
    checked: bool,
    label: String,
    font: Option<FontId>,
    font_size: f32,
    label_color: Color,
    box_size: f32,
    background: Color,
    checked_color: Color,
    border_color: Color,
    gap: f32,
    on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>, font: Option<FontId>) -> Self {
        Self {
            checked: false,
            label: label.into(),
            font,
            font_size: 13.0,
            label_color: Color::rgb(0.85, 0.85, 0.9),
            box_size: 16.0,
            background: Color::rgb(0.1, 0.12, 0.18),
            checked_color: Color::rgb(0.2, 0.65, 1.0),
            border_color: Color::rgb(0.35, 0.45, 0.6),
            gap: 8.0,
            on_change: None,
        }
    }

    pub fn checked(mut self, v: bool) -> Self { self.checked = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }
    pub fn label_color(mut self, v: Color) -> Self { self.label_color = v; self }
    pub fn checked_color(mut self, v: Color) -> Self { self.checked_color = v; self }
    pub fn border_color(mut self, v: Color) -> Self { self.border_color = v; self }
    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Widget for Checkbox {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let text = ctx.measure_text(&self.label, self.font, self.font_size);
        let w = if text.x > 0.0 { self.box_size + self.gap + text.x } else { self.box_size };
        constraints.constrain(Vec2::new(w, self.box_size.max(text.y)))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let hovered = painter.is_hovered(rect);

        let box_y = rect.origin.y + (rect.size.y - self.box_size) * 0.5;
        let box_rect = Rect::new(rect.origin.x, box_y, self.box_size, self.box_size);

        let fill = match (self.checked, hovered) {
            (true, true) => self.checked_color.lerp(Color::WHITE, 0.1),
            (true, false) => self.checked_color,
            (false, _) => self.background,
        };
        let border = if hovered && !self.checked { self.border_color.lerp(Color::WHITE, 0.3) } else { self.border_color };
        painter.fill_rounded_rect(box_rect, 3.0, fill, Some(Border::new(1.5, border)));

        if self.checked {
            let m = self.box_size * 0.28;
            let mark = box_rect.inset(m, m, m, m);
            painter.fill_rounded_rect(mark, 1.5, Color::WHITE.with_alpha(0.9), None);
        }

        let text_y = rect.origin.y + (rect.size.y - self.font_size) * 0.5;
        painter.text(
            &self.label,
            self.font,
            self.font_size,
            self.label_color,
            Vec2::new(rect.origin.x + self.box_size + self.gap, text_y),
        );
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => {
                self.checked = !self.checked;
                if let Some(f) = &mut self.on_change {
                    f(self.checked);
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}
