use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;
use nabu_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A single run of text.
///
/// Without a font the label still takes one line of height so layouts stay
/// stable while fonts load.
pub struct Label {
    text: String,
    font: Option<FontId>,
    size: f32,
    color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>, font: Option<FontId>, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(ctx.measure_text(&self.text, self.font, self.size))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.text(&self.text, self.font, self.size, self.color, rect.origin);
    }
}
