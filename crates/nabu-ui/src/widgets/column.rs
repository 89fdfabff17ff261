use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Cross-axis alignment of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full width.
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

/// Vertical stack. Children are laid out top to bottom at their measured height.
///
/// ```rust,ignore
/// Column::new()
///     .padding_all(10.0)
///     .spacing(6.0)
///     .background(Color::BLACK.with_alpha(0.5))
///     .child(Label::new("Speed", font, 13.0, white))
///     .child(Slider::new().range(0.0, 5.0))
/// ```
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
    background: Option<Color>,
    corner_radius: f32,
}

impl Column {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            spacing: 0.0,
            padding: Edges::default(),
            cross_align: Align::Stretch,
            background: None,
            corner_radius: 0.0,
        }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    /// Backdrop filling the column rect.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn push(&mut self, child: impl Into<Element>) {
        self.children.push(child.into());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    // ── layout helpers ────────────────────────────────────────────────────

    fn child_constraints(&self, inner_w: f32) -> Constraints {
        match self.cross_align {
            // Stretch only pins the width when it is actually bounded.
            Align::Stretch if inner_w.is_finite() => Constraints {
                min: Vec2::new(inner_w, 0.0),
                max: Vec2::new(inner_w, f32::INFINITY),
            },
            _ => Constraints::loose(Vec2::new(inner_w, f32::INFINITY)),
        }
    }

    /// Child rects inside `rect`, in child order.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let constraints = self.child_constraints(inner.size.x);

        let mut y = inner.origin.y;
        self.children
            .iter()
            .map(|child| {
                let size = child.measure(constraints, ctx);
                let x = match self.cross_align {
                    Align::Stretch | Align::Start => inner.origin.x,
                    Align::Center => inner.origin.x + (inner.size.x - size.x) * 0.5,
                    Align::End => inner.origin.x + inner.size.x - size.x,
                };
                let r = Rect::new(x, y, size.x, size.y);
                y += size.y + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = Constraints::loose(Vec2::new(inner_w, f32::INFINITY));

        let mut h = self.padding.v();
        let mut w: f32 = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            let s = child.measure(child_c, ctx);
            h += s.y;
            if i > 0 {
                h += self.spacing;
            }
            w = w.max(s.x);
        }
        constraints.constrain(Vec2::new(w + self.padding.h(), h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(bg) = self.background {
            painter.fill_rounded_rect(rect, self.corner_radius, bg, None);
        }
        let rects = self.layout(rect, &painter.layout_ctx());
        for (child, r) in self.children.iter().zip(rects) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.layout(rect, ctx);
        let mut result = EventResult::Ignored;
        for (child, r) in self.children.iter_mut().zip(rects) {
            // Hover reaches every child; everything else stops at the first taker.
            result = result.or(child.on_event(event, r, ctx));
            if result.is_consumed() && !matches!(event, UiEvent::Hover { .. }) {
                break;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use nabu_engine::text::FontSystem;

    use super::*;
    use crate::widgets::{Button, Label};

    fn fonts() -> FontSystem {
        FontSystem::new()
    }

    // ── measure ───────────────────────────────────────────────────────────

    #[test]
    fn height_sums_children_and_spacing() {
        let fonts = fonts();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new()
            .spacing(4.0)
            .padding_all(10.0)
            .child(Label::new("a", None, 12.0, Color::WHITE))
            .child(Label::new("b", None, 12.0, Color::WHITE));
        let size = col.measure(Constraints::unbounded(), &ctx);
        assert_eq!(size.y, 10.0 + 12.0 + 4.0 + 12.0 + 10.0);
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn click_routes_to_child_under_pointer() {
        let fonts = fonts();
        let ctx = LayoutCtx { fonts: &fonts };
        let hits = Rc::new(Cell::new((0, 0)));
        let (a, b) = (hits.clone(), hits.clone());

        // Each button is 23 px tall; second starts at y = 23.
        let mut col = Column::new()
            .child(Button::new("a", None).on_click(move || a.set((a.get().0 + 1, a.get().1))))
            .child(Button::new("b", None).on_click(move || b.set((b.get().0, b.get().1 + 1))));

        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = col.on_event(&UiEvent::Click { pos: Vec2::new(20.0, 30.0) }, rect, &ctx);
        assert!(r.is_consumed());
        assert_eq!(hits.get(), (0, 1));
    }

    #[test]
    fn click_on_gap_is_ignored() {
        let fonts = fonts();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut col = Column::new().child(Button::new("a", None));
        let r = col.on_event(&UiEvent::Click { pos: Vec2::new(20.0, 90.0) }, Rect::new(0.0, 0.0, 100.0, 100.0), &ctx);
        assert_eq!(r, EventResult::Ignored);
    }
}
