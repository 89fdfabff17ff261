use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::overlay::Border;
use nabu_engine::paint::Color;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

const DEFAULT_WIDTH: f32 = 160.0;

/// A horizontal slider over `[min, max]`.
///
/// Clicking the track jumps to that value; dragging reports every move
/// through `on_change` so callers see the value live.
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    width: f32,
    track_height: f32,
    thumb_radius: f32,
    track_color: Color,
    fill_color: Color,
    thumb_color: Color,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 1.0,
            width: DEFAULT_WIDTH,
            track_height: 4.0,
            thumb_radius: 7.0,
            track_color: Color::rgb(0.15, 0.2, 0.3),
            fill_color: Color::rgb(0.2, 0.6, 1.0),
            thumb_color: Color::WHITE,
            on_change: None,
        }
    }

    /// Sets the range. Call before [`value`](Self::value), which clamps into it.
    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn value(mut self, v: f32) -> Self {
        self.value = self.clamp(v);
        self
    }

    pub fn width(mut self, v: f32) -> Self { self.width = v; self }
    pub fn track_color(mut self, v: Color) -> Self { self.track_color = v; self }
    pub fn fill_color(mut self, v: Color) -> Self { self.fill_color = v; self }
    pub fn thumb_color(mut self, v: Color) -> Self { self.thumb_color = v; self }
    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn current(&self) -> f32 {
        self.value
    }

    fn clamp(&self, v: f32) -> f32 {
        let (lo, hi) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        v.clamp(lo, hi)
    }

    /// Normalized value in [0, 1].
    fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f32::EPSILON { 0.0 } else { ((self.value - self.min) / span).clamp(0.0, 1.0) }
    }

    /// The track spans the rect minus one thumb radius on each side.
    fn track(&self, rect: Rect) -> Rect {
        let cy = rect.origin.y + rect.size.y * 0.5;
        Rect::new(
            rect.origin.x + self.thumb_radius,
            cy - self.track_height * 0.5,
            (rect.size.x - self.thumb_radius * 2.0).max(0.0),
            self.track_height,
        )
    }

    fn set_from_x(&mut self, x: f32, rect: Rect) {
        let track = self.track(rect);
        let t = if track.size.x > 0.0 { ((x - track.origin.x) / track.size.x).clamp(0.0, 1.0) } else { 0.0 };
        self.value = self.min + t * (self.max - self.min);
        if let Some(f) = &mut self.on_change {
            f(self.value);
        }
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(self.width, self.thumb_radius * 2.0 + 2.0))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let track = self.track(rect);
        painter.fill_rounded_rect(track, self.track_height * 0.5, self.track_color, None);

        let thumb_x = track.origin.x + self.normalized() * track.size.x;
        let fill_w = thumb_x - track.origin.x;
        if fill_w > 0.0 {
            let fill = Rect::new(track.origin.x, track.origin.y, fill_w, track.size.y);
            painter.fill_rounded_rect(fill, self.track_height * 0.5, self.fill_color, None);
        }

        let r = if painter.is_hovered(rect) { self.thumb_radius + 1.0 } else { self.thumb_radius };
        let center = Vec2::new(thumb_x, track.center().y);
        painter.fill_circle(center, r, self.thumb_color, Some(Border::new(2.0, self.fill_color)));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => {
                self.set_from_x(pos.x, rect);
                EventResult::Consumed
            }
            // Drags are owned by the slider they started on, wherever they go.
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start } if rect.contains(*start) => {
                self.set_from_x(pos.x, rect);
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

    fn rect() -> Rect {
        // Track runs from x = 7 to x = 107.
        Rect::new(0.0, 0.0, 114.0, 16.0)
    }

    fn send(slider: &mut Slider, ev: UiEvent) -> EventResult {
        let fonts = FontSystem::new();
        slider.on_event(&ev, rect(), &LayoutCtx { fonts: &fonts })
    }

    // ── values ────────────────────────────────────────────────────────────

    #[test]
    fn value_is_clamped_to_range() {
        assert_eq!(Slider::new().range(0.0, 10.0).value(42.0).current(), 10.0);
        assert_eq!(Slider::new().range(0.0, 10.0).value(-1.0).current(), 0.0);
    }

    #[test]
    fn click_sets_value_at_position() {
        let mut s = Slider::new().range(0.0, 100.0);
        send(&mut s, UiEvent::Click { pos: Vec2::new(57.0, 8.0) });
        assert!((s.current() - 50.0).abs() < 1e-3);
    }

    // ── dragging ──────────────────────────────────────────────────────────

    #[test]
    fn drag_reports_live_and_clamps_outside() {
        let seen = Rc::new(Cell::new(f32::NAN));
        let s2 = seen.clone();
        let mut s = Slider::new().range(0.0, 1.0).on_change(move |v| s2.set(v));

        let r = send(&mut s, UiEvent::Drag { pos: Vec2::new(500.0, 8.0), start: Vec2::new(10.0, 8.0) });
        assert!(r.is_consumed());
        assert_eq!(seen.get(), 1.0);
    }

    #[test]
    fn foreign_drag_is_ignored() {
        let mut s = Slider::new();
        let r = send(&mut s, UiEvent::Drag { pos: Vec2::new(50.0, 8.0), start: Vec2::new(50.0, 80.0) });
        assert_eq!(r, EventResult::Ignored);
        assert_eq!(s.current(), 0.0);
    }
}
