use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::overlay::DrawList;
use nabu_engine::text::FontSystem;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Element;

/// Pointer movement (in logical pixels) after which a press counts as a drag.
const DRAG_THRESHOLD: f32 = 3.0;

/// Snapshot of pointer state for one UI frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Cursor position in logical pixels, `None` when outside the surface.
    pub mouse_pos: Option<Vec2>,
    /// `true` while the primary button is held.
    pub mouse_pressed: bool,
    /// `true` for exactly one frame when the primary button goes down.
    pub mouse_went_down: bool,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_went_up: bool,
}

/// Gesture the panel is tracking across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Pressed at `start`; becomes a drag once the pointer travels far enough.
    Pressed { start: Vec2, dragging: bool },
}

/// Lays out, paints and routes events for a control tree anchored at a
/// corner of the surface.
///
/// The tree itself is rebuilt by the caller every frame. The panel only keeps
/// what must survive between frames: the press/drag gesture and the rect the
/// tree occupied last, which decides whether pointer input belongs to the
/// controls or to whatever lies underneath.
pub struct Panel {
    draw_list: DrawList,
    margin: Vec2,
    gesture: Gesture,
    last_rect: Option<Rect>,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            draw_list: DrawList::new(),
            margin: Vec2::new(12.0, 12.0),
            gesture: Gesture::Idle,
            last_rect: None,
        }
    }

    /// Offset of the panel from the top-left corner.
    pub fn with_margin(mut self, margin: Vec2) -> Self {
        self.margin = margin;
        self
    }

    /// Draw list filled by the last [`frame`](Self::frame).
    pub fn draw_list(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }

    /// Rect occupied by the tree in the last frame.
    pub fn rect(&self) -> Option<Rect> {
        self.last_rect
    }

    /// Whether `pos` is over the controls (as of the last frame).
    pub fn hit(&self, pos: Vec2) -> bool {
        self.last_rect.is_some_and(|r| r.contains(pos))
    }

    /// `true` while a press that started on the panel is held.
    pub fn owns_pointer(&self) -> bool {
        matches!(self.gesture, Gesture::Pressed { start, .. } if self.hit(start))
    }

    /// Routes this frame's input, then paints `root`.
    ///
    /// Events go first so the painted state reflects this frame's clicks.
    /// Returns `Consumed` when any control took a click or drag.
    pub fn frame(&mut self, root: &mut Element, viewport: Vec2, input: &UiInput, fonts: &FontSystem) -> EventResult {
        self.draw_list.clear();

        let ctx = LayoutCtx { fonts };
        let available = Vec2::new((viewport.x - self.margin.x * 2.0).max(0.0), (viewport.y - self.margin.y * 2.0).max(0.0));
        let size = root.measure(Constraints::loose(available), &ctx);
        let rect = Rect::new(self.margin.x, self.margin.y, size.x, size.y);
        let hit_rect = (!rect.is_empty()).then_some(rect);
        if hit_rect != self.last_rect {
            log::trace!("control panel rect {hit_rect:?}");
        }
        self.last_rect = hit_rect;

        let result = self.route(root, rect, input, &ctx);

        let mouse = input.mouse_pos.unwrap_or(Vec2::new(-1.0, -1.0));
        let mut painter = Painter::new(&mut self.draw_list, fonts, mouse, input.mouse_pressed);
        root.paint(&mut painter, rect);

        result
    }

    fn route(&mut self, root: &mut Element, rect: Rect, input: &UiInput, ctx: &LayoutCtx) -> EventResult {
        let Some(pos) = input.mouse_pos else {
            if input.mouse_went_up {
                self.gesture = Gesture::Idle;
            }
            return EventResult::Ignored;
        };

        root.on_event(&UiEvent::Hover { pos }, rect, ctx);

        if input.mouse_went_down {
            self.gesture = Gesture::Pressed { start: pos, dragging: false };
        }

        let mut result = EventResult::Ignored;
        if let Gesture::Pressed { start, dragging } = self.gesture {
            let moved = (pos - start).length() > DRAG_THRESHOLD;
            if input.mouse_went_up || !input.mouse_pressed {
                let ev = if dragging || moved { UiEvent::DragEnd { pos, start } } else { UiEvent::Click { pos } };
                result = root.on_event(&ev, rect, ctx);
                self.gesture = Gesture::Idle;
            } else if dragging || moved {
                result = root.on_event(&UiEvent::Drag { pos, start }, rect, ctx);
                self.gesture = Gesture::Pressed { start, dragging: true };
            }
        }
        result
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::widgets::{Button, Column, Slider};

    fn at(x: f32, y: f32) -> Option<Vec2> {
        Some(Vec2::new(x, y))
    }

    // ── gestures ──────────────────────────────────────────────────────────

    #[test]
    fn press_and_release_in_place_clicks() {
        let fonts = FontSystem::new();
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let mut panel = Panel::new();
        let viewport = Vec2::new(400.0, 300.0);

        let build = || -> Element { Button::new("go", None).on_click({
            let c = c.clone();
            move || c.set(c.get() + 1)
        }).into() };

        let down = UiInput { mouse_pos: at(20.0, 20.0), mouse_pressed: true, mouse_went_down: true, ..UiInput::default() };
        panel.frame(&mut build(), viewport, &down, &fonts);
        assert!(panel.owns_pointer());

        let up = UiInput { mouse_pos: at(21.0, 20.0), mouse_went_up: true, ..UiInput::default() };
        let r = panel.frame(&mut build(), viewport, &up, &fonts);

        assert!(r.is_consumed());
        assert_eq!(clicks.get(), 1);
        assert!(!panel.owns_pointer());
    }

    #[test]
    fn drag_moves_slider_every_frame() {
        let fonts = FontSystem::new();
        let value = Rc::new(Cell::new(0.0));
        let mut panel = Panel::new();
        let viewport = Vec2::new(400.0, 300.0);

        let build = |v: Rc<Cell<f32>>| -> Element {
            Column::new().child(Slider::new().range(0.0, 1.0).value(v.get()).on_change(move |x| v.set(x))).into()
        };

        let down = UiInput { mouse_pos: at(19.0, 20.0), mouse_pressed: true, mouse_went_down: true, ..UiInput::default() };
        panel.frame(&mut build(value.clone()), viewport, &down, &fonts);

        let drag = UiInput { mouse_pos: at(400.0, 20.0), mouse_pressed: true, ..UiInput::default() };
        let r = panel.frame(&mut build(value.clone()), viewport, &drag, &fonts);
        assert!(r.is_consumed());
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn hit_tracks_last_layout() {
        let fonts = FontSystem::new();
        let mut panel = Panel::new();
        assert!(!panel.hit(Vec2::new(15.0, 15.0)));

        let mut root: Element = Button::new("go", None).into();
        panel.frame(&mut root, Vec2::new(400.0, 300.0), &UiInput::default(), &fonts);

        assert!(panel.hit(Vec2::new(15.0, 15.0)));
        assert!(!panel.hit(Vec2::new(300.0, 200.0)));
        assert!(!panel.draw_list().is_empty());
    }
}
