use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use nabu_engine::text::FontId;
use nabu_ui::prelude::*;

use crate::theme::{theme_color, Theme, ThemeRole};

use super::Ctx;

const LABEL_SIZE: f32 = 12.0;

struct ButtonState {
    clicks: Cell<u32>,
    on_click: RefCell<Box<dyn FnMut()>>,
}

/// Shared state of an overlay button.
#[derive(Clone)]
pub struct ButtonHandle {
    state: Rc<ButtonState>,
}

impl ButtonHandle {
    /// Number of clicks received so far.
    pub fn clicks(&self) -> u32 {
        self.state.clicks.get()
    }

    /// Counts a click and runs the button's callback.
    pub fn press(&self) {
        self.state.clicks.set(self.state.clicks.get() + 1);
        (self.state.on_click.borrow_mut())();
    }
}

impl fmt::Debug for ButtonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonHandle").field("clicks", &self.clicks()).finish()
    }
}

/// Shared value of an overlay slider, always within `[min, max]`.
#[derive(Debug, Clone)]
pub struct SliderHandle {
    value: Rc<Cell<f32>>,
    min: f32,
    max: f32,
}

impl SliderHandle {
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    pub fn set_value(&self, v: f32) {
        if v.is_finite() {
            self.value.set(v.clamp(self.min, self.max));
        }
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

#[derive(Debug, Clone)]
pub struct CheckboxHandle {
    checked: Rc<Cell<bool>>,
}

impl CheckboxHandle {
    pub fn checked(&self) -> bool {
        self.checked.get()
    }

    pub fn set_checked(&self, v: bool) {
        self.checked.set(v);
    }
}

/// A line of text in the control panel, rewritable from update callbacks.
#[derive(Debug, Clone)]
pub struct TextElementHandle {
    text: Rc<RefCell<String>>,
}

impl TextElementHandle {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }
}

enum Control {
    Button { label: String, handle: ButtonHandle },
    Slider { label: String, handle: SliderHandle },
    Checkbox { label: String, handle: CheckboxHandle },
    Text(TextElementHandle),
}

/// Ordered list of overlay controls created through the context.
#[derive(Default)]
pub struct Controls {
    items: Vec<Control>,
}

impl fmt::Debug for Controls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controls").field("len", &self.items.len()).finish()
    }
}

impl Controls {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Builds this frame's widget tree, or `None` when there are no controls.
    ///
    /// Widgets write back into the shared handles, so rebuilding every frame
    /// loses nothing.
    pub fn build(&self, font: Option<FontId>, theme: Theme) -> Option<Element> {
        if self.items.is_empty() {
            return None;
        }
        let fg = theme_color(theme, ThemeRole::Foreground);
        let muted = theme_color(theme, ThemeRole::Muted);
        let primary = theme_color(theme, ThemeRole::Primary);

        let mut column = Column::new()
            .spacing(6.0)
            .padding_all(10.0)
            .cross_align(Align::Stretch)
            .background(theme_color(theme, ThemeRole::Background).with_alpha(0.85))
            .corner_radius(6.0);

        for item in &self.items {
            match item {
                Control::Button { label, handle } => {
                    let handle = handle.clone();
                    column.push(
                        Button::new(label.clone(), font)
                            .background(primary)
                            .text_color(Color::WHITE)
                            .on_click(move || handle.press()),
                    );
                }
                Control::Slider { label, handle } => {
                    let (min, max) = handle.range();
                    column.push(Label::new(format!("{label}  {:.2}", handle.value()), font, LABEL_SIZE, muted));
                    let value = handle.value.clone();
                    column.push(
                        Slider::new()
                            .range(min, max)
                            .value(handle.value())
                            .track_color(theme_color(theme, ThemeRole::Grid))
                            .fill_color(primary)
                            .thumb_color(fg)
                            .on_change(move |v| value.set(v)),
                    );
                }
                Control::Checkbox { label, handle } => {
                    let checked = handle.checked.clone();
                    column.push(
                        Checkbox::new(label.clone(), font)
                            .checked(handle.checked())
                            .label_color(fg)
                            .checked_color(primary)
                            .border_color(muted)
                            .on_change(move |v| checked.set(v)),
                    );
                }
                Control::Text(handle) => {
                    column.push(Label::new(handle.text(), font, LABEL_SIZE, fg));
                }
            }
        }
        Some(column.into())
    }
}

impl Ctx {
    /// Adds a button to the control panel. `on_click` runs on every click.
    pub fn button(&mut self, label: impl Into<String>, on_click: impl FnMut() + 'static) -> ButtonHandle {
        let handle = ButtonHandle {
            state: Rc::new(ButtonState { clicks: Cell::new(0), on_click: RefCell::new(Box::new(on_click)) }),
        };
        self.controls.items.push(Control::Button { label: label.into(), handle: handle.clone() });
        handle
    }

    /// Adds a slider over `[min, max]` (swapped if given in reverse) starting at `value`.
    pub fn slider(&mut self, label: impl Into<String>, min: f32, max: f32, value: f32) -> SliderHandle {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let handle = SliderHandle { value: Rc::new(Cell::new(min)), min, max };
        handle.set_value(value);
        self.controls.items.push(Control::Slider { label: label.into(), handle: handle.clone() });
        handle
    }

    pub fn checkbox(&mut self, label: impl Into<String>, checked: bool) -> CheckboxHandle {
        let handle = CheckboxHandle { checked: Rc::new(Cell::new(checked)) };
        self.controls.items.push(Control::Checkbox { label: label.into(), handle: handle.clone() });
        handle
    }

    pub fn text_element(&mut self, text: impl Into<String>) -> TextElementHandle {
        let handle = TextElementHandle { text: Rc::new(RefCell::new(text.into())) };
        self.controls.items.push(Control::Text(handle.clone()));
        handle
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::coords::Viewport;
    use nabu_engine::text::FontSystem;

    use super::*;

    fn ctx() -> Ctx {
        Ctx::new(Viewport::new(400.0, 300.0), Theme::Dark)
    }

    // ── handles ───────────────────────────────────────────────────────────

    #[test]
    fn button_press_counts_and_calls_back() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();
        let mut ctx = ctx();
        let button = ctx.button("go", move || seen.set(seen.get() + 1));
        button.press();
        button.clone().press();
        assert_eq!(button.clicks(), 2);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn slider_clamps_and_orders_range() {
        let mut ctx = ctx();
        let s = ctx.slider("speed", 10.0, 0.0, 42.0);
        assert_eq!(s.range(), (0.0, 10.0));
        assert_eq!(s.value(), 10.0);
        s.set_value(-3.0);
        assert_eq!(s.value(), 0.0);
        s.set_value(f32::NAN);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn text_element_is_shared() {
        let mut ctx = ctx();
        let t = ctx.text_element("a");
        t.clone().set_text("b");
        assert_eq!(t.text(), "b");
    }

    // ── overlay tree ──────────────────────────────────────────────────────

    #[test]
    fn no_controls_builds_nothing() {
        assert!(ctx().controls().build(None, Theme::Dark).is_none());
    }

    #[test]
    fn panel_click_reaches_button_handle() {
        let mut ctx = ctx();
        let button = ctx.button("go", || {});
        let mut root = ctx.controls().build(None, Theme::Light).unwrap();

        let fonts = FontSystem::new();
        let mut panel = Panel::new();
        let idle = UiInput::default();
        panel.frame(&mut root, Vec2::new(400.0, 300.0), &idle, &fonts);
        let rect = panel.rect().unwrap();
        let pos = Some(rect.center());

        let down = UiInput { mouse_pos: pos, mouse_pressed: true, mouse_went_down: true, mouse_went_up: false };
        let up = UiInput { mouse_pos: pos, mouse_pressed: false, mouse_went_down: false, mouse_went_up: true };
        panel.frame(&mut root, Vec2::new(400.0, 300.0), &down, &fonts);
        let result = panel.frame(&mut root, Vec2::new(400.0, 300.0), &up, &fonts);

        assert!(result.is_consumed());
        assert_eq!(button.clicks(), 1);
    }

    #[test]
    fn checkbox_click_writes_back() {
        let mut ctx = ctx();
        let cb = ctx.checkbox("wire", false);
        let mut root = ctx.controls().build(None, Theme::Dark).unwrap();
        let ev = UiEvent::Click { pos: Vec2::new(20.0, 20.0) };
        let fonts = FontSystem::new();
        let lctx = LayoutCtx { fonts: &fonts };
        let size = root.measure(Constraints::loose(Vec2::new(400.0, 300.0)), &lctx);
        root.on_event(&ev, Rect::new(0.0, 0.0, size.x, size.y), &lctx);
        assert!(cb.checked());
    }
}
