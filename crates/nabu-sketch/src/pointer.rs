use nabu_engine::coords::Vec2;
use nabu_engine::input::{InputFrame, InputState, MouseButton};

use crate::ctx::Ctx;

/// Pointer travel, in logical pixels, below which a press and release is a click.
pub const CLICK_SLOP: f32 = 3.0;

#[derive(Debug, Copy, Clone, PartialEq)]
struct CanvasGesture {
    button: MouseButton,
    travel: f32,
}

/// Feeds window pointer input that the control panel did not claim into a
/// context: moves, orbit drags, wheel zoom and canvas clicks.
///
/// A gesture belongs to whoever was under the pointer when the button went
/// down, so dragging off the panel never rotates the camera.
#[derive(Debug, Default)]
pub struct CanvasPointer {
    gesture: Option<CanvasGesture>,
}

impl CanvasPointer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|g| g.travel > CLICK_SLOP)
    }

    /// Routes one frame of input. `on_panel` reports whether a position is
    /// over the control panel. Fails only if a click hook fails.
    pub fn route(
        &mut self,
        ctx: &mut Ctx,
        input: &InputState,
        frame: &InputFrame,
        on_panel: impl Fn(Vec2) -> bool,
    ) -> anyhow::Result<()> {
        let pos = input.pointer();
        if let Some(p) = pos {
            ctx.pointer_moved(p.x, p.y);
        }
        let over_panel = pos.is_some_and(&on_panel);

        if self.gesture.is_none() && !over_panel {
            let pressed = [MouseButton::Left, MouseButton::Right, MouseButton::Middle]
                .into_iter()
                .find(|b| frame.buttons_pressed.contains(b));
            if let Some(button) = pressed {
                self.gesture = Some(CanvasGesture { button, travel: 0.0 });
            }
        }

        let mut released = None;
        if let Some(g) = &mut self.gesture {
            let delta = frame.pointer_delta;
            if delta != Vec2::zero() {
                g.travel += delta.length();
                let pan = g.button != MouseButton::Left || input.modifiers.shift;
                ctx.pointer_drag(delta, pan);
            }
            if frame.buttons_released.contains(&g.button) || !input.button_down(g.button) {
                released = Some(*g);
            }
        }

        if frame.wheel_lines != 0.0 && !over_panel {
            ctx.pointer_wheel(frame.wheel_lines);
        }

        if let Some(g) = released {
            self.gesture = None;
            if g.button == MouseButton::Left && g.travel <= CLICK_SLOP {
                if let Some(p) = pos {
                    ctx.click(p.x, p.y)?;
                }
            }
        }
        Ok(())
    }
}
