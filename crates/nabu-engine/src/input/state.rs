use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current pointer state for a single window.
///
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Whether the pointer is over the window surface.
    pub hovered: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons when focus changes mid-drag.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta = frame.pointer_delta + Vec2::new(x - px, y - py);
                }
                self.pointer_pos = Some((*x, *y));
                self.hovered = true;
            }

            InputEvent::PointerEntered => {
                self.hovered = true;
            }

            InputEvent::PointerLeft => {
                self.hovered = false;
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.wheel_lines += delta.lines_y();
            }
        }

        frame.push_event(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Pointer position as a `Vec2`, if the pointer is over the surface.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer_pos.map(|(x, y)| Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn pointer_motion_accumulates_per_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(10.0, 10.0));
        state.apply_event(&mut frame, moved(15.0, 8.0));
        state.apply_event(&mut frame, moved(20.0, 8.0));
        assert_eq!(frame.pointer_delta, Vec2::new(10.0, -2.0));

        frame.clear();
        assert_eq!(frame.pointer_delta, Vec2::zero());
    }

    #[test]
    fn release_is_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let press = |s| InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: s,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::default(),
        });
        state.apply_event(&mut frame, press(MouseButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));
        state.apply_event(&mut frame, press(MouseButtonState::Released));
        state.apply_event(&mut frame, press(MouseButtonState::Released));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn leaving_clears_hover_and_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(1.0, 1.0));
        assert!(state.hovered);
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert!(!state.hovered);
        assert!(state.pointer().is_none());
    }

    #[test]
    fn wheel_pixels_are_normalized_to_lines() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::MouseWheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y: 80.0 },
            modifiers: Modifiers::default(),
        });
        assert_eq!(frame.wheel_lines, 2.0);
    }
}
