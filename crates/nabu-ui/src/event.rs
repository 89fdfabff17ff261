use nabu_engine::coords::Vec2;

/// Pointer events routed through the widget tree, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button pressed and released without dragging.
    Click { pos: Vec2 },
    /// Pointer position this frame.
    Hover { pos: Vec2 },
    /// Pointer moved while the primary button is held.
    /// `start` is where the press began.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a drag.
    ///
    /// Fires even when `pos` is outside the widget; use `rect.contains(start)`
    /// to check ownership of the drag.
    DragEnd { pos: Vec2, start: Vec2 },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    /// `Consumed` if either side consumed.
    #[inline]
    pub fn or(self, other: EventResult) -> EventResult {
        if self.is_consumed() || other.is_consumed() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
