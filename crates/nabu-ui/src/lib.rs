//! Nabu UI: a small immediate widget tree painted into the engine's overlay
//! draw list.
//!
//! The tree is rebuilt every frame from application state. Widgets hold no
//! retained state of their own; anything that must outlive a frame lives in
//! the caller and is written back through callbacks.
//!
//! ```rust,ignore
//! use nabu_ui::prelude::*;
//!
//! let mut panel = Panel::new();
//! let mut root: Element = Column::new()
//!     .spacing(6.0)
//!     .child(Label::new("Speed", font, 13.0, Color::WHITE))
//!     .child(Slider::new().range(0.0, 10.0).value(speed).on_change(move |v| set(v)))
//!     .into();
//! panel.frame(&mut root, viewport, &input, &fonts);
//! ```

pub mod constraints;
pub mod event;
pub mod painter;
pub mod panel;
pub mod widget;
pub mod widgets;

/// Everything needed to build and extend the control panel.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::panel::{Panel, UiInput};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{Align, Button, Checkbox, Column, Label, Slider};

    pub use nabu_engine::coords::{Rect, Vec2};
    pub use nabu_engine::overlay::Border;
    pub use nabu_engine::paint::Color;
    pub use nabu_engine::text::{FontId, FontSystem};
}
