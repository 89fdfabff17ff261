//! Built-in controls.

mod button;
mod checkbox;
mod column;
mod label;
mod slider;

pub use button::Button;
pub use checkbox::Checkbox;
pub use column::{Align, Column};
pub use label::Label;
pub use slider::Slider;
