//! Nabu sketch: a fluent scene-building layer over the Nabu engine.
//!
//! A sketch is a setup function that receives a [`Ctx`] and spawns shapes,
//! graphs and controls into it. Objects made during setup are retained and
//! persist; update callbacks registered with [`Ctx::update`] run every frame,
//! and anything they spawn lives for that frame only.
//!
//! ```rust,ignore
//! use nabu_sketch::prelude::*;
//!
//! Sketch::new().run(|ctx| {
//!     ctx.grid(None, None);
//!     let speed = ctx.slider("speed", 0.0, 4.0, 1.0);
//!     ctx.update(move |ctx, _, t| {
//!         // Spawned inside an update: gone again next frame.
//!         ctx.cuboid().rotation((0.0, t * speed.value(), 0.0));
//!         Ok(())
//!     });
//!     ctx.orbit(OrbitConfig::default());
//!     Ok(())
//! })
//! ```

pub mod app;
pub mod ctx;
pub mod error;
pub mod pointer;
pub mod renderer;
pub mod shapes;
pub mod theme;

pub use app::Sketch;
pub use ctx::{Ctx, Mode};
pub use error::SketchError;
pub use theme::{theme_color, Theme, ThemeRole};

/// Everything a sketch usually needs.
pub mod prelude {
    pub use crate::app::Sketch;
    pub use crate::ctx::{ButtonHandle, CheckboxHandle, Ctx, Mode, SliderHandle, TextElementHandle};
    pub use crate::error::SketchError;
    pub use crate::renderer::{FocusBehaviour, StopWhenNotVisible};
    pub use crate::shapes::{Colorable, GraphSample, Materializable, Positionable, Shape};
    pub use crate::theme::{Theme, ThemeRole};

    pub use nabu_engine::camera::{Camera, OrbitConfig};
    pub use nabu_engine::coords::{Vec2, Vec3};
    pub use nabu_engine::logging::LoggingConfig;
    pub use nabu_engine::paint::Color;
    pub use nabu_engine::scene::MaterialKind;
}
