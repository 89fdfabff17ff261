//! The render surface: drives a [`Ctx`] from host frames and events.
//!
//! A [`Renderer`] owns one context. The host feeds it animation-frame
//! timestamps through [`Renderer::frame`] and environment changes through an
//! [`ObserverHub`]; the renderer decides whether to tick, and hands a
//! [`SceneView`] to a [`RenderBackend`] for drawing.
//!
//! Ticking pauses while the page is hidden, while the surface is mostly out of
//! view, or (if configured) while the pointer is elsewhere. The frame clock is
//! reset on pause so the first resumed frame reports `dt = 0`.

mod config;
mod observers;

use std::rc::Rc;

use anyhow::Context as _;
use log::debug;
use nabu_engine::camera::Camera;
use nabu_engine::coords::Viewport;
use nabu_engine::paint::Color;
use nabu_engine::scene::{Lighting, Scene};
use nabu_engine::text::{FontId, FontSystem};
use nabu_engine::time::FrameClock;

use crate::ctx::{Controls, Ctx};
use crate::theme::Theme;

pub use config::{FocusBehaviour, RendererConfig, StopWhenNotVisible};
pub use observers::{HostEvent, ObserverHub, ObserverKind, Subscription};

/// Everything a backend needs to draw one frame.
pub struct SceneView<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub background: Color,
    pub lighting: &'a Lighting,
    pub fonts: &'a FontSystem,
    pub font: Option<FontId>,
    pub controls: &'a Controls,
    pub theme: Theme,
    /// Surface size in logical pixels.
    pub size: Viewport,
    pub pixel_ratio: f32,
}

/// Draws a [`SceneView`].
pub trait RenderBackend {
    fn render(&mut self, view: &SceneView<'_>) -> anyhow::Result<()>;
}

/// The drawable surface as the host sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceElement {
    size: Viewport,
    pixel_ratio: f32,
    attached: bool,
}

impl SurfaceElement {
    #[inline]
    pub fn size(&self) -> Viewport {
        self.size
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.size.width * self.pixel_ratio).round().max(0.0) as u32;
        let h = (self.size.height * self.pixel_ratio).round().max(0.0) as u32;
        (w, h)
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Rendered,
    /// Skipped: hidden, out of view, or not hovered.
    Paused,
    /// The renderer was disposed; nothing happens any more.
    Disposed,
}

pub struct Renderer {
    ctx: Ctx,
    focus: FocusBehaviour,
    pixel_ratio_override: Option<f32>,
    hub: Rc<ObserverHub>,
    subscriptions: Vec<Subscription>,
    clock: FrameClock,
    element: SurfaceElement,
    page_visible: bool,
    in_view: bool,
    hovered: bool,
    paused: bool,
    frames: u64,
    pending_frame: bool,
    disposed: bool,
}

impl Renderer {
    /// Subscribes to the host's observers, builds a context and runs `setup`
    /// on it once, in retained mode.
    ///
    /// If `setup` fails the partially built renderer is dropped, which
    /// releases every subscription.
    pub fn new(
        config: RendererConfig,
        hub: Rc<ObserverHub>,
        setup: impl FnOnce(&mut Ctx) -> anyhow::Result<()>,
    ) -> anyhow::Result<Self> {
        let focus = config.focus;

        let mut subscriptions = vec![hub.subscribe(ObserverKind::Resize), hub.subscribe(ObserverKind::PageVisibility)];
        if focus.stop_when_not_visible.enabled {
            subscriptions.push(hub.subscribe(ObserverKind::Intersection));
        }
        if focus.only_when_hovered {
            subscriptions.push(hub.subscribe(ObserverKind::Hover));
        }

        let size = config.initial_size;
        let pixel_ratio = config.pixel_ratio.unwrap_or(1.0);
        let mut renderer = Self {
            ctx: Ctx::new(size, config.theme).with_font_source(config.font),
            focus,
            pixel_ratio_override: config.pixel_ratio,
            hub,
            subscriptions,
            clock: FrameClock::new(),
            element: SurfaceElement { size, pixel_ratio, attached: false },
            page_visible: true,
            in_view: true,
            hovered: false,
            paused: false,
            frames: 0,
            pending_frame: true,
            disposed: false,
        };

        setup(&mut renderer.ctx).context("sketch setup failed")?;

        debug!(
            "renderer ready: {} objects, animated={}, {} controls",
            renderer.ctx.scene().len(),
            renderer.ctx.has_updates(),
            renderer.ctx.controls().len(),
        );
        Ok(renderer)
    }

    #[inline]
    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    /// Pointer input and other direct context access from the host.
    #[inline]
    pub fn ctx_mut(&mut self) -> &mut Ctx {
        &mut self.ctx
    }

    #[inline]
    pub fn element(&self) -> &SurfaceElement {
        &self.element
    }

    #[inline]
    pub fn element_mut(&mut self) -> &mut SurfaceElement {
        &mut self.element
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Applies queued host events. Resizes reach the camera before the next render.
    pub fn pump_events(&mut self) {
        for event in self.hub.drain() {
            match event {
                HostEvent::Resize { width, height, pixel_ratio } => {
                    self.element.size = Viewport::new(width, height);
                    self.element.pixel_ratio = self.pixel_ratio_override.unwrap_or(pixel_ratio);
                    self.ctx.set_camera_bounds(width, height);
                    self.pending_frame = true;
                }
                HostEvent::Intersection { ratio } => {
                    let in_view = ratio >= self.focus.stop_when_not_visible.threshold;
                    self.pending_frame |= in_view && !self.in_view;
                    self.in_view = in_view;
                }
                HostEvent::PageVisibility { visible } => {
                    self.pending_frame |= visible && !self.page_visible;
                    self.page_visible = visible;
                }
                HostEvent::Hover(hovered) => self.hovered = hovered,
            }
        }
        if self.is_paused() && !self.paused {
            debug!("renderer paused");
            self.paused = true;
            self.clock.reset();
        }
    }

    fn is_paused(&self) -> bool {
        !self.page_visible
            || (self.focus.stop_when_not_visible.enabled && !self.in_view)
            || (self.focus.only_when_hovered && !self.hovered)
    }

    /// Whether the host should keep requesting frames continuously.
    ///
    /// Static scenes (no update callbacks) never animate; they render once and
    /// then again only after a resize.
    pub fn needs_animation(&self) -> bool {
        !self.disposed && self.ctx.has_updates() && !self.is_paused()
    }

    /// Whether a single frame is owed (first frame, resize, or becoming visible).
    pub fn needs_frame(&self) -> bool {
        !self.disposed && (self.frames == 0 || self.pending_frame)
    }

    /// Renders the first frame.
    pub fn start(&mut self, timestamp_ms: f64, backend: &mut dyn RenderBackend) -> anyhow::Result<FrameOutcome> {
        if !self.ctx.has_updates() {
            debug!("static scene; rendering on demand only");
        }
        self.frame(timestamp_ms, backend)
    }

    /// Runs one animation frame at host time `timestamp_ms`.
    ///
    /// The first frame always runs. A failing update callback skips the
    /// render and its error is returned; the next frame tries again.
    pub fn frame(&mut self, timestamp_ms: f64, backend: &mut dyn RenderBackend) -> anyhow::Result<FrameOutcome> {
        if self.disposed {
            return Ok(FrameOutcome::Disposed);
        }
        self.pump_events();

        if self.frames > 0 && self.is_paused() {
            return Ok(FrameOutcome::Paused);
        }
        if self.paused {
            debug!("renderer resumed");
            self.paused = false;
        }

        let time = self.clock.tick(timestamp_ms);
        self.frames += 1;
        self.pending_frame = false;
        self.ctx.tick(time.dt, time.elapsed)?;

        if !self.ctx.controls().is_empty() {
            self.ctx.ensure_font();
        }
        backend.render(&self.view())?;
        Ok(FrameOutcome::Rendered)
    }

    fn view(&self) -> SceneView<'_> {
        SceneView {
            scene: self.ctx.scene(),
            camera: self.ctx.camera(),
            background: self.ctx.clear_color(),
            lighting: self.ctx.lighting(),
            fonts: self.ctx.fonts(),
            font: self.ctx.font(),
            controls: self.ctx.controls(),
            theme: self.ctx.theme(),
            size: self.element.size,
            pixel_ratio: self.element.pixel_ratio,
        }
    }

    /// Releases observers, empties the scene and detaches the surface. Later
    /// frames return [`FrameOutcome::Disposed`]. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.subscriptions.clear();
        self.ctx.dispose();
        self.element.detach();
        self.disposed = true;
        debug!("renderer disposed after {} frames", self.frames);
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.dispose();
    }
}
