//! Native window host.
//!
//! [`Sketch`] opens a window through the engine runtime and drives a
//! [`Renderer`] from its frames: window events become observer
//! notifications, canvas pointer input is routed to the context, and the
//! scene, text labels and control panel are drawn with wgpu.

use std::rc::Rc;
use std::sync::Arc;

use log::{error, info};
use nabu_engine::coords::Vec2;
use nabu_engine::core::{App, AppControl, FrameCtx};
use nabu_engine::device::GpuInit;
use nabu_engine::input::MouseButton;
use nabu_engine::logging::{init_logging, LoggingConfig};
use nabu_engine::overlay::ZIndex;
use nabu_engine::render::overlay::{RoundedRectRenderer, TextRenderer};
use nabu_engine::render::world::WorldRenderer;
use nabu_engine::window::{CursorIcon, Runtime, RuntimeConfig};
use nabu_ui::prelude::{Panel, UiInput};
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;

use crate::ctx::Ctx;
use crate::pointer::CanvasPointer;
use crate::renderer::{
    FocusBehaviour, FrameOutcome, HostEvent, ObserverHub, RenderBackend, Renderer, RendererConfig, SceneView,
};
use crate::theme::Theme;

/// Builder for a windowed sketch.
///
/// ```rust,ignore
/// Sketch::new()
///     .title("orbit")
///     .theme(Theme::Light)
///     .run(|ctx| {
///         ctx.sphere().radius(40.0);
///         ctx.orbit(OrbitConfig::default());
///         Ok(())
///     })
/// ```
#[derive(Debug, Clone)]
pub struct Sketch {
    title: String,
    renderer: RendererConfig,
    gpu: GpuInit,
    logging: LoggingConfig,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            title: "nabu sketch".to_string(),
            renderer: RendererConfig::default(),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.renderer = self.renderer.initial_size(width, height);
        self
    }

    pub fn font(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.renderer = self.renderer.font(bytes);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.renderer = self.renderer.theme(theme);
        self
    }

    pub fn focus_behaviour(mut self, focus: FocusBehaviour) -> Self {
        self.renderer = self.renderer.focus(focus);
        self
    }

    pub fn pixel_ratio(mut self, ratio: f32) -> Self {
        self.renderer = self.renderer.pixel_ratio(ratio);
        self
    }

    /// 4x MSAA on (default) or off.
    pub fn antialias(mut self, on: bool) -> Self {
        self.gpu = self.gpu.antialias(on);
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    #[inline]
    pub fn renderer_config(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Builds the scene with `setup`, then opens the window and blocks until
    /// it closes. A failing `setup` returns before any window appears.
    pub fn run(self, setup: impl FnOnce(&mut Ctx) -> anyhow::Result<()>) -> anyhow::Result<()> {
        init_logging(self.logging);

        let size = self.renderer.initial_size;
        let hub = ObserverHub::new();
        let renderer = Renderer::new(self.renderer, hub.clone(), setup)?;
        info!("opening \"{}\" at {}x{}", self.title, size.width, size.height);

        let runtime = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(size.width as f64, size.height as f64),
        };
        Runtime::run(runtime, self.gpu, SketchApp::new(renderer, hub))
    }
}

struct SketchApp {
    renderer: Renderer,
    hub: Rc<ObserverHub>,
    world: WorldRenderer,
    rects: RoundedRectRenderer,
    text: TextRenderer,
    panel: Panel,
    pointer: CanvasPointer,
    started: bool,
}

impl SketchApp {
    fn new(renderer: Renderer, hub: Rc<ObserverHub>) -> Self {
        Self {
            renderer,
            hub,
            world: WorldRenderer::new(),
            rects: RoundedRectRenderer::new(),
            text: TextRenderer::new(),
            panel: Panel::new(),
            pointer: CanvasPointer::new(),
            started: false,
        }
    }

    /// Reports a size or scale change the renderer has not seen yet.
    fn sync_size(&self, frame: &FrameCtx<'_, '_>) {
        let (width, height) = frame.window.logical_size();
        let pixel_ratio = frame.window.scale_factor();
        let element = self.renderer.element();
        let size = element.size();
        if size.width != width || size.height != height || element.pixel_ratio() != pixel_ratio {
            self.hub.notify(HostEvent::Resize { width, height, pixel_ratio });
        }
    }
}

impl App for SketchApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::Resized(size) => {
                // A desktop window has no partial visibility: minimized reports
                // zero size and counts as out of view. Repeats are idempotent.
                let ratio = if size.width == 0 || size.height == 0 { 0.0 } else { 1.0 };
                self.hub.notify(HostEvent::Intersection { ratio });
            }
            WindowEvent::Occluded(occluded) => {
                self.hub.notify(HostEvent::PageVisibility { visible: !occluded });
            }
            WindowEvent::CursorEntered { .. } => self.hub.notify(HostEvent::Hover(true)),
            WindowEvent::CursorLeft { .. } => self.hub.notify(HostEvent::Hover(false)),
            WindowEvent::CloseRequested => {
                self.renderer.dispose();
                return AppControl::Continue;
            }
            _ => return AppControl::Continue,
        }
        self.renderer.pump_events();
        AppControl::Continue
    }

    fn on_frame(&mut self, frame: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.renderer.is_disposed() {
            return AppControl::Exit;
        }
        self.sync_size(frame);
        self.renderer.element_mut().attach();

        let panel = &self.panel;
        let on_panel = |p: Vec2| panel.hit(p) || panel.owns_pointer();
        if let Err(e) = self.pointer.route(self.renderer.ctx_mut(), frame.input, frame.input_frame, on_panel) {
            error!("click handler failed: {e:#}");
        }
        frame.window.set_cursor(if self.pointer.is_dragging() { CursorIcon::Grabbing } else { CursorIcon::Default });

        let ui_input = UiInput {
            mouse_pos: frame.input.pointer(),
            mouse_pressed: frame.input.button_down(MouseButton::Left),
            mouse_went_down: frame.input_frame.buttons_pressed.contains(&MouseButton::Left),
            mouse_went_up: frame.input_frame.buttons_released.contains(&MouseButton::Left),
        };

        let timestamp_ms = frame.time.timestamp_ms;
        let mut backend = WgpuBackend {
            frame,
            world: &mut self.world,
            rects: &mut self.rects,
            text: &mut self.text,
            panel: &mut self.panel,
            ui_input: &ui_input,
            control: AppControl::Continue,
        };
        let result = if self.started {
            self.renderer.frame(timestamp_ms, &mut backend)
        } else {
            self.started = true;
            self.renderer.start(timestamp_ms, &mut backend)
        };
        let control = backend.control;

        match result {
            Ok(FrameOutcome::Disposed) => AppControl::Exit,
            Ok(_) => control,
            Err(e) => {
                error!("frame failed: {e:#}");
                control
            }
        }
    }

    fn wants_redraw(&self) -> bool {
        self.renderer.needs_animation() || self.renderer.needs_frame()
    }
}

/// Draws a [`SceneView`] into the current window frame: world first, then
/// panel rects, then labels and panel text in one overlay list.
struct WgpuBackend<'f, 'a, 'w> {
    frame: &'f mut FrameCtx<'a, 'w>,
    world: &'f mut WorldRenderer,
    rects: &'f mut RoundedRectRenderer,
    text: &'f mut TextRenderer,
    panel: &'f mut Panel,
    ui_input: &'f UiInput,
    control: AppControl,
}

impl RenderBackend for WgpuBackend<'_, '_, '_> {
    fn render(&mut self, view: &SceneView<'_>) -> anyhow::Result<()> {
        let Self { frame, world, rects, text, panel, ui_input, control } = self;

        world.prepare(view.scene, view.camera, view.size);

        // The panel clears its list on every frame, so labels go in afterwards.
        let viewport = Vec2::new(view.size.width, view.size.height);
        match view.controls.build(view.font, view.theme) {
            Some(mut root) => {
                panel.frame(&mut root, viewport, ui_input, view.fonts);
            }
            None => panel.draw_list().clear(),
        }
        if let Some(font) = view.font {
            let list = panel.draw_list();
            for label in world.labels() {
                let origin = label.anchor - Vec2::new(0.0, label.size * 0.5);
                list.push_text(ZIndex::LABELS, label.text.clone(), font, label.size, label.color, origin, None);
            }
        }

        let (camera, lighting, fonts) = (view.camera, view.lighting, view.fonts);
        let overlay = panel.draw_list();
        *control = frame.render(view.background, |rctx, target| {
            world.render(rctx, target, camera, lighting);
            rects.render(rctx, target, overlay);
            text.render(rctx, target, overlay, fonts);
        });
        Ok(())
    }
}
