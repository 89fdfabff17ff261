use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

use super::translate;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "nabu".to_string(),
            initial_size: LogicalSize::new(960.0, 640.0),
        }
    }
}

/// Runs one window with one GPU surface until it closes.
pub struct Runtime;

impl Runtime {
    /// Blocks until the window closes or the app asks to exit. Window or GPU
    /// creation failures are returned once the event loop has stopped.
    pub fn run<A: App + 'static>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            origin: Instant::now(),
            surface: None,
            failure: None,
        };
        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;
        host.failure.map_or(Ok(()), Err)
    }
}

/// Window, its GPU surface and the per-window input and timing state.
#[self_referencing]
struct Surface {
    input: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    origin: Instant,
    surface: Option<Surface>,
    failure: Option<anyhow::Error>,
}

impl<A: App> Host<A> {
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        SurfaceTryBuilder {
            input: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed"),
        }
        .try_build()
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        // Drops the GPU surface before the window it borrows.
        self.surface = None;
        event_loop.exit();
    }

    fn redraw(&mut self) -> AppControl {
        let Some(surface) = self.surface.as_mut() else {
            return AppControl::Continue;
        };
        let now_ms = FrameClock::now_ms(self.origin);
        let app = &mut self.app;
        surface.with_mut(|s| {
            let time = s.clock.tick(now_ms);
            let control = app.on_frame(&mut FrameCtx {
                window: WindowCtx { id: s.window.id(), window: s.window },
                gpu: s.gpu,
                input: s.input,
                input_frame: s.input_frame,
                time,
            });
            // Deltas belong to the frame that saw them.
            s.input_frame.clear();
            control
        })
    }
}

impl<A: App> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(surface) => {
                surface.with_window(|w| w.request_redraw());
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(surface) = &self.surface {
            if self.app.wants_redraw() {
                surface.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let app = &mut self.app;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let control = surface.with_mut(|s| {
            if let Some(ev) = translate::input_event(s.window.scale_factor(), s.input, &event) {
                s.input.apply_event(s.input_frame, ev);
                // Hover, drags and controls can change even a static scene.
                s.window.request_redraw();
            }
            app.on_window_event(&event)
        });

        let control = match event {
            WindowEvent::CloseRequested => AppControl::Exit,
            WindowEvent::Resized(size) => {
                surface.with_gpu_mut(|gpu| gpu.resize(size));
                surface.with_window(|w| w.request_redraw());
                control
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = surface.with_window(|w| w.inner_size());
                surface.with_gpu_mut(|gpu| gpu.resize(size));
                surface.with_window(|w| w.request_redraw());
                control
            }
            WindowEvent::Occluded(false) => {
                surface.with_window(|w| w.request_redraw());
                control
            }
            WindowEvent::RedrawRequested => {
                if control == AppControl::Exit { control } else { self.redraw() }
            }
            _ => control,
        };

        if control == AppControl::Exit {
            self.close(event_loop);
        }
    }
}
