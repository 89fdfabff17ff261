use log::debug;
use nabu_engine::camera::{Camera, OrbitConfig, OrbitControls};
use nabu_engine::coords::{Vec2, Viewport};

use crate::error::SketchError;

use super::Ctx;

/// Spatial range reported for cameras without clip planes (custom projections).
pub const FALLBACK_EXTENT: f32 = 1000.0;

impl Ctx {
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Replaces the camera and re-applies the last known surface size to it.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.camera.set_bounds(self.surface.width, self.surface.height);
    }

    /// Last known surface size in logical pixels.
    #[inline]
    pub fn surface(&self) -> Viewport {
        self.surface
    }

    /// Fits the camera to a surface of `width` x `height` logical pixels.
    pub fn set_camera_bounds(&mut self, width: f32, height: f32) {
        self.surface = Viewport::new(width, height);
        self.camera.set_bounds(width, height);
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.camera.zoom()
    }

    pub fn set_zoom(&mut self, zoom: f32) -> Result<(), SketchError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(SketchError::InvalidZoom(zoom));
        }
        self.camera.set_zoom(zoom);
        Ok(())
    }

    /// Default spatial range for unbounded constructs, in world units at zoom 1.
    pub fn camera_extent(&self) -> f32 {
        self.camera.extent().unwrap_or(FALLBACK_EXTENT)
    }

    /// Half of the visible width in world units, used as the default x range.
    pub(crate) fn visible_half_width(&self) -> f32 {
        let half = match self.camera.half_extents() {
            Some((w, _)) => w,
            None => self.camera_extent(),
        };
        half / self.zoom()
    }

    // ── orbit ─────────────────────────────────────────────────────────────

    /// Enables orbit controls. The first call installs them and steps them
    /// from an update callback; later calls only change the settings.
    pub fn orbit(&mut self, config: OrbitConfig) {
        match &mut self.orbit {
            Some(orbit) => orbit.configure(config),
            None => {
                debug!("orbit controls enabled");
                self.orbit = Some(OrbitControls::new(config));
                self.update(|ctx, _, _| {
                    ctx.step_orbit();
                    Ok(())
                });
            }
        }
    }

    #[inline]
    pub fn orbit_controls(&self) -> Option<&OrbitControls> {
        self.orbit.as_ref()
    }

    fn step_orbit(&mut self) -> bool {
        match &mut self.orbit {
            Some(orbit) => orbit.update(&mut self.camera),
            None => false,
        }
    }

    /// Feeds a pointer drag of `delta` logical pixels to the orbit controls.
    /// `pan` selects panning instead of rotation.
    pub fn pointer_drag(&mut self, delta: Vec2, pan: bool) {
        let Some(orbit) = &mut self.orbit else { return };
        if pan {
            orbit.pan_drag(delta, &self.camera, self.surface);
        } else {
            orbit.rotate_drag(delta, self.surface);
        }
    }

    pub fn pointer_wheel(&mut self, lines: f32) {
        if let Some(orbit) = &mut self.orbit {
            orbit.wheel(lines);
        }
    }
}
