use std::f32::consts::{PI, TAU};

use crate::coords::{Vec2, Vec3, Viewport};

use super::camera::{Camera, Projection};

/// Keeps the polar angle away from the poles so `up` never aligns with the view.
const POLAR_EPSILON: f32 = 1e-4;

/// Orbit controller settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    pub target: Vec3,
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update while damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            enable_damping: true,
            damping_factor: 0.1,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

/// Orbits a camera around a target point.
///
/// Input methods only accumulate motion; [`update`](Self::update) applies it
/// to a camera. With damping enabled the accumulated motion decays over several
/// updates, so `update` must run every frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: OrbitConfig,
    /// Pending (azimuth, polar) rotation in radians.
    rotate_delta: Vec2,
    /// Pending target translation in world units.
    pan_offset: Vec3,
    /// Pending multiplicative zoom; 1.0 = none.
    zoom_scale: f32,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            rotate_delta: Vec2::zero(),
            pan_offset: Vec3::ZERO,
            zoom_scale: 1.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Replaces the settings. Pending motion is kept except along disabled axes.
    pub fn configure(&mut self, config: OrbitConfig) {
        if !config.enable_rotate {
            self.rotate_delta = Vec2::zero();
        }
        if !config.enable_pan {
            self.pan_offset = Vec3::ZERO;
        }
        if !config.enable_zoom {
            self.zoom_scale = 1.0;
        }
        self.config = config;
    }

    /// Rotates by a pointer drag of `delta` logical pixels.
    ///
    /// A drag across the full viewport height turns a full circle.
    pub fn rotate_drag(&mut self, delta: Vec2, viewport: Viewport) {
        if !self.config.enable_rotate || !viewport.is_valid() {
            return;
        }
        let k = TAU * self.config.rotate_speed / viewport.height;
        self.rotate_delta = self.rotate_delta - Vec2::new(delta.x * k, delta.y * k);
    }

    /// Pans by a pointer drag of `delta` logical pixels so the scene follows the pointer.
    pub fn pan_drag(&mut self, delta: Vec2, camera: &Camera, viewport: Viewport) {
        if !self.config.enable_pan || !viewport.is_valid() {
            return;
        }
        let ppu = camera.pixels_per_unit(viewport);
        if ppu <= 0.0 {
            return;
        }
        let units = self.config.pan_speed / ppu;
        self.pan_offset += camera.right() * (-delta.x * units) + camera.screen_up() * (delta.y * units);
    }

    /// Zooms by wheel `lines` (positive = towards the target).
    pub fn wheel(&mut self, lines: f32) {
        if !self.config.enable_zoom || lines == 0.0 || !lines.is_finite() {
            return;
        }
        self.zoom_scale *= 0.95f32.powf(lines * self.config.zoom_speed);
    }

    /// Whether any motion is still pending.
    pub fn is_moving(&self) -> bool {
        const EPS: f32 = 1e-5;
        self.rotate_delta.length() > EPS
            || self.pan_offset.length() > EPS
            || (self.zoom_scale - 1.0).abs() > EPS
    }

    /// Applies pending motion to `camera`. Returns `true` if the camera changed.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.is_moving() && camera.target == self.config.target {
            return false;
        }

        let f = if self.config.enable_damping {
            self.config.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        // Offset from the previous target; the camera follows pans and retargets.
        let offset = camera.position - camera.target;

        let pan = self.pan_offset * f;
        self.config.target += pan;
        camera.target = self.config.target;

        // Rotate on a sphere around the target, Y up.
        let radius = offset.length();
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = if radius > 0.0 { (offset.y / radius).clamp(-1.0, 1.0).acos() } else { PI * 0.5 };
        azimuth += self.rotate_delta.x * f;
        polar = (polar + self.rotate_delta.y * f).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        // Zoom: orthographic cameras scale, perspective cameras dolly.
        let zoom = 1.0 + (self.zoom_scale - 1.0) * f;
        let radius = match camera.projection {
            Projection::Perspective { near, far, .. } => (radius * zoom).clamp(near, far),
            _ => {
                camera.scale *= zoom;
                radius
            }
        };

        camera.position = camera.target
            + Vec3::new(polar.sin() * azimuth.sin(), polar.cos(), polar.sin() * azimuth.cos()) * radius;

        if self.config.enable_damping {
            self.rotate_delta = self.rotate_delta * (1.0 - f);
            self.pan_offset *= 1.0 - f;
            self.zoom_scale = 1.0 + (self.zoom_scale - 1.0) * (1.0 - f);
        } else {
            self.rotate_delta = Vec2::zero();
            self.pan_offset = Vec3::ZERO;
            self.zoom_scale = 1.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undamped() -> OrbitControls {
        OrbitControls::new(OrbitConfig { enable_damping: false, ..OrbitConfig::default() })
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── rotate ────────────────────────────────────────────────────────────

    #[test]
    fn rotation_keeps_distance_to_target() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        let before = cam.position.distance(cam.target);
        let mut orbit = undamped();
        orbit.rotate_drag(Vec2::new(25.0, 10.0), Viewport::new(100.0, 100.0));
        assert!(orbit.update(&mut cam));
        assert!(approx(cam.position.distance(cam.target), before));
        assert!(!orbit.is_moving());
    }

    #[test]
    fn polar_angle_is_clamped_at_the_pole() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        let mut orbit = undamped();
        orbit.rotate_drag(Vec2::new(0.0, 10_000.0), Viewport::new(100.0, 100.0));
        orbit.update(&mut cam);
        let dir = (cam.position - cam.target).normalize();
        assert!(dir.y > 0.99 && dir.is_finite());
        assert!(cam.right().is_finite());
    }

    #[test]
    fn disabled_rotation_ignores_drags() {
        let mut orbit = OrbitControls::new(OrbitConfig { enable_rotate: false, ..OrbitConfig::default() });
        orbit.rotate_drag(Vec2::new(10.0, 0.0), Viewport::new(100.0, 100.0));
        assert!(!orbit.is_moving());
    }

    // ── damping ───────────────────────────────────────────────────────────

    #[test]
    fn damping_spreads_motion_over_updates() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        let mut orbit = OrbitControls::new(OrbitConfig { damping_factor: 0.5, ..OrbitConfig::default() });
        orbit.rotate_drag(Vec2::new(30.0, 0.0), Viewport::new(100.0, 100.0));

        let start = cam.position;
        orbit.update(&mut cam);
        let first = cam.position;
        assert_ne!(first, start);
        assert!(orbit.is_moving());

        for _ in 0..40 {
            orbit.update(&mut cam);
        }
        assert!(!orbit.is_moving());
        assert!(!orbit.update(&mut cam));
    }

    // ── pan / zoom ────────────────────────────────────────────────────────

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        let offset = cam.position - cam.target;
        let mut orbit = undamped();
        orbit.pan_drag(Vec2::new(10.0, 0.0), &cam, Viewport::new(100.0, 100.0));
        orbit.update(&mut cam);
        assert_ne!(cam.target, Vec3::ZERO);
        assert!((cam.position - cam.target - offset).length() < 1e-3);
        assert_eq!(orbit.config().target, cam.target);
    }

    #[test]
    fn wheel_zooms_orthographic_by_scale() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        let mut orbit = undamped();
        orbit.wheel(1.0);
        orbit.update(&mut cam);
        assert!(cam.zoom() > 1.0);
    }

    #[test]
    fn configure_retargets_camera() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        let mut orbit = undamped();
        orbit.configure(OrbitConfig { target: Vec3::X, enable_damping: false, ..OrbitConfig::default() });
        assert!(orbit.update(&mut cam));
        assert_eq!(cam.target, Vec3::X);
    }
}
