use crate::coords::{Mat4, Vec2, Vec3, Viewport};

/// Half-depth of the default orthographic camera. Large enough that depth
/// clipping never matters at typical scene scales.
pub const CAMERA_DEPTH: f32 = 10_000.0;

/// Distance of the default camera from the origin along each axis.
pub const CAMERA_DISTANCE: f32 = 100.0;

/// Camera projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Caller-supplied projection matrix. Bounds updates leave it untouched.
    Custom(Mat4),
}

/// A look-at camera with a uniform scale.
///
/// `scale` behaves like an object scale on the camera: a camera scaled by
/// `0.5` sees half as much world, so everything appears twice as large.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub scale: Vec3,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self::orthographic(1.0, 1.0)
    }
}

impl Camera {
    /// Default camera: orthographic, off-axis, looking at the origin, Y up.
    pub fn orthographic(width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ONE * CAMERA_DISTANCE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            scale: Vec3::ONE,
            projection: Projection::Orthographic {
                left: -0.5,
                right: 0.5,
                bottom: -0.5,
                top: 0.5,
                near: -CAMERA_DEPTH,
                far: CAMERA_DEPTH,
            },
        };
        camera.set_bounds(width, height);
        camera
    }

    /// Perspective camera at the default position.
    pub fn perspective(fov_y: f32, aspect: f32) -> Self {
        Self {
            projection: Projection::Perspective { fov_y, aspect, near: 0.1, far: CAMERA_DEPTH },
            ..Self::orthographic(1.0, 1.0)
        }
    }

    #[inline]
    pub fn is_orthographic(&self) -> bool {
        matches!(self.projection, Projection::Orthographic { .. })
    }

    /// Recomputes projection extents for a surface of `width` x `height` logical pixels.
    ///
    /// Orthographic cameras get `±width / 2`, `±height / 2`; perspective cameras
    /// only update their aspect ratio. The result depends on the last call only.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        match &mut self.projection {
            Projection::Orthographic { left, right, bottom, top, .. } => {
                *left = -width * 0.5;
                *right = width * 0.5;
                *bottom = -height * 0.5;
                *top = height * 0.5;
            }
            Projection::Perspective { aspect, .. } => {
                if height > 0.0 {
                    *aspect = width / height;
                }
            }
            Projection::Custom(_) => {}
        }
    }

    /// `1 / min(scale)`.
    #[inline]
    pub fn zoom(&self) -> f32 {
        1.0 / self.scale.min_element()
    }

    /// Sets a uniform scale of `1 / zoom`. Callers validate `zoom > 0`.
    #[inline]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.scale = Vec3::splat(1.0 / zoom);
    }

    /// Largest absolute clip plane distance, or `None` for custom projections.
    pub fn extent(&self) -> Option<f32> {
        match self.projection {
            Projection::Orthographic { near, far, .. } | Projection::Perspective { near, far, .. } => {
                Some(near.abs().max(far.abs()))
            }
            Projection::Custom(_) => None,
        }
    }

    /// Orthographic half width/height in world units at zoom 1.
    pub fn half_extents(&self) -> Option<(f32, f32)> {
        match self.projection {
            Projection::Orthographic { left, right, bottom, top, .. } => {
                Some(((right - left) * 0.5, (top - bottom) * 0.5))
            }
            _ => None,
        }
    }

    /// Unit vector from the camera towards its target.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Camera-space right axis in world space.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or(Vec3::X)
    }

    /// Camera-space up axis in world space (orthogonal to `forward`).
    #[inline]
    pub fn screen_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// World to view transform, including the inverse camera scale.
    ///
    /// Orthographic cameras leave depth unscaled so zooming in never pushes
    /// content outside the clip range.
    pub fn view_matrix(&self) -> Mat4 {
        let inv = self.scale.recip();
        let inv = if self.is_orthographic() { Vec3::new(inv.x, inv.y, 1.0) } else { inv };
        Mat4::from_scale(inv) * Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic { left, right, bottom, top, near, far } => {
                Mat4::orthographic_rh(left, right, bottom, top, near, far)
            }
            Projection::Perspective { fov_y, aspect, near, far } => {
                Mat4::perspective_rh(fov_y, aspect, near, far)
            }
            Projection::Custom(m) => m,
        }
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Projects a world point to overlay pixels (top-left origin).
    ///
    /// Returns `None` for points behind a perspective camera or outside the
    /// depth range.
    pub fn project(&self, point: Vec3, viewport: Viewport) -> Option<Vec2> {
        let clip = self.view_proj() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.width,
            (0.5 - ndc.y * 0.5) * viewport.height,
        ))
    }

    /// Logical pixels covered by one world unit at the target distance.
    pub fn pixels_per_unit(&self, viewport: Viewport) -> f32 {
        let span = match self.projection {
            Projection::Orthographic { bottom, top, .. } => (top - bottom) * self.scale.y,
            Projection::Perspective { fov_y, .. } => {
                // A uniform scale about the eye does not change a perspective image.
                let distance = self.position.distance(self.target);
                2.0 * distance * (fov_y * 0.5).tan()
            }
            Projection::Custom(m) => 2.0 / m.y_axis.y.abs().max(f32::EPSILON),
        };
        if span > 0.0 { viewport.height / span } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn default_is_off_axis_orthographic() {
        let cam = Camera::orthographic(800.0, 600.0);
        assert!(cam.is_orthographic());
        assert_eq!(cam.target, Vec3::ZERO);
        assert!(cam.position.x > 0.0 && cam.position.y > 0.0 && cam.position.z > 0.0);
        assert_eq!(cam.extent(), Some(CAMERA_DEPTH));
        assert_eq!(cam.half_extents(), Some((400.0, 300.0)));
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn last_bounds_call_wins() {
        let mut a = Camera::orthographic(1.0, 1.0);
        a.set_bounds(800.0, 600.0);
        a.set_bounds(400.0, 300.0);
        let b = Camera::orthographic(400.0, 300.0);
        assert_eq!(a.projection, b.projection);
        assert_eq!(a.projection_matrix(), b.projection_matrix());
    }

    #[test]
    fn perspective_bounds_only_touch_aspect() {
        let mut cam = Camera::perspective(1.0, 1.0);
        cam.set_bounds(400.0, 200.0);
        match cam.projection {
            Projection::Perspective { aspect, fov_y, .. } => {
                assert_eq!(aspect, 2.0);
                assert_eq!(fov_y, 1.0);
            }
            _ => panic!("projection changed kind"),
        }
    }

    #[test]
    fn custom_projection_has_no_extent() {
        let mut cam = Camera::default();
        cam.projection = Projection::Custom(Mat4::IDENTITY);
        cam.set_bounds(10.0, 10.0);
        assert_eq!(cam.extent(), None);
        assert_eq!(cam.projection, Projection::Custom(Mat4::IDENTITY));
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn zoom_round_trips() {
        let mut cam = Camera::default();
        for z in [0.25, 1.0, 3.0, 1234.5] {
            cam.set_zoom(z);
            assert!(approx(cam.zoom(), z));
        }
    }

    #[test]
    fn zoom_uses_smallest_scale_axis() {
        let mut cam = Camera::default();
        cam.scale = Vec3::new(0.5, 0.25, 1.0);
        assert_eq!(cam.zoom(), 4.0);
    }

    #[test]
    fn zoom_magnifies_projection() {
        let vp = Viewport::new(200.0, 200.0);
        let mut cam = Camera::orthographic(200.0, 200.0);
        let before = cam.pixels_per_unit(vp);
        cam.set_zoom(2.0);
        assert!(approx(cam.pixels_per_unit(vp), before * 2.0));
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn target_projects_to_viewport_center() {
        let vp = Viewport::new(640.0, 480.0);
        let cam = Camera::orthographic(640.0, 480.0);
        let p = cam.project(Vec3::ZERO, vp).unwrap();
        assert!(approx(p.x, 320.0) && approx(p.y, 240.0));
    }

    #[test]
    fn screen_up_projects_upwards() {
        let vp = Viewport::new(100.0, 100.0);
        let cam = Camera::orthographic(100.0, 100.0);
        let p = cam.project(cam.screen_up() * 10.0, vp).unwrap();
        assert!(approx(p.x, 50.0) && approx(p.y, 40.0));
    }

    #[test]
    fn deep_zoom_keeps_origin_in_depth_range() {
        let mut cam = Camera::orthographic(100.0, 100.0);
        cam.set_zoom(5_000.0);
        assert!(cam.project(Vec3::ZERO, Viewport::new(100.0, 100.0)).is_some());
    }

    #[test]
    fn points_behind_perspective_camera_are_culled() {
        let cam = Camera::perspective(1.0, 1.0);
        let behind = cam.position - cam.forward() * 10.0;
        assert!(cam.project(behind, Viewport::new(100.0, 100.0)).is_none());
    }
}
