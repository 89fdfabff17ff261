use super::Vec2;

/// Drawable surface size in logical pixels.
///
/// The default world camera maps one world unit to one logical pixel at
/// zoom 1, centered on the surface. `to_centered` performs that mapping for
/// pointer positions.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Half width and half height.
    #[inline]
    pub fn half_extents(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Width over height; 1.0 for degenerate sizes.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Converts a top-left, +Y-down pixel position into the centered,
    /// +Y-up space (origin at the surface center).
    #[inline]
    pub fn to_centered(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }

    /// Inverse of [`to_centered`](Self::to_centered).
    #[inline]
    pub fn from_centered(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.width * 0.5, self.height * 0.5 - p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_origin() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_centered(Vec2::new(400.0, 300.0)), Vec2::zero());
    }

    #[test]
    fn top_left_is_negative_x_positive_y() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_centered(Vec2::zero()), Vec2::new(-400.0, 300.0));
    }

    #[test]
    fn centered_round_trip() {
        let vp = Viewport::new(640.0, 480.0);
        let p = Vec2::new(12.5, 470.0);
        assert_eq!(vp.from_centered(vp.to_centered(p)), p);
    }

    #[test]
    fn degenerate_aspect_is_one() {
        assert_eq!(Viewport::new(0.0, 100.0).aspect(), 1.0);
        assert_eq!(Viewport::new(200.0, 100.0).aspect(), 2.0);
    }
}
