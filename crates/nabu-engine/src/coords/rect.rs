use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square of side `2 * radius` centered on `center`.
    #[inline]
    pub fn around(center: Vec2, radius: f32) -> Self {
        Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max). Empty rects contain nothing.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Shrinks the rect by `left/top/right/bottom`, never below zero size.
    #[inline]
    pub fn inset(self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(
            self.origin.x + left,
            self.origin.y + top,
            (self.size.x - left - right).max(0.0),
            (self.size.y - top - bottom).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_and_min_edge() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_excludes_max_edge() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!r(5.0, 5.0, 0.0, 0.0).contains(Vec2::new(5.0, 5.0)));
    }

    // ── around / center ───────────────────────────────────────────────────

    #[test]
    fn around_is_centered() {
        let rect = Rect::around(Vec2::new(10.0, 20.0), 4.0);
        assert_eq!(rect, r(6.0, 16.0, 8.0, 8.0));
        assert_eq!(rect.center(), Vec2::new(10.0, 20.0));
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_each_side() {
        let inner = r(0.0, 0.0, 100.0, 80.0).inset(10.0, 5.0, 20.0, 15.0);
        assert_eq!(inner, r(10.0, 5.0, 70.0, 60.0));
    }

    #[test]
    fn inset_clamps_to_zero_size() {
        let inner = r(0.0, 0.0, 10.0, 10.0).inset(8.0, 8.0, 8.0, 8.0);
        assert!(inner.is_empty());
        assert_eq!(inner.size, Vec2::zero());
    }
}
