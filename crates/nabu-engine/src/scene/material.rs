use crate::paint::Color;

/// Shading model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum MaterialKind {
    /// Flat color, unaffected by lights.
    #[default]
    Basic,
    /// Lambert-style diffuse shading from the scene lighting.
    Standard,
    /// Debug shading that maps normals to colors.
    Normal,
}

/// Surface appearance shared by every node kind.
///
/// Lines and points only honor `color`, `opacity` and `vertex_colors`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    pub opacity: f32,
    /// Draw mesh triangle edges as lines instead of filled faces.
    pub wireframe: bool,
    /// Use per-vertex colors from the geometry instead of `color`.
    pub vertex_colors: bool,
}

impl Material {
    pub fn new(kind: MaterialKind, color: Color) -> Self {
        Self { kind, color, ..Self::default() }
    }

    pub fn basic(color: Color) -> Self {
        Self::new(MaterialKind::Basic, color)
    }

    pub fn standard(color: Color) -> Self {
        Self::new(MaterialKind::Standard, color)
    }

    /// `color` with `opacity` folded into alpha.
    #[inline]
    pub fn effective_color(&self) -> Color {
        self.color.with_alpha(self.color.a * self.opacity.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.effective_color().a < 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Basic,
            color: Color::WHITE,
            opacity: 1.0,
            wireframe: false,
            vertex_colors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_folds_into_alpha() {
        let mut m = Material::basic(Color::new(1.0, 0.0, 0.0, 0.5));
        m.opacity = 0.5;
        assert_eq!(m.effective_color().a, 0.25);
        assert!(m.is_transparent());
        assert!(!Material::default().is_transparent());
    }
}
