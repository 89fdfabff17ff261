use nabu_engine::coords::Vec3;
use nabu_engine::scene::{LineGeometry, Material, NodeHandle, NodeKind};

use crate::ctx::Ctx;
use crate::theme::ThemeRole;

use super::{impl_shape, node_of, Colorable};

/// Default cell size in pixels at the zoom the grid was created with.
pub const GRID_SPACING_PX: f32 = 50.0;

const MAX_DIVISIONS: u32 = 1000;

/// Square line grid on the XZ plane, centered on the origin.
pub struct Grid {
    node: NodeHandle,
    size: f32,
    divisions: u32,
}

impl Grid {
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }
}

impl_shape!(Grid);

impl Colorable for Grid {}

fn grid_lines(size: f32, divisions: u32) -> LineGeometry {
    let half = size * 0.5;
    let step = size / divisions as f32;
    let mut points = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let t = -half + step * i as f32;
        points.extend_from_slice(&[
            Vec3::new(t, 0.0, -half),
            Vec3::new(t, 0.0, half),
            Vec3::new(-half, 0.0, t),
            Vec3::new(half, 0.0, t),
        ]);
    }
    LineGeometry { width: 1.0, ..LineGeometry::segments(points) }
}

impl Ctx {
    /// A `size` wide grid with `divisions` cells per side.
    ///
    /// `size` defaults to twice the camera extent and the cell size to
    /// [`GRID_SPACING_PX`] on screen, both at the current zoom.
    pub fn grid(&mut self, size: Option<f32>, divisions: Option<u32>) -> Grid {
        let zoom = self.zoom();
        let size = size.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(2.0 * self.camera_extent() / zoom);
        let divisions = divisions
            .unwrap_or_else(|| (size / (GRID_SPACING_PX / zoom)).round() as u32)
            .clamp(1, MAX_DIVISIONS);

        let node = node_of(NodeKind::Lines(grid_lines(size, divisions)), Material::basic(self.color(ThemeRole::Grid)));
        self.spawn(&node);
        Grid { node, size, divisions }
    }
}
