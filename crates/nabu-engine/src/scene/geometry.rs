use crate::coords::Vec3;
use crate::paint::Color;

/// Indexed triangle mesh.
///
/// `normals` and `colors` (when present) are parallel to `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub colors: Option<Vec<Color>>,
}

impl MeshGeometry {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recomputes smooth per-vertex normals from face normals (area weighted).
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in &mut normals {
            *n = n.normalize_or(Vec3::Y);
        }
        self.normals = normals;
    }

    /// Unique triangle edges as index pairs, for wireframe rendering.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .indices
            .chunks_exact(3)
            .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}

/// How consecutive line points are joined.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineTopology {
    /// `p0-p1-p2-...`
    #[default]
    Strip,
    /// `p0-p1`, `p2-p3`, ...
    Segments,
}

/// Polyline in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub points: Vec<Vec3>,
    pub colors: Option<Vec<Color>>,
    pub topology: LineTopology,
    /// `(dash, gap)` lengths in world units. `None` draws a solid line.
    pub dash: Option<(f32, f32)>,
    /// Stroke width in logical pixels.
    pub width: f32,
}

impl Default for LineGeometry {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            colors: None,
            topology: LineTopology::Strip,
            dash: None,
            width: 1.5,
        }
    }
}

impl LineGeometry {
    pub fn strip(points: Vec<Vec3>) -> Self {
        Self { points, ..Self::default() }
    }

    pub fn segments(points: Vec<Vec3>) -> Self {
        Self { points, topology: LineTopology::Segments, ..Self::default() }
    }

    /// Segments as `(start, end, start_index, end_index)`.
    pub fn segment_iter(&self) -> impl Iterator<Item = (Vec3, Vec3, usize, usize)> + '_ {
        let step = match self.topology {
            LineTopology::Strip => 1,
            LineTopology::Segments => 2,
        };
        (0..self.points.len().saturating_sub(1))
            .step_by(step)
            .map(move |i| (self.points[i], self.points[i + 1], i, i + 1))
    }
}

/// Splits the segment `a..b` into dashes of `dash` length separated by `gap`.
///
/// `phase` is the distance already consumed along the pattern by previous
/// segments of the same polyline; the updated phase is returned so dashes
/// continue across corners.
pub fn dash_segments(a: Vec3, b: Vec3, dash: f32, gap: f32, phase: f32, out: &mut Vec<(Vec3, Vec3)>) -> f32 {
    let len = a.distance(b);
    let period = dash + gap;
    if len <= 0.0 || dash <= 0.0 || period <= 0.0 {
        return phase;
    }
    let dir = (b - a) / len;

    let mut t = 0.0;
    let mut phase = phase % period;
    while t < len {
        let remaining = len - t;
        if phase < dash {
            let step = (dash - phase).min(remaining);
            out.push((a + dir * t, a + dir * (t + step)));
            t += step;
            phase += step;
        } else {
            let step = (period - phase).min(remaining);
            t += step;
            phase += step;
        }
        if phase >= period {
            phase -= period;
        }
    }
    phase
}

/// Point cloud. `size` is in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGeometry {
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<Color>>,
    pub size: f32,
}

impl Default for PointGeometry {
    fn default() -> Self {
        Self { positions: Vec::new(), colors: None, size: 4.0 }
    }
}

/// Whether a label keeps a constant size on screen or lives in world units.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextSizing {
    /// `size` is in world units and follows the camera zoom.
    #[default]
    World,
    /// `size` is in logical pixels regardless of zoom.
    Screen,
}

/// Text label anchored at the node origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub size: f32,
    pub sizing: TextSizing,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, size: f32, sizing: TextSizing) -> Self {
        Self { text: text.into(), size, sizing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── dashes ────────────────────────────────────────────────────────────

    #[test]
    fn dashes_alternate_along_segment() {
        let mut out = Vec::new();
        dash_segments(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0, 1.0, 0.0, &mut out);
        // 0-2, 3-5, 6-8, 9-10
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], (Vec3::new(3.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(out[3].1, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn dash_phase_continues_across_segments() {
        let mut out = Vec::new();
        let phase = dash_segments(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 2.0, 2.0, 0.0, &mut out);
        assert_eq!(phase, 1.0);
        dash_segments(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 4.0, 0.0), 2.0, 2.0, phase, &mut out);
        // First segment emits 0..1, second continues the dash for 1 unit, then gaps 2.
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], (Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn degenerate_segment_emits_nothing() {
        let mut out = Vec::new();
        let phase = dash_segments(Vec3::ONE, Vec3::ONE, 1.0, 1.0, 0.5, &mut out);
        assert!(out.is_empty());
        assert_eq!(phase, 0.5);
    }

    // ── topology ──────────────────────────────────────────────────────────

    #[test]
    fn strip_and_segment_counts() {
        let pts = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        assert_eq!(LineGeometry::strip(pts.clone()).segment_iter().count(), 3);
        assert_eq!(LineGeometry::segments(pts).segment_iter().count(), 2);
    }

    #[test]
    fn wireframe_edges_are_shared() {
        let mesh = MeshGeometry {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            normals: Vec::new(),
            indices: vec![0, 1, 2, 2, 1, 3],
            colors: None,
        };
        // Two triangles sharing edge 1-2.
        assert_eq!(mesh.edges().len(), 5);
    }
}
