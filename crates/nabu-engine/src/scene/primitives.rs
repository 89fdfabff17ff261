//! Primitive mesh generators.
//!
//! All shapes are centered on the origin with +Y up. Flat shapes (plane,
//! circle) lie in the XY plane facing +Z. Triangles wind counter-clockwise
//! when viewed from outside.

use std::f32::consts::{PI, TAU};

use crate::coords::Vec3;

use super::geometry::MeshGeometry;

/// UV sphere with `width_segments` around and `height_segments` pole to pole.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshGeometry {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshGeometry::default();

    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = v * PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * TAU;
            let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.positions.push(n * radius);
            mesh.normals.push(n);
        }
    }

    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Pole rows collapse to a single triangle per quad.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Open-ended cylinder body with optional caps. A zero radius skips that cap.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> MeshGeometry {
    let rs = radial_segments.max(3);
    let half = height * 0.5;
    let slope = if height > 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };
    let mut mesh = MeshGeometry::default();

    // Body: two rings, top then bottom.
    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for ix in 0..=rs {
            let theta = ix as f32 / rs as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.positions.push(Vec3::new(r * sin, y, r * cos));
            mesh.normals.push(Vec3::new(sin, slope, cos).normalize());
        }
    }
    let row = rs + 1;
    for ix in 0..rs {
        let a = ix;
        let b = row + ix;
        let c = row + ix + 1;
        let d = ix + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    if radius_top > 0.0 {
        cap(&mut mesh, half, radius_top, rs, true);
    }
    if radius_bottom > 0.0 {
        cap(&mut mesh, -half, radius_bottom, rs, false);
    }
    mesh
}

fn cap(mesh: &mut MeshGeometry, y: f32, radius: f32, rs: u32, top: bool) {
    let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
    let center_start = mesh.positions.len() as u32;
    // One center vertex per segment keeps the layout uniform with the ring.
    for _ in 0..rs {
        mesh.positions.push(Vec3::new(0.0, y, 0.0));
        mesh.normals.push(normal);
    }
    let ring_start = mesh.positions.len() as u32;
    for ix in 0..=rs {
        let theta = ix as f32 / rs as f32 * TAU;
        mesh.positions.push(Vec3::new(radius * theta.sin(), y, radius * theta.cos()));
        mesh.normals.push(normal);
    }
    for ix in 0..rs {
        let c = center_start + ix;
        let i = ring_start + ix;
        if top {
            mesh.indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            mesh.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}

/// Cone with its apex at `+height / 2`.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshGeometry {
    cylinder(0.0, radius, height, radial_segments)
}

/// Axis-aligned box with per-face normals (4 vertices per face).
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshGeometry {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut mesh = MeshGeometry::default();

    // (normal, u axis, v axis): u x v == normal.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let base = mesh.positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push((n + u * su + v * sv) * h);
            mesh.normals.push(n);
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Subdivided rectangle in the XY plane.
pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshGeometry {
    let ws = width_segments.max(1);
    let hs = height_segments.max(1);
    let mut mesh = MeshGeometry::default();

    for iy in 0..=hs {
        let y = height * 0.5 - iy as f32 / hs as f32 * height;
        for ix in 0..=ws {
            let x = ix as f32 / ws as f32 * width - width * 0.5;
            mesh.positions.push(Vec3::new(x, y, 0.0));
            mesh.normals.push(Vec3::Z);
        }
    }
    grid_indices(&mut mesh, ws, hs);
    mesh
}

/// Ring-shaped tube. `radius` is center to tube center; `tube` the tube radius.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshGeometry {
    let rs = radial_segments.max(3);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshGeometry::default();

    for j in 0..=rs {
        let v = j as f32 / rs as f32 * TAU;
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * TAU;
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            mesh.positions.push(p);
            mesh.normals.push((p - center).normalize_or(Vec3::Z));
        }
    }
    for j in 1..=rs {
        for i in 1..=ts {
            let a = (ts + 1) * j + i - 1;
            let b = (ts + 1) * (j - 1) + i - 1;
            let c = (ts + 1) * (j - 1) + i;
            let d = (ts + 1) * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Filled disc in the XY plane.
pub fn circle(radius: f32, segments: u32) -> MeshGeometry {
    let s = segments.max(3);
    let mut mesh = MeshGeometry::default();
    mesh.positions.push(Vec3::ZERO);
    mesh.normals.push(Vec3::Z);
    for i in 0..=s {
        let theta = i as f32 / s as f32 * TAU;
        mesh.positions.push(Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0));
        mesh.normals.push(Vec3::Z);
    }
    for i in 1..=s {
        mesh.indices.extend_from_slice(&[i, i + 1, 0]);
    }
    mesh
}

/// Grid surface over `(cols + 1) x (rows + 1)` vertices produced by `vertex(col, row)`.
///
/// Normals are computed from the resulting faces, so the surface can be any
/// height function.
pub fn surface(cols: u32, rows: u32, mut vertex: impl FnMut(u32, u32) -> Vec3) -> MeshGeometry {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let mut mesh = MeshGeometry::default();
    for row in 0..=rows {
        for col in 0..=cols {
            mesh.positions.push(vertex(col, row));
        }
    }
    grid_indices(&mut mesh, cols, rows);
    mesh.compute_vertex_normals();
    mesh
}

fn grid_indices(mesh: &mut MeshGeometry, cols: u32, rows: u32) {
    let row = cols + 1;
    for iy in 0..rows {
        for ix in 0..cols {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(mesh: &MeshGeometry) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len())
            && mesh.normals.len() == mesh.positions.len()
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn sphere_counts() {
        let m = sphere(1.0, 8, 6);
        assert_eq!(m.vertex_count(), 9 * 7);
        assert_eq!(m.triangle_count(), 8 * (6 - 1) * 2);
        assert!(indices_in_range(&m));
    }

    #[test]
    fn cuboid_counts() {
        let m = cuboid(1.0, 2.0, 3.0);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
    }

    #[test]
    fn cone_skips_apex_cap() {
        let cone = cone(1.0, 2.0, 8);
        let cyl = cylinder(1.0, 1.0, 2.0, 8);
        assert_eq!(cyl.triangle_count() - cone.triangle_count(), 8);
        assert!(indices_in_range(&cone));
    }

    #[test]
    fn torus_and_circle_counts() {
        let t = torus(2.0, 0.5, 6, 12);
        assert_eq!(t.vertex_count(), 7 * 13);
        assert_eq!(t.triangle_count(), 6 * 12 * 2);
        let c = circle(1.0, 10);
        assert_eq!(c.vertex_count(), 12);
        assert_eq!(c.triangle_count(), 10);
        assert!(indices_in_range(&t) && indices_in_range(&c));
    }

    #[test]
    fn plane_counts() {
        let p = plane(2.0, 2.0, 3, 2);
        assert_eq!(p.vertex_count(), 12);
        assert_eq!(p.triangle_count(), 12);
    }

    // ── shape ─────────────────────────────────────────────────────────────

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let m = sphere(2.5, 12, 8);
        assert!(m.positions.iter().all(|p| (p.length() - 2.5).abs() < 1e-4));
    }

    #[test]
    fn cuboid_extent_matches_size() {
        let m = cuboid(2.0, 4.0, 6.0);
        let max = m.positions.iter().fold(Vec3::splat(f32::MIN), |a, &p| a.max(p));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn flat_surface_normals_point_up() {
        let m = surface(4, 4, |c, r| Vec3::new(c as f32, 0.0, r as f32));
        assert!(m.normals.iter().all(|n| (*n - Vec3::Y).length() < 1e-5));
    }
}
