//! Orientation gizmo: three arrows along the world axes, drawn at a
//! constant screen size in a corner-free overlay.

use contourview_settings::ColorSettings;
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::mesh_rendering::{Quad, RenderableMesh};

const CONE_RADIUS: f32 = 0.01;
const SHAFT_RADIUS: f32 = 0.004;
const TIP_Z: f32 = 0.05;
const NECK_Z: f32 = 0.02;
const BASE_Z: f32 = 0.0;
/// Sides per ring: a full turn in 3 degree steps.
const SEGMENTS: usize = 121;

/// Builder for the axis indicator mesh
pub struct OrientationGizmo;

impl OrientationGizmo {
    /// Three colored arrows: X red, Y green, Z blue by default.
    pub fn build(colors: &ColorSettings) -> RenderableMesh {
        let arrow = Self::arrow();
        let mut gizmo = RenderableMesh::new();

        let instances = [
            (Mat4::IDENTITY, colors.gizmo_z),
            (Mat4::from_rotation_y(FRAC_PI_2), colors.gizmo_x),
            (Mat4::from_rotation_x(-FRAC_PI_2), colors.gizmo_y),
        ];
        for (rotation, color) in instances {
            let mut instance = arrow.clone();
            instance.transform(&rotation);
            instance.set_color(color);
            gizmo.append(&instance);
        }

        gizmo
    }

    /// One arrow along +Z: cone tip, cone base cap, shaft and shaft cap.
    pub fn arrow() -> RenderableMesh {
        let segments = SEGMENTS;
        let mut mesh = RenderableMesh::new();

        cone(&mut mesh, CONE_RADIUS, TIP_Z, NECK_Z, segments);
        disk(&mut mesh, CONE_RADIUS, NECK_Z, segments);
        cylinder(&mut mesh, SHAFT_RADIUS, NECK_Z, BASE_Z, segments);
        disk(&mut mesh, SHAFT_RADIUS, BASE_Z, segments);

        mesh
    }
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn ring_point(i: usize, segments: usize, radius: f32, z: f32) -> Vec3 {
    let angle = i as f32 * TAU / segments as f32;
    Vec3::new(angle.cos() * radius, angle.sin() * radius, z)
}

fn cone(mesh: &mut RenderableMesh, radius: f32, z_tip: f32, z_base: f32, segments: usize) {
    let tip = Vec3::new(0.0, 0.0, z_tip);
    let slope = |p: Vec3| Vec3::new(p.x, p.y, 0.0).normalize_or_zero() + Vec3::Z;

    for i in 0..segments {
        let a = ring_point(i, segments, radius, z_base);
        let b = ring_point(i + 1, segments, radius, z_base);
        let (na, nb) = (slope(a), slope(b));
        mesh.push_triangle([tip, a, b], [(na + nb).normalize_or_zero(), na, nb], WHITE);
    }
}

/// Filled circle facing -Z.
fn disk(mesh: &mut RenderableMesh, radius: f32, z: f32, segments: usize) {
    let center = Vec3::new(0.0, 0.0, z);
    for i in 0..segments {
        let a = ring_point(i, segments, radius, z);
        let b = ring_point(i + 1, segments, radius, z);
        mesh.push_triangle([center, b, a], [Vec3::NEG_Z; 3], WHITE);
    }
}

fn cylinder(mesh: &mut RenderableMesh, radius: f32, z_top: f32, z_bottom: f32, segments: usize) {
    for i in 0..segments {
        let a = ring_point(i, segments, radius, 0.0);
        let b = ring_point(i + 1, segments, radius, 0.0);
        let d = b - a;
        let normal = Vec3::new(d.y, -d.x, 0.0).normalize_or_zero();
        let corners = [
            Vec3::new(b.x, b.y, z_top),
            Vec3::new(a.x, a.y, z_top),
            Vec3::new(a.x, a.y, z_bottom),
            Vec3::new(b.x, b.y, z_bottom),
        ];
        mesh.push_quad(&Quad::new(corners, normal), WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::mesh_rendering::FLOATS_PER_VERTEX;

    #[test]
    fn test_arrow_points_along_z() {
        let arrow = OrientationGizmo::arrow();
        let (min, max) = arrow.bounds();
        assert!((max.z - TIP_Z).abs() < 1e-6);
        assert!((min.z - BASE_Z).abs() < 1e-6);
        assert!(max.x <= CONE_RADIUS + 1e-6);
        // cone + cap + cap fans, shaft quads
        assert_eq!(arrow.triangle_count(), 121 * 3 + 121 * 2);
    }

    #[test]
    fn test_gizmo_axes_and_colors() {
        let colors = ColorSettings::default();
        let gizmo = OrientationGizmo::build(&colors);
        let arrow = OrientationGizmo::arrow();
        assert_eq!(gizmo.vertex_count(), arrow.vertex_count() * 3);

        let per_arrow = arrow.vertex_count();
        let tip_of = |instance: usize| {
            gizmo
                .vertices
                .chunks(FLOATS_PER_VERTEX)
                .skip(instance * per_arrow)
                .take(per_arrow)
                .map(|v| Vec3::new(v[0], v[1], v[2]))
                .fold(Vec3::ZERO, |best, p| if p.length() > best.length() { p } else { best })
        };

        assert!(tip_of(0).angle_between(Vec3::Z) < 0.3);
        assert!(tip_of(1).angle_between(Vec3::X) < 0.3);
        assert!(tip_of(2).angle_between(Vec3::Y) < 0.3);

        let color_of = |instance: usize| {
            let v = instance * per_arrow * FLOATS_PER_VERTEX;
            [
                gizmo.vertices[v + 6],
                gizmo.vertices[v + 7],
                gizmo.vertices[v + 8],
                gizmo.vertices[v + 9],
            ]
        };
        assert_eq!(color_of(0), colors.gizmo_z);
        assert_eq!(color_of(1), colors.gizmo_x);
        assert_eq!(color_of(2), colors.gizmo_y);
    }
}
