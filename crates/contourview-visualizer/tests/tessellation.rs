//! Ribbon tessellation against known geometry

use contourview_core::{GeometrySegment, Point, Shape};
use contourview_settings::{EndMarkerPolicy, ToolpathSettings};
use contourview_visualizer::{Bounds, MeshBuilder, Quad};
use glam::{Vec2, Vec3};
use proptest::prelude::*;
use std::f64::consts::{PI, TAU};

fn plain_builder() -> MeshBuilder {
    MeshBuilder::new(ToolpathSettings {
        mark_open_path_start: false,
        end_markers: EndMarkerPolicy::Off,
        ..ToolpathSettings::default()
    })
}

fn xy_sorted(quad: &Quad) -> Vec<(f32, f32)> {
    let mut pts: Vec<(f32, f32)> = quad.corners.iter().map(|c| (c.x, c.y)).collect();
    pts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    pts
}

#[test]
fn test_line_example_caps() {
    let shape = Shape::new(
        vec![GeometrySegment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0))],
        true,
    );
    let mesh = plain_builder().build(&shape, &mut Bounds::new()).unwrap();

    let top = &mesh.top()[0];
    let bottom = &mesh.bottom()[0];
    let mut expected = vec![(0.0, 0.75), (10.0, 0.75), (10.0, -0.75), (0.0, -0.75)];
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

    assert_eq!(xy_sorted(top), expected);
    assert_eq!(xy_sorted(bottom), expected);
    assert!(top.corners.iter().all(|c| c.z == 0.0));
    assert!(bottom.corners.iter().all(|c| c.z == -3.0));
    assert_eq!(top.normal, Vec3::Z);
    assert_eq!(bottom.normal, Vec3::NEG_Z);
}

#[test]
fn test_caps_have_opposite_winding() {
    let shape = Shape::new(
        vec![GeometrySegment::line(Point::new(0.0, 0.0), Point::new(3.0, 4.0))],
        true,
    );
    let mesh = plain_builder().build(&shape, &mut Bounds::new()).unwrap();

    let winding = |q: &Quad| {
        let [a, b, c, _] = q.corners;
        (b - a).cross(c - a).z.signum()
    };
    assert_eq!(winding(&mesh.top()[0]), 1.0);
    assert_eq!(winding(&mesh.bottom()[0]), -1.0);
}

#[test]
fn test_full_circle_segment_count() {
    let shape = Shape::new(vec![GeometrySegment::arc(Point::ORIGIN, 10.0, 0.0, TAU)], true);
    let mesh = plain_builder().build(&shape, &mut Bounds::new()).unwrap();
    assert_eq!(mesh.top().len(), 121);
    assert_eq!(mesh.bottom().len(), 121);
    assert_eq!(mesh.walls().len(), 242);
}

#[test]
fn test_arc_sub_segments_share_edges() {
    for extent in [3.0 * PI / 2.0, -3.0 * PI / 2.0] {
        let shape = Shape::new(
            vec![GeometrySegment::arc(Point::new(2.0, -1.0), 10.0, 0.3, extent)],
            true,
        );
        let mesh = plain_builder().build(&shape, &mut Bounds::new()).unwrap();
        let top = mesh.top();
        assert_eq!(top.len(), 91);

        for pair in top.windows(2) {
            let shared = pair[0]
                .corners
                .iter()
                .filter(|c| pair[1].corners.contains(c))
                .count();
            assert_eq!(shared, 2, "extent {extent}: neighbouring sub-arcs must share an edge");
        }
    }
}

#[test]
fn test_arc_ring_radii() {
    let center = Point::new(5.0, 5.0);
    let shape = Shape::new(vec![GeometrySegment::arc(center, 4.0, 0.0, PI / 2.0)], true);
    let mesh = plain_builder().build(&shape, &mut Bounds::new()).unwrap();

    let c = Vec2::new(5.0, 5.0);
    for quad in mesh.top() {
        let radii: Vec<f32> = quad
            .corners
            .iter()
            .map(|p| (p.truncate() - c).length())
            .collect();
        // inner, inner, outer, outer
        assert!((radii[0] - 3.25).abs() < 1e-4);
        assert!((radii[1] - 3.25).abs() < 1e-4);
        assert!((radii[2] - 4.75).abs() < 1e-4);
        assert!((radii[3] - 4.75).abs() < 1e-4);
    }
}

fn expected_line_bounds(shape: &Shape, half_width: f64) -> Bounds {
    let mut bounds = Bounds::new();
    for seg in &shape.segments {
        let (s, e) = (seg.start_point(), seg.end_point());
        let dir = s.unit_vector(&e);
        let d = Point::new(dir.y * half_width, -dir.x * half_width);
        for p in [s + d, e + d, e - d, s - d] {
            bounds.update(p.x, p.y);
        }
    }
    bounds
}

proptest! {
    #[test]
    fn prop_closed_polyline_bounds(
        points in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 3..10)
    ) {
        let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let shape = Shape::polygon(&pts);

        let builder = MeshBuilder::new(ToolpathSettings::default());
        let mut bounds = Bounds::new();
        builder.build(&shape, &mut bounds).unwrap();

        prop_assert_eq!(bounds, expected_line_bounds(&shape, 0.75));
    }

    #[test]
    fn prop_arc_segment_count(extent_deg in -720.0..720.0f64) {
        let extent = extent_deg.to_radians();
        let shape = Shape::new(
            vec![GeometrySegment::arc(Point::ORIGIN, 5.0, 0.0, extent)],
            true,
        );
        let mesh = plain_builder().build(&shape, &mut Bounds::new()).unwrap();
        let n = mesh.top().len();
        let degrees = extent.to_degrees().abs();
        prop_assert_eq!(n, (degrees / 3.0).floor() as usize + 1);
        prop_assert!(degrees / n as f64 <= 3.0);
    }
}
