//! Fit-to-view behaviour

use contourview_core::{GeometrySegment, Point, Shape};
use contourview_settings::{Config, ToolpathSettings};
use contourview_visualizer::{CameraState, SceneBuilder, ToolpathCanvas};
use glam::DVec3;
use proptest::prelude::*;

#[test]
fn test_fit_places_bounds_inside_margin() {
    let mut canvas = ToolpathCanvas::default();
    canvas
        .add_shape(&Shape::polygon(&[
            Point::new(-20.0, 5.0),
            Point::new(60.0, 5.0),
            Point::new(60.0, 45.0),
            Point::new(-20.0, 45.0),
        ]))
        .unwrap();
    assert!(canvas.auto_scale());

    let bounds = *canvas.bounds();
    let camera = canvas.camera();
    let f = camera.base_frustum();

    let lower_left = camera.world_to_eye(DVec3::new(bounds.min_x, bounds.min_y, 0.0));
    let upper_right = camera.world_to_eye(DVec3::new(bounds.max_x, bounds.max_y, 0.0));

    // X is the limiting axis here, so it fills the margin exactly.
    assert!((lower_left.x - f.left * 0.95).abs() < 1e-12);
    assert!((upper_right.x - f.right * 0.95).abs() < 1e-12);
    // World Y up: the bottom edge sits at the margin, the top stays inside.
    assert!((lower_left.y - f.bottom * 0.95).abs() < 1e-12);
    assert!(upper_right.y > f.top * 0.95);
}

#[test]
fn test_collinear_scene_is_not_fitted() {
    let config = Config {
        toolpath: ToolpathSettings {
            tool_width: 0.0,
            ..ToolpathSettings::default()
        },
        ..Config::default()
    };
    let mut canvas = ToolpathCanvas::new(config);
    canvas
        .add_shape(&Shape::new(
            vec![GeometrySegment::line(Point::new(0.0, 2.0), Point::new(10.0, 2.0))],
            true,
        ))
        .unwrap();

    let before = canvas.camera().clone();
    assert!(canvas.bounds().is_valid());
    assert!(!canvas.auto_scale());
    assert_eq!(*canvas.camera(), before);
}

proptest! {
    #[test]
    fn prop_auto_scale_is_idempotent(
        points in prop::collection::vec((-500.0..500.0f64, -500.0..500.0f64), 3..8),
        width in 100.0..1600.0f64,
        height in 100.0..1600.0f64,
    ) {
        let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let shape = Shape::polygon(&pts);
        let (scene, _) = SceneBuilder::build(ToolpathSettings::default(), [&shape]);

        let mut camera = CameraState::default();
        camera.resize(width, height);
        prop_assert!(camera.auto_scale(scene.bounds()));
        let first = camera.clone();
        prop_assert!(camera.auto_scale(scene.bounds()));
        prop_assert_eq!(camera, first);
    }
}
