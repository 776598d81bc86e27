//! End-to-end: scene file to frame plan

use contourview_core::{GeometrySegment, Placement, PlacementNode, Point, Shape};
use contourview_settings::Config;
use contourview_visualizer::{
    DrawTarget, PointerButton, PointerButtons, SceneDocument, ShapeStyle, ToolpathCanvas,
};
use glam::DVec2;
use std::f64::consts::PI;

fn slot_document() -> SceneDocument {
    let insert = PlacementNode::new(Placement {
        rotation: PI / 2.0,
        ..Placement::translation(100.0, 50.0)
    });
    let nested = PlacementNode::new(Placement::scale(2.0, 2.0)).with_parent(insert.id);

    let slot = Shape::new(
        vec![
            GeometrySegment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
            GeometrySegment::arc(Point::new(10.0, 2.0), 2.0, -PI / 2.0, PI),
            GeometrySegment::line(Point::new(10.0, 4.0), Point::new(0.0, 4.0)),
            GeometrySegment::arc(Point::new(0.0, 2.0), 2.0, PI / 2.0, PI),
        ],
        true,
    )
    .with_parent(nested.id);

    let lead_in = Shape::new(
        vec![GeometrySegment::line(Point::new(-5.0, -5.0), Point::new(0.0, 0.0))],
        false,
    );

    SceneDocument::new(vec![insert, nested], vec![slot, lead_in])
}

#[test]
fn test_scene_file_round_trip_and_render_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenes").join("slot.json");
    let original = slot_document();
    original.save(&path).unwrap();

    let doc = SceneDocument::load(&path).unwrap();
    assert_eq!(doc, original);
    let resolved = doc.resolve();
    assert!(resolved.unresolved.is_empty());

    let mut canvas = ToolpathCanvas::new(Config::default());
    let report = canvas.load_scene(&resolved.shapes);
    assert_eq!(report.compiled, 2);
    assert!(report.is_complete());

    // The slot is rotated a quarter turn and doubled around (100, 50).
    let bounds = *canvas.bounds();
    assert!(bounds.max_x > 100.0 && bounds.min_x < 92.0);
    assert!(bounds.max_y > 69.0);

    assert!(canvas.auto_scale());
    canvas.build_orientation_gizmo();

    let plan = canvas.frame();
    assert_eq!(plan.draw_calls.len(), 3);
    assert_eq!(plan.draw_calls[2].target, DrawTarget::Gizmo);
    assert_eq!(plan.viewport.width, 800);
}

#[test]
fn test_missing_scene_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SceneDocument::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_interaction_session() {
    let mut canvas = ToolpathCanvas::default();
    let handle = canvas
        .add_shape(&Shape::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]))
        .unwrap();
    canvas.auto_scale();
    canvas.clear_dirty();

    assert!(canvas.set_style(
        handle,
        ShapeStyle {
            selected: true,
            disabled: false
        }
    ));
    assert!(canvas.is_dirty());
    canvas.clear_dirty();

    let scale = canvas.camera().scale;
    assert!(canvas.on_wheel(DVec2::new(400.0, 300.0), -120.0));
    assert!(canvas.camera().scale < scale);

    canvas.on_key_down(contourview_visualizer::Key::Control);
    canvas.on_pointer_down(DVec2::new(10.0, 10.0), PointerButton::Primary);
    let x = canvas.camera().position.x;
    assert!(canvas.on_pointer_move(DVec2::new(70.0, 10.0), PointerButtons::PRIMARY));
    assert!((canvas.camera().position.x - (x + 0.1)).abs() < 1e-12);
    canvas.on_pointer_up(DVec2::new(70.0, 10.0), PointerButton::Primary);
    canvas.on_key_up(contourview_visualizer::Key::Control);
    assert!(canvas.is_dirty());
}
