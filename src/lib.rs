//! # ContourView
//!
//! Extruded 3D preview of 2D machining contours.
//!
//! ## Architecture
//!
//! ContourView is organized as a workspace with multiple crates:
//!
//! 1. **contourview-core** - Geometry primitives, placement resolution, errors
//! 2. **contourview-settings** - Viewer configuration (JSON/TOML)
//! 3. **contourview-visualizer** - Tessellation, camera, scene and renderer
//! 4. **contourview** - Logging bootstrap and the headless scene inspector

pub use contourview_core::{
    resolve_absolute, ArcSegment, Error, GeometryError, GeometrySegment, LineSegment, Placement,
    PlacementNode, PlacementTree, Point, Result, Shape,
};

pub use contourview_settings::{
    CameraSettings, ColorMode, ColorSettings, Config, EndMarkerPolicy, LightingSettings,
    ToolpathSettings, ViewerSettings,
};

pub use contourview_visualizer::{
    Bounds, CameraController, CameraState, CompiledScene, FramePlan, MeshBuilder, SceneBuildReport,
    SceneBuilder, SceneDocument, ToolpathCanvas,
};

use serde::Serialize;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// What the inspector reports about a compiled and fitted scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub shapes: usize,
    pub unresolved: usize,
    pub skipped: usize,
    pub meshes: usize,
    pub quads: usize,
    /// `[min_x, min_y, max_x, max_y]`, absent for an empty scene
    pub bounds: Option<[f64; 4]>,
    pub fitted: bool,
    pub camera_position: [f64; 3],
    pub camera_scale: f64,
    pub draw_calls: usize,
}

/// Compile `doc` the way the viewer would, fit the camera and summarize.
pub fn inspect_scene(doc: &SceneDocument, config: &Config) -> SceneSummary {
    let resolved = doc.resolve();

    let mut canvas = ToolpathCanvas::new(config.clone());
    let report = canvas.load_scene(&resolved.shapes);
    let fitted = canvas.auto_scale();
    canvas.build_orientation_gizmo();

    let scene = canvas.scene();
    let bounds = scene.bounds();
    let camera = canvas.camera();

    SceneSummary {
        shapes: doc.shapes.len(),
        unresolved: resolved.unresolved.len(),
        skipped: report.skipped.len(),
        meshes: scene.len(),
        quads: scene.quad_count(),
        bounds: bounds
            .is_valid()
            .then(|| [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y]),
        fitted,
        camera_position: camera.position.to_array(),
        camera_scale: camera.scale,
        draw_calls: canvas.frame().draw_calls.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_fits_placed_scene() {
        let insert = PlacementNode::new(Placement::translation(-30.0, 12.0));
        let pocket = Shape::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .with_parent(insert.id);
        let hole = Shape::new(
            vec![GeometrySegment::arc(
                Point::new(5.0, 5.0),
                3.0,
                0.0,
                std::f64::consts::TAU,
            )],
            true,
        );
        let doc = SceneDocument::new(vec![insert], vec![pocket, hole]);

        let summary = inspect_scene(&doc, &Config::default());
        assert_eq!(summary.shapes, 2);
        assert_eq!(summary.meshes, 2);
        assert_eq!(summary.skipped, 0);
        assert!(summary.fitted);
        // 16 quads for the pocket, 121 * 4 for the circle, 121 * 4 for its end marker
        assert_eq!(summary.quads, 16 + 121 * 4 * 2);
        // two shapes plus the gizmo
        assert_eq!(summary.draw_calls, 3);

        let [min_x, _, _, max_y] = summary.bounds.unwrap();
        assert_eq!(min_x, -30.75);
        assert_eq!(max_y, 22.75);
    }

    #[test]
    fn test_inspect_empty_document() {
        let summary = inspect_scene(&SceneDocument::default(), &Config::default());
        assert_eq!(summary.meshes, 0);
        assert_eq!(summary.bounds, None);
        assert!(!summary.fitted);
        assert_eq!(summary.camera_scale, 1.0);
    }

    #[test]
    fn test_inspect_loaded_file_with_orphan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        // parent placement that never makes it into the document
        let ghost = PlacementNode::new(Placement::identity());
        let orphan = Shape::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ])
        .with_parent(ghost.id);
        SceneDocument::new(vec![], vec![orphan]).save(&path).unwrap();

        let doc = SceneDocument::load(&path).unwrap();
        let summary = inspect_scene(&doc, &Config::default());
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.meshes, 0);
    }
}
