//! # ContourView Visualizer
//!
//! Extruded ribbon rendering of machining contours.
//! Includes tessellation, the orthographic camera and its controls,
//! compiled scenes, and the OpenGL renderer.

pub mod utils;
pub mod visualizer;

pub use visualizer::{
    arc_segment_count, normalize_angle, plan_frame, Bounds, CameraController, CameraState,
    CompiledScene, CursorHint, DrawCall, DrawTarget, FramePlan, Frustum, InputMode, Key,
    MatrixStack, MeshBuildError, MeshBuilder, MeshHandle, MeshMaterial, MeshRenderError,
    MeshRenderer, OrientationGizmo, PointerButton, PointerButtons, Quad, RenderableMesh,
    SceneBuildReport, SceneBuilder, ShapeMesh, ShapeStyle, SkippedShape, ToolpathCanvas,
    ToolpathMesh, Viewport, ViewportRect, MAX_ARC_SEGMENTS, WORLD_FLIP_Y,
};

pub use utils::{ResolvedScene, SceneDocument, UnresolvedShape};
