//! Toolpath visualization module
//!
//! This module provides:
//! - Ribbon tessellation of line/arc contours (tessellation)
//! - Mesh data and GPU-ready buffers (mesh_rendering)
//! - Orthographic camera and pointer/keyboard controls (camera, controls)
//! - Compiled scenes and frame planning (scene3d, frame)
//! - OpenGL backend (mesh_renderer, mesh_shaders)
//! - The host-facing canvas (canvas)

pub mod camera;
pub mod canvas;
pub mod controls;
pub mod frame;
pub mod gizmo;
pub mod mesh_renderer;
pub mod mesh_rendering;
pub mod mesh_shaders;
pub mod scene3d;
pub mod tessellation;
pub mod viewport;

pub use camera::{normalize_angle, CameraState};
pub use canvas::ToolpathCanvas;
pub use controls::{CameraController, CursorHint, InputMode, Key, PointerButton, PointerButtons};
pub use frame::{plan_frame, DrawCall, DrawTarget, FramePlan, MatrixStack, WORLD_FLIP_Y};
pub use gizmo::OrientationGizmo;
pub use mesh_renderer::{MeshRenderError, MeshRenderer};
pub use mesh_rendering::{MeshMaterial, Quad, RenderableMesh, ShapeStyle, ToolpathMesh};
pub use scene3d::{
    CompiledScene, MeshHandle, SceneBuildReport, SceneBuilder, ShapeMesh, SkippedShape,
};
pub use tessellation::{arc_segment_count, MeshBuildError, MeshBuilder, MAX_ARC_SEGMENTS};
pub use viewport::{Bounds, Frustum, Viewport, ViewportRect};
