//! # Toolpath Canvas
//!
//! Host-facing facade tying together scene compilation, the camera and
//! its controls, the orientation gizmo and frame planning. The host
//! forwards window events to the `on_*` handlers, redraws when they
//! return `true` (or [`ToolpathCanvas::is_dirty`] is set) and renders
//! [`ToolpathCanvas::frame`] with its backend.

use contourview_core::Shape;
use contourview_settings::Config;
use glam::DVec2;
use tracing::{debug, info, warn};

use super::camera::CameraState;
use super::controls::{CameraController, CursorHint, Key, PointerButton, PointerButtons};
use super::frame::{plan_frame, FramePlan};
use super::gizmo::OrientationGizmo;
use super::mesh_rendering::{RenderableMesh, ShapeStyle};
use super::scene3d::{CompiledScene, MeshHandle, SceneBuildReport, SceneBuilder};
use super::tessellation::{MeshBuildError, MeshBuilder};
use super::viewport::Bounds;

/// Interactive toolpath view
pub struct ToolpathCanvas {
    config: Config,
    builder: MeshBuilder,
    scene: CompiledScene,
    camera: CameraState,
    controller: CameraController,
    gizmo: Option<RenderableMesh>,
    dirty: bool,
}

impl Default for ToolpathCanvas {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ToolpathCanvas {
    pub fn new(config: Config) -> Self {
        let mut camera = CameraState::new(&config.camera);
        camera.resize(
            f64::from(config.viewer.window_width),
            f64::from(config.viewer.window_height),
        );

        Self {
            builder: MeshBuilder::new(config.toolpath.clone()),
            scene: CompiledScene::new(),
            camera,
            controller: CameraController::new(),
            gizmo: None,
            dirty: true,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraState {
        self.dirty = true;
        &mut self.camera
    }

    pub fn scene(&self) -> &CompiledScene {
        &self.scene
    }

    pub fn bounds(&self) -> &Bounds {
        self.scene.bounds()
    }

    pub fn gizmo(&self) -> Option<&RenderableMesh> {
        self.gizmo.as_ref()
    }

    /// Compile `shape` and append it to the current scene.
    ///
    /// A shape that fails to compile is logged and left out; the scene
    /// and its bounds are unchanged.
    pub fn add_shape(&mut self, shape: &Shape) -> Result<MeshHandle, MeshBuildError> {
        match self.scene.compile(&self.builder, shape) {
            Ok(handle) => {
                self.dirty = true;
                Ok(handle)
            }
            Err(e) => {
                warn!("Skipping shape {}: {}", shape.id, e);
                Err(e)
            }
        }
    }

    /// Compile a whole new scene, then swap it in.
    pub fn load_scene<'a>(
        &mut self,
        shapes: impl IntoIterator<Item = &'a Shape>,
    ) -> SceneBuildReport {
        let (scene, report) = SceneBuilder::build(self.config.toolpath.clone(), shapes);
        self.replace_scene(scene);
        report
    }

    /// Show `scene` in place of the current one.
    pub fn replace_scene(&mut self, scene: CompiledScene) {
        info!(
            "Showing scene {} with {} shapes",
            scene.generation(),
            scene.len()
        );
        self.scene = scene;
        self.dirty = true;
    }

    pub fn clear(&mut self) {
        self.replace_scene(CompiledScene::new());
    }

    /// Fit the camera to the scene bounds; `false` when there is
    /// nothing with an area to fit.
    pub fn auto_scale(&mut self) -> bool {
        let fitted = self.camera.auto_scale(self.scene.bounds());
        self.dirty |= fitted;
        fitted
    }

    pub fn build_orientation_gizmo(&mut self) -> &RenderableMesh {
        let gizmo = OrientationGizmo::build(&self.config.colors);
        debug!("Built orientation gizmo: {} triangles", gizmo.triangle_count());
        self.dirty = true;
        self.gizmo.insert(gizmo)
    }

    pub fn set_style(&mut self, handle: MeshHandle, style: ShapeStyle) -> bool {
        let changed = self.scene.set_style(handle, style);
        self.dirty |= changed;
        changed
    }

    pub fn on_key_down(&mut self, key: Key) -> bool {
        self.track(|ctl, _| ctl.key_down(key))
    }

    pub fn on_key_up(&mut self, key: Key) -> bool {
        self.track(|ctl, _| ctl.key_up(key))
    }

    pub fn on_pointer_down(&mut self, pos: DVec2, button: PointerButton) -> bool {
        self.track(|ctl, _| ctl.pointer_down(pos, button))
    }

    pub fn on_pointer_up(&mut self, pos: DVec2, button: PointerButton) -> bool {
        self.track(|ctl, _| ctl.pointer_up(pos, button))
    }

    pub fn on_pointer_move(&mut self, pos: DVec2, buttons: PointerButtons) -> bool {
        self.track(|ctl, camera| ctl.pointer_move(camera, pos, buttons))
    }

    pub fn on_wheel(&mut self, pos: DVec2, delta: f64) -> bool {
        self.track(|ctl, camera| ctl.wheel(camera, pos, delta))
    }

    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        self.track(|ctl, camera| ctl.resize(camera, width, height))
    }

    pub fn cursor(&self) -> CursorHint {
        self.controller.cursor()
    }

    pub fn frame(&self) -> FramePlan {
        plan_frame(
            &self.camera,
            &self.scene,
            &self.config.colors,
            &self.config.lighting,
            self.gizmo.is_some(),
        )
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn track(&mut self, f: impl FnOnce(&mut CameraController, &mut CameraState) -> bool) -> bool {
        let changed = f(&mut self.controller, &mut self.camera);
        self.dirty |= changed;
        changed
    }
}
