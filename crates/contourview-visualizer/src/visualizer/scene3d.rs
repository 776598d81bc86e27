//! # Compiled Scene
//!
//! A scene is the set of compiled shape meshes plus the bounds of all of
//! them. Scenes are built completely before they are shown; the canvas
//! swaps a finished scene in as one value, so a frame never sees a
//! partially compiled scene.

use contourview_core::Shape;
use contourview_settings::ToolpathSettings;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use uuid::Uuid;

use super::mesh_rendering::{RenderableMesh, ShapeStyle, ToolpathMesh};
use super::tessellation::{MeshBuildError, MeshBuilder};
use super::viewport::Bounds;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Index of a compiled mesh within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(usize);

impl MeshHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A compiled shape
#[derive(Debug, Clone)]
pub struct ShapeMesh {
    shape_id: Uuid,
    mesh: ToolpathMesh,
    renderable: RenderableMesh,
    pub style: ShapeStyle,
}

impl ShapeMesh {
    pub fn new(shape_id: Uuid, mesh: ToolpathMesh) -> Self {
        let renderable = RenderableMesh::from_toolpath(&mesh);
        Self {
            shape_id,
            mesh,
            renderable,
            style: ShapeStyle::default(),
        }
    }

    pub fn shape_id(&self) -> Uuid {
        self.shape_id
    }

    pub fn mesh(&self) -> &ToolpathMesh {
        &self.mesh
    }

    pub fn renderable(&self) -> &RenderableMesh {
        &self.renderable
    }
}

/// All compiled shapes of one scene plus their bounds
#[derive(Debug)]
pub struct CompiledScene {
    generation: u64,
    meshes: Vec<ShapeMesh>,
    bounds: Bounds,
}

impl Default for CompiledScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CompiledScene {
    /// Empty scene with a fresh generation number and reset bounds.
    pub fn new() -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            meshes: Vec::new(),
            bounds: Bounds::new(),
        }
    }

    /// Identifies this scene to GPU caches; never shared by two scenes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshHandle, &ShapeMesh)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| (MeshHandle(i), mesh))
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&ShapeMesh> {
        self.meshes.get(handle.0)
    }

    pub fn handle_for(&self, shape_id: Uuid) -> Option<MeshHandle> {
        self.meshes
            .iter()
            .position(|mesh| mesh.shape_id == shape_id)
            .map(MeshHandle)
    }

    /// Returns `false` for a handle from another scene.
    pub fn set_style(&mut self, handle: MeshHandle, style: ShapeStyle) -> bool {
        match self.meshes.get_mut(handle.0) {
            Some(mesh) => {
                mesh.style = style;
                true
            }
            None => false,
        }
    }

    pub fn quad_count(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.quad_count()).sum()
    }

    /// Compile `shape` into this scene.
    pub fn compile(
        &mut self,
        builder: &MeshBuilder,
        shape: &Shape,
    ) -> Result<MeshHandle, MeshBuildError> {
        let mesh = builder.build(shape, &mut self.bounds)?;
        self.meshes.push(ShapeMesh::new(shape.id, mesh));
        Ok(MeshHandle(self.meshes.len() - 1))
    }
}

/// A shape left out of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShape {
    pub shape_id: Uuid,
    pub error: MeshBuildError,
}

/// Outcome of compiling a batch of shapes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneBuildReport {
    pub compiled: usize,
    pub skipped: Vec<SkippedShape>,
}

impl SceneBuildReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Compiles a whole scene before it is handed to the canvas.
pub struct SceneBuilder {
    builder: MeshBuilder,
    scene: CompiledScene,
    report: SceneBuildReport,
}

impl SceneBuilder {
    pub fn new(settings: ToolpathSettings) -> Self {
        Self {
            builder: MeshBuilder::new(settings),
            scene: CompiledScene::new(),
            report: SceneBuildReport::default(),
        }
    }

    /// Compile one shape; failures are logged, recorded and skipped.
    pub fn add(&mut self, shape: &Shape) -> Option<MeshHandle> {
        match self.scene.compile(&self.builder, shape) {
            Ok(handle) => {
                self.report.compiled += 1;
                Some(handle)
            }
            Err(error) => {
                warn!("Skipping shape {}: {}", shape.id, error);
                self.report.skipped.push(SkippedShape {
                    shape_id: shape.id,
                    error,
                });
                None
            }
        }
    }

    pub fn extend<'a>(&mut self, shapes: impl IntoIterator<Item = &'a Shape>) {
        for shape in shapes {
            self.add(shape);
        }
    }

    pub fn finish(self) -> (CompiledScene, SceneBuildReport) {
        debug!(
            "Scene {} compiled: {} shapes, {} skipped, {} quads, bounds {:?}",
            self.scene.generation,
            self.report.compiled,
            self.report.skipped.len(),
            self.scene.quad_count(),
            self.scene.bounds
        );
        (self.scene, self.report)
    }

    /// Compile every shape in one go.
    pub fn build<'a>(
        settings: ToolpathSettings,
        shapes: impl IntoIterator<Item = &'a Shape>,
    ) -> (CompiledScene, SceneBuildReport) {
        let mut builder = Self::new(settings);
        builder.extend(shapes);
        builder.finish()
    }
}
