//! # Frame Planning
//!
//! Resolves camera, scene and colors into an ordered list of draw calls
//! that a backend can execute without knowing about either. Matrices are
//! composed in f64 and narrowed to f32 only here, at the GPU boundary.

use contourview_settings::{ColorMode, ColorSettings, LightingSettings};
use glam::{DMat4, DVec3, DVec4, Mat4};

use super::camera::CameraState;
use super::mesh_rendering::MeshMaterial;
use super::scene3d::{CompiledScene, MeshHandle};
use super::viewport::ViewportRect;

/// Mirror of world Y: meshes are Y-up, eye space is Y-down.
pub const WORLD_FLIP_Y: DMat4 = DMat4::from_cols(DVec4::X, DVec4::NEG_Y, DVec4::Z, DVec4::W);

/// Transform accumulator with fixed-pipeline semantics: each operation
/// post-multiplies, so the last one issued acts on geometry first.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: DMat4,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            current: DMat4::IDENTITY,
        }
    }

    pub fn current(&self) -> DMat4 {
        self.current
    }

    pub fn multiply(&mut self, m: &DMat4) {
        self.current *= *m;
    }

    pub fn translate(&mut self, offset: DVec3) {
        self.multiply(&DMat4::from_translation(offset));
    }

    pub fn scale(&mut self, factors: DVec3) {
        self.multiply(&DMat4::from_scale(factors));
    }

    /// Rotate by `degrees` about `axis`, which must be non-zero.
    pub fn rotate_degrees(&mut self, degrees: f64, axis: DVec3) {
        self.multiply(&DMat4::from_axis_angle(
            axis.normalize(),
            degrees.to_radians(),
        ));
    }
}

/// What a draw call renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawTarget {
    Shape(MeshHandle),
    Gizmo,
}

/// One mesh draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub target: DrawTarget,
    pub model_view: Mat4,
    /// Flat material; `None` keeps per-vertex colors
    pub material: Option<MeshMaterial>,
}

/// Everything needed to render one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: [f32; 4],
    pub viewport: ViewportRect,
    pub projection: Mat4,
    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    pub ambient_color: [f32; 3],
    pub draw_calls: Vec<DrawCall>,
}

/// Plan a frame: all shapes with the scene transform, then the gizmo at
/// constant screen size.
pub fn plan_frame(
    camera: &CameraState,
    scene: &CompiledScene,
    colors: &ColorSettings,
    lighting: &LightingSettings,
    with_gizmo: bool,
) -> FramePlan {
    let shape_model_view = camera.shape_model_view().as_mat4();

    let mut draw_calls: Vec<DrawCall> = scene
        .meshes()
        .map(|(handle, mesh)| {
            let color = match colors.color_mode {
                ColorMode::Uniform => colors.select,
                ColorMode::BySelection => {
                    colors.shape_color(mesh.style.selected, mesh.style.disabled)
                }
            };
            DrawCall {
                target: DrawTarget::Shape(handle),
                model_view: shape_model_view,
                material: Some(MeshMaterial::solid(color)),
            }
        })
        .collect();

    if with_gizmo {
        draw_calls.push(DrawCall {
            target: DrawTarget::Gizmo,
            model_view: camera.gizmo_model_view().as_mat4(),
            material: None,
        });
    }

    FramePlan {
        clear_color: colors.background,
        viewport: camera.viewport_rect(),
        projection: camera.projection().as_mat4(),
        light_position: lighting.light_position,
        light_color: lighting.light_color,
        ambient_color: lighting.ambient_color,
        draw_calls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::mesh_rendering::ShapeStyle;
    use crate::visualizer::scene3d::SceneBuilder;
    use contourview_core::{Point, Shape};
    use contourview_settings::ToolpathSettings;

    #[test]
    fn test_stack_post_multiplies() {
        let mut stack = MatrixStack::new();
        stack.translate(DVec3::new(1.0, 0.0, 0.0));
        stack.scale(DVec3::splat(2.0));

        // scale acts first, then translation
        let p = stack.current().transform_point3(DVec3::new(1.0, 1.0, 0.0));
        assert_eq!(p, DVec3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotation_degrees() {
        let mut stack = MatrixStack::new();
        stack.rotate_degrees(90.0, DVec3::Z);
        let p = stack.current().transform_point3(DVec3::X);
        assert!((p - DVec3::Y).length() < 1e-12);
    }

    fn scene_with_two_shapes() -> CompiledScene {
        let a = Shape::polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]);
        let b = Shape::polygon(&[Point::new(5.0, 5.0), Point::new(6.0, 5.0), Point::new(5.0, 6.0)]);
        SceneBuilder::build(ToolpathSettings::default(), [&a, &b]).0
    }

    #[test]
    fn test_uniform_color_mode_ignores_style() {
        let mut scene = scene_with_two_shapes();
        let (first, _) = scene.meshes().next().unwrap();
        scene.set_style(first, ShapeStyle::default());

        let colors = ColorSettings::default();
        let plan = plan_frame(
            &CameraState::default(),
            &scene,
            &colors,
            &LightingSettings::default(),
            true,
        );

        assert_eq!(plan.draw_calls.len(), 3);
        assert!(plan.draw_calls[..2]
            .iter()
            .all(|call| call.material == Some(MeshMaterial::solid(colors.select))));
        assert_eq!(plan.draw_calls[2].target, DrawTarget::Gizmo);
        assert_eq!(plan.draw_calls[2].material, None);
        assert_eq!(plan.clear_color, colors.background);
    }

    #[test]
    fn test_by_selection_color_mode() {
        let mut scene = scene_with_two_shapes();
        let handles: Vec<_> = scene.meshes().map(|(h, _)| h).collect();
        scene.set_style(
            handles[1],
            ShapeStyle {
                selected: false,
                disabled: true,
            },
        );

        let colors = ColorSettings {
            color_mode: ColorMode::BySelection,
            ..ColorSettings::default()
        };
        let plan = plan_frame(
            &CameraState::default(),
            &scene,
            &colors,
            &LightingSettings::default(),
            false,
        );

        assert_eq!(plan.draw_calls.len(), 2);
        assert_eq!(plan.draw_calls[0].material.map(|m| m.diffuse_color), Some(colors.normal));
        assert_eq!(
            plan.draw_calls[1].material.map(|m| m.alpha()),
            Some(colors.normal_disabled[3])
        );
    }
}
