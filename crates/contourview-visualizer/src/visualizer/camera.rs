//! # Orthographic Camera
//!
//! Camera state for the toolpath view: translation, per-axis rotation in
//! 1/16 degree units, uniform scale and an aspect-corrected orthographic
//! frustum.
//!
//! Eye space is laid out so that one unit equals the shorter window side
//! in pixels and eye Y grows downwards, like pointer coordinates. This
//! keeps pointer math (pan, cursor-anchored zoom) free of projection
//! terms.

use contourview_core::constants::{ANGLE_UNITS_PER_DEGREE, ANGLE_UNITS_PER_TURN};
use contourview_settings::CameraSettings;
use glam::{DMat4, DVec2, DVec3};
use tracing::{debug, trace, warn};

use super::frame::{MatrixStack, WORLD_FLIP_Y};
use super::viewport::{Bounds, Frustum, Viewport, ViewportRect};

/// Fold a rotation accumulator into `[0, 5760)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(ANGLE_UNITS_PER_TURN);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if folded >= ANGLE_UNITS_PER_TURN {
        0.0
    } else {
        folded
    }
}

/// Position, orientation, zoom and projection of the view.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Eye-space translation applied after scale and rotation
    pub position: DVec3,
    rot_x: f64,
    rot_y: f64,
    rot_z: f64,
    /// Uniform world to eye scale
    pub scale: f64,
    base_frustum: Frustum,
    frustum: Frustum,
    viewport: Viewport,
    rotate_factor: f64,
    zoom_base: f64,
    fit_margin: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl CameraState {
    pub fn new(settings: &CameraSettings) -> Self {
        let base_frustum = Frustum::from(settings);
        Self {
            position: DVec3::new(0.0, 0.0, settings.position_z),
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            scale: 1.0,
            base_frustum,
            frustum: base_frustum,
            viewport: Viewport::new(1.0, 1.0),
            rotate_factor: settings.rotate_factor,
            zoom_base: settings.zoom_base,
            fit_margin: settings.fit_margin,
        }
    }

    pub fn rotation_x(&self) -> f64 {
        self.rot_x
    }

    pub fn rotation_y(&self) -> f64 {
        self.rot_y
    }

    pub fn rotation_z(&self) -> f64 {
        self.rot_z
    }

    pub fn set_rotation_x(&mut self, angle: f64) {
        self.rot_x = normalize_angle(angle);
    }

    pub fn set_rotation_y(&mut self, angle: f64) {
        self.rot_y = normalize_angle(angle);
    }

    pub fn set_rotation_z(&mut self, angle: f64) {
        self.rot_z = normalize_angle(angle);
    }

    /// Unscaled frustum the camera was configured with.
    pub fn base_frustum(&self) -> &Frustum {
        &self.base_frustum
    }

    /// Frustum corrected for the current window aspect.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Orbit by a pointer delta (`dy` already points up). Pitch follows
    /// `dy`; `dx` drives roll when `roll` is set, yaw otherwise.
    pub fn rotate(&mut self, dx: f64, dy: f64, roll: bool) {
        self.set_rotation_x(self.rot_x + self.rotate_factor * dy);
        if roll {
            self.set_rotation_z(self.rot_z + self.rotate_factor * dx);
        } else {
            self.set_rotation_y(self.rot_y + self.rotate_factor * dx);
        }
        trace!(
            "Camera rotation: x={} y={} z={}",
            self.rot_x,
            self.rot_y,
            self.rot_z
        );
    }

    /// Translate by a pointer delta in pixels (`dy` already points up).
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let min_side = self.viewport.min_side();
        self.position.x += dx / min_side;
        self.position.y -= dy / min_side;
        trace!("Camera position: {:?}", self.position);
    }

    /// Zoom by `wheel_delta` steps keeping the point under `pixel` fixed.
    pub fn zoom_at(&mut self, pixel: DVec2, wheel_delta: f64) {
        let focal = self.viewport.pixel_to_eye(pixel);
        let s = self.zoom_base.powf(wheel_delta);

        self.position.x = (self.position.x - focal.x) * s + focal.x;
        self.position.y = (self.position.y - focal.y) * s + focal.y;
        self.scale *= s;
        trace!("Camera zoom: scale={} at {:?}", self.scale, focal);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.frustum = self
            .base_frustum
            .corrected_for(self.viewport.width(), self.viewport.height());
        debug!(
            "Camera resized to {}x{}, frustum {:?}",
            self.viewport.width(),
            self.viewport.height(),
            self.frustum
        );
    }

    /// Fit `bounds` into the base frustum with the configured margin.
    ///
    /// Returns `false` and leaves the camera untouched when the bounds
    /// span no area.
    pub fn auto_scale(&mut self, bounds: &Bounds) -> bool {
        if !bounds.has_area() {
            warn!("Refusing to fit degenerate scene bounds {:?}", bounds);
            return false;
        }

        let f = &self.base_frustum;
        let margin = self.fit_margin;
        let scale_x = (f.right - f.left) / bounds.width();
        let scale_y = (f.bottom - f.top) / bounds.height();

        self.scale = scale_x.min(scale_y) * margin;
        self.position.x = f.left * margin - bounds.min_x * self.scale;
        self.position.y = -f.top * margin + bounds.min_y * self.scale;

        debug!(
            "Auto-scaled to {} at ({}, {})",
            self.scale, self.position.x, self.position.y
        );
        true
    }

    /// Translate, then scale, then rotate about X, Y and Z. Geometry sees
    /// these in reverse: rotations first, translation last.
    pub fn scene_transform(&self) -> DMat4 {
        let mut stack = MatrixStack::new();
        stack.translate(self.position);
        stack.scale(DVec3::splat(self.scale));
        stack.rotate_degrees(self.rot_x / ANGLE_UNITS_PER_DEGREE, DVec3::X);
        stack.rotate_degrees(self.rot_y / ANGLE_UNITS_PER_DEGREE, DVec3::Y);
        stack.rotate_degrees(self.rot_z / ANGLE_UNITS_PER_DEGREE, DVec3::Z);
        stack.current()
    }

    /// Model-view for world-space (Y up) shape meshes.
    pub fn shape_model_view(&self) -> DMat4 {
        self.scene_transform() * WORLD_FLIP_Y
    }

    /// Model-view for the gizmo: scene rotation without scene zoom.
    pub fn gizmo_model_view(&self) -> DMat4 {
        let mut stack = MatrixStack::new();
        stack.multiply(&self.scene_transform());
        stack.scale(DVec3::splat(1.0 / self.scale));
        stack.multiply(&WORLD_FLIP_Y);
        stack.current()
    }

    pub fn projection(&self) -> DMat4 {
        self.frustum.projection()
    }

    /// GL viewport covering the window.
    pub fn viewport_rect(&self) -> ViewportRect {
        self.viewport.window_rect()
    }

    /// Eye-space position of a world point.
    pub fn world_to_eye(&self, world: DVec3) -> DVec3 {
        self.shape_model_view().transform_point3(world)
    }

    /// Window pixel a world point lands on.
    pub fn world_to_pixel(&self, world: DVec3) -> DVec2 {
        self.viewport.eye_to_pixel(self.world_to_eye(world).truncate())
    }
}
