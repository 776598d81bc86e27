//! Shared viewport helpers: scene bounds, orthographic frustum and the
//! pixel to eye-space mapping.

use contourview_settings::CameraSettings;
use glam::{DMat4, DVec2};

/// Running XY extent of every cap corner emitted for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        }
    }

    pub fn update(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn merge(&mut self, other: &Bounds) {
        if other.is_valid() {
            self.update(other.min_x, other.min_y);
            self.update(other.max_x, other.max_y);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// True once at least one point has been recorded.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Valid and spanning a non-zero area, so it can drive a fit.
    pub fn has_area(&self) -> bool {
        self.is_valid() && self.width() > 0.0 && self.height() > 0.0
    }
}

/// Orthographic projection volume.
///
/// `bottom` is normally greater than `top`: eye-space Y grows downwards
/// on screen, matching pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl From<&CameraSettings> for Frustum {
    fn from(settings: &CameraSettings) -> Self {
        Self {
            left: settings.frustum_left,
            right: settings.frustum_right,
            bottom: settings.frustum_bottom,
            top: settings.frustum_top,
            near: settings.frustum_near,
            far: settings.frustum_far,
        }
    }
}

impl Frustum {
    /// Widen the axis matching the longer window side by the aspect ratio
    /// so one eye unit covers the same number of pixels on both axes.
    pub fn corrected_for(&self, width: f64, height: f64) -> Frustum {
        if width <= 0.0 || height <= 0.0 {
            return *self;
        }

        if width >= height {
            let scale_x = width / height;
            Frustum {
                left: self.left * scale_x,
                right: self.right * scale_x,
                ..*self
            }
        } else {
            let scale_y = height / width;
            Frustum {
                bottom: self.bottom * scale_y,
                top: self.top * scale_y,
                ..*self
            }
        }
    }

    pub fn projection(&self) -> DMat4 {
        DMat4::orthographic_rh_gl(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// Pixel rectangle, origin at the bottom-left as GL expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Window size in pixels plus the derived square working area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn window_rect(&self) -> ViewportRect {
        ViewportRect {
            x: 0,
            y: 0,
            width: self.width as i32,
            height: self.height as i32,
        }
    }

    /// Pointer position relative to the window center, in units of the
    /// square side. This is the eye-space XY under the pointer.
    pub fn pixel_to_eye(&self, pos: DVec2) -> DVec2 {
        let min_side = self.min_side();
        DVec2::new(
            (pos.x - self.width / 2.0) / min_side,
            (pos.y - self.height / 2.0) / min_side,
        )
    }

    pub fn eye_to_pixel(&self, eye: DVec2) -> DVec2 {
        let min_side = self.min_side();
        DVec2::new(
            eye.x * min_side + self.width / 2.0,
            eye.y * min_side + self.height / 2.0,
        )
    }
}
