//! Configuration and settings management for ContourView
//!
//! Configuration is organized into logical sections:
//! - Toolpath extrusion (tool width, depth range, arc tolerance, markers)
//! - Camera defaults (frustum, zoom and rotate rates, fit margin)
//! - Colors and lighting
//! - Viewer window defaults
//!
//! Files are JSON or TOML, chosen by extension, and are validated on
//! both load and save.

use contourview_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Where disk markers are emitted after segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndMarkerPolicy {
    /// Marker at the end point of every segment
    EverySegment,
    /// Marker only after arcs
    ArcsOnly,
    /// No end markers
    Off,
}

impl Default for EndMarkerPolicy {
    fn default() -> Self {
        Self::ArcsOnly
    }
}

/// How shape colors are chosen at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every shape is drawn with the select color
    Uniform,
    /// Normal/select/disabled colors follow each shape's style
    BySelection,
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::Uniform
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::BySelection => write!(f, "by-selection"),
        }
    }
}

/// Toolpath extrusion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathSettings {
    /// Full cutter width; the ribbon extends half of it on each side
    pub tool_width: f64,
    /// Top of the extruded ribbon
    pub z_top: f64,
    /// Bottom of the extruded ribbon
    pub z_bottom: f64,
    /// Largest angle of a single arc sub-segment (degrees)
    pub arc_tolerance_deg: f64,
    /// Draw a disk at the first point of open paths
    pub mark_open_path_start: bool,
    /// Disk markers after segments
    pub end_markers: EndMarkerPolicy,
}

impl Default for ToolpathSettings {
    fn default() -> Self {
        Self {
            tool_width: constants::DEFAULT_TOOL_WIDTH,
            z_top: constants::DEFAULT_Z_TOP,
            z_bottom: constants::DEFAULT_Z_BOTTOM,
            arc_tolerance_deg: constants::ARC_TOLERANCE_DEG,
            mark_open_path_start: true,
            end_markers: EndMarkerPolicy::default(),
        }
    }
}

impl ToolpathSettings {
    /// Perpendicular offset from the contour to either ribbon edge.
    pub fn half_width(&self) -> f64 {
        self.tool_width / 2.0
    }
}

/// Camera defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub frustum_left: f64,
    pub frustum_right: f64,
    /// Bottom is greater than top: eye-space Y grows downwards on screen
    pub frustum_bottom: f64,
    pub frustum_top: f64,
    pub frustum_near: f64,
    pub frustum_far: f64,
    /// Initial camera Z offset
    pub position_z: f64,
    /// Rotation units (1/16 degree) per dragged pixel
    pub rotate_factor: f64,
    /// Wheel zoom base
    pub zoom_base: f64,
    /// Fraction of the frustum used when fitting the scene
    pub fit_margin: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            frustum_left: -0.5,
            frustum_right: 0.5,
            frustum_bottom: 0.5,
            frustum_top: -0.5,
            frustum_near: 4.0,
            frustum_far: 14.0,
            position_z: constants::DEFAULT_POSITION_Z,
            rotate_factor: constants::ROTATE_FACTOR,
            zoom_base: constants::ZOOM_BASE,
            fit_margin: constants::FIT_MARGIN,
        }
    }
}

/// RGBA colors, components in 0..=1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub background: [f32; 4],
    pub normal: [f32; 4],
    pub select: [f32; 4],
    pub normal_disabled: [f32; 4],
    pub select_disabled: [f32; 4],
    pub gizmo_x: [f32; 4],
    pub gizmo_y: [f32; 4],
    pub gizmo_z: [f32; 4],
    pub color_mode: ColorMode,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: [1.0, 1.0, 1.0, 1.0],
            normal: [0.6, 1.0, 0.0, 1.0],
            select: [1.0, 0.0, 0.1, 1.0],
            normal_disabled: [0.6, 1.0, 0.0, 0.3],
            select_disabled: [1.0, 0.0, 0.1, 0.3],
            gizmo_x: [1.0, 0.0, 0.0, 0.5],
            gizmo_y: [0.0, 1.0, 0.0, 0.5],
            gizmo_z: [0.0, 0.0, 1.0, 0.5],
            color_mode: ColorMode::default(),
        }
    }
}

impl ColorSettings {
    /// Color for a shape in the given state.
    pub fn shape_color(&self, selected: bool, disabled: bool) -> [f32; 4] {
        match (selected, disabled) {
            (true, false) => self.select,
            (true, true) => self.select_disabled,
            (false, false) => self.normal,
            (false, true) => self.normal_disabled,
        }
    }
}

/// Lighting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    /// Point light position in eye space
    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    pub ambient_color: [f32; 3],
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            light_position: [0.5, 5.0, 7.0],
            light_color: [1.0, 1.0, 1.0],
            ambient_color: [0.2, 0.2, 0.2],
        }
    }
}

/// Viewer window defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub toolpath: ToolpathSettings,
    pub camera: CameraSettings,
    pub colors: ColorSettings,
    pub lighting: LightingSettings,
    pub viewer: ViewerSettings,
}

enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/contourview/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("contourview").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let tp = &self.toolpath;
        if !(tp.tool_width.is_finite() && tp.tool_width > 0.0) {
            return Err(ConfigError::out_of_range("toolpath.tool_width", tp.tool_width));
        }
        if !(tp.z_top.is_finite() && tp.z_bottom.is_finite()) || tp.z_top <= tp.z_bottom {
            return Err(ConfigError::Inconsistent(format!(
                "toolpath.z_top ({}) must be above toolpath.z_bottom ({})",
                tp.z_top, tp.z_bottom
            )));
        }
        if !(tp.arc_tolerance_deg.is_finite() && tp.arc_tolerance_deg > 0.0) {
            return Err(ConfigError::out_of_range(
                "toolpath.arc_tolerance_deg",
                tp.arc_tolerance_deg,
            ));
        }

        let cam = &self.camera;
        if cam.frustum_right == cam.frustum_left || cam.frustum_bottom == cam.frustum_top {
            return Err(ConfigError::Inconsistent(
                "camera frustum has zero width or height".to_string(),
            ));
        }
        if cam.frustum_near >= cam.frustum_far {
            return Err(ConfigError::Inconsistent(format!(
                "camera.frustum_near ({}) must be below camera.frustum_far ({})",
                cam.frustum_near, cam.frustum_far
            )));
        }
        if !(cam.zoom_base.is_finite() && cam.zoom_base > 0.0) {
            return Err(ConfigError::out_of_range("camera.zoom_base", cam.zoom_base));
        }
        if !(cam.fit_margin > 0.0 && cam.fit_margin <= 1.0) {
            return Err(ConfigError::out_of_range("camera.fit_margin", cam.fit_margin));
        }

        if self.viewer.window_width == 0 || self.viewer.window_height == 0 {
            return Err(ConfigError::Inconsistent(
                "viewer window dimensions must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
