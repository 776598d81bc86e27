//! ContourView Settings Crate
//!
//! Handles viewer configuration: extrusion parameters, camera defaults,
//! colors and lighting, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    CameraSettings, ColorMode, ColorSettings, Config, EndMarkerPolicy, LightingSettings,
    ToolpathSettings, ViewerSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
