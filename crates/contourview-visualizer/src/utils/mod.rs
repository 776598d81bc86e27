//! Utility modules for ContourView visualizer

pub mod scene_file;

pub use scene_file::{ResolvedScene, SceneDocument, UnresolvedShape};
