//! # ContourView Core
//!
//! Core types and utilities for ContourView.
//! Provides the absolute-coordinate geometry consumed by the visualizer,
//! the placement chain that resolves local contours into world space,
//! and the shared error types.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod placement;

pub use error::{Error, GeometryError, Result};

pub use geometry::{ArcSegment, GeometrySegment, LineSegment, Point, Shape};

pub use placement::{resolve_absolute, Placement, PlacementNode, PlacementTree};
