//! Absolute-coordinate contour geometry.
//!
//! Lines and arcs arrive here already placed in world space; nothing in
//! this module knows about the placement tree.

mod point;
mod segment;
mod shape;

pub use point::Point;
pub use segment::{ArcSegment, GeometrySegment, LineSegment};
pub use shape::Shape;
