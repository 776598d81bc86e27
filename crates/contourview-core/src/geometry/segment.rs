use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::GeometryError;

/// Straight cut from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Circular arc around `center`.
///
/// `start_angle` and `extent` are in radians; a positive extent runs
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub extent: f64,
}

impl ArcSegment {
    pub fn new(center: Point, radius: f64, start_angle: f64, extent: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            extent,
        }
    }

    /// Full circle starting at angle 0, counter-clockwise.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, 0.0, std::f64::consts::TAU)
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.extent
    }

    pub fn start_point(&self) -> Point {
        self.center.arc_point(self.start_angle, self.radius)
    }

    pub fn end_point(&self) -> Point {
        self.center.arc_point(self.end_angle(), self.radius)
    }

    pub fn extent_degrees(&self) -> f64 {
        self.extent.to_degrees()
    }

    pub fn is_ccw(&self) -> bool {
        self.extent > 0.0
    }
}

/// One element of a contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometrySegment {
    Line(LineSegment),
    Arc(ArcSegment),
}

impl GeometrySegment {
    pub fn line(start: Point, end: Point) -> Self {
        GeometrySegment::Line(LineSegment::new(start, end))
    }

    pub fn arc(center: Point, radius: f64, start_angle: f64, extent: f64) -> Self {
        GeometrySegment::Arc(ArcSegment::new(center, radius, start_angle, extent))
    }

    pub fn start_point(&self) -> Point {
        match self {
            GeometrySegment::Line(line) => line.start,
            GeometrySegment::Arc(arc) => arc.start_point(),
        }
    }

    pub fn end_point(&self) -> Point {
        match self {
            GeometrySegment::Line(line) => line.end,
            GeometrySegment::Arc(arc) => arc.end_point(),
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, GeometrySegment::Arc(_))
    }

    /// Reject NaN or infinite coordinates before tessellation.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            GeometrySegment::Line(line) => {
                if !line.start.is_finite() || !line.end.is_finite() {
                    return Err(GeometryError::NonFinite {
                        what: format!("line {:?} -> {:?}", line.start, line.end),
                    });
                }
            }
            GeometrySegment::Arc(arc) => {
                if !arc.center.is_finite()
                    || !arc.radius.is_finite()
                    || !arc.start_angle.is_finite()
                    || !arc.extent.is_finite()
                {
                    return Err(GeometryError::NonFinite {
                        what: format!(
                            "arc at {:?} r={} start={} ext={}",
                            arc.center, arc.radius, arc.start_angle, arc.extent
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
