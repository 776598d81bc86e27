use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeometrySegment, Point};

/// One tool contour: an ordered run of lines and arcs.
///
/// `parent` names the placement the segments are local to. It is only
/// read by the placement resolver; the visualizer expects shapes that
/// have already been resolved to absolute coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub segments: Vec<GeometrySegment>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub parent: Option<Uuid>,
}

impl Shape {
    pub fn new(segments: Vec<GeometrySegment>, closed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            segments,
            closed,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// First point of the first segment, where an open path begins.
    pub fn start_point(&self) -> Option<Point> {
        self.segments.first().map(GeometrySegment::start_point)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.segments.last().map(GeometrySegment::end_point)
    }

    /// Closed polyline through `points`, returning to the first one.
    pub fn polygon(points: &[Point]) -> Self {
        let segments = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| GeometrySegment::line(*a, *b))
            .collect();
        Self::new(segments, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_closes() {
        let shape = Shape::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
        ]);
        assert!(shape.closed);
        assert_eq!(shape.len(), 3);
        assert_eq!(shape.end_point(), shape.start_point());
    }

    #[test]
    fn test_empty_shape() {
        let shape = Shape::new(Vec::new(), false);
        assert!(shape.is_empty());
        assert_eq!(shape.start_point(), None);
    }
}
