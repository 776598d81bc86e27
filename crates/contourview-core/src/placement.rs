//! Placement resolution
//!
//! Contours are authored in the local frame of a block insert; each insert
//! carries an offset, a base point, a non-uniform scale and a rotation.
//! Nested inserts form a tree. [`resolve_absolute`] pushes a segment
//! through an ordered chain of placements to obtain world coordinates.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::error::GeometryError;
use crate::geometry::{ArcSegment, GeometrySegment, LineSegment, Point, Shape};

fn unit_scale() -> f64 {
    1.0
}

/// Frame of one insert relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Where the base point lands in the parent frame
    #[serde(default)]
    pub offset: Point,
    /// Local point that is anchored at `offset`
    #[serde(default)]
    pub base: Point,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
    /// Rotation in radians, counter-clockwise
    #[serde(default)]
    pub rotation: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            offset: Point::ORIGIN,
            base: Point::ORIGIN,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            offset: Point::new(dx, dy),
            ..Self::identity()
        }
    }

    pub fn rotation(angle: f64) -> Self {
        Self {
            rotation: angle,
            ..Self::identity()
        }
    }

    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..Self::identity()
        }
    }

    /// A negative determinant reverses the travel direction of arcs.
    pub fn is_mirrored(&self) -> bool {
        self.scale_x * self.scale_y < 0.0
    }

    /// Scale then rotate a vector; no translation.
    fn apply_vector(&self, v: Point) -> Point {
        let sx = v.x * self.scale_x;
        let sy = v.y * self.scale_y;
        let (sin, cos) = self.rotation.sin_cos();
        Point::with_z(sx * cos - sy * sin, sx * sin + sy * cos, v.z)
    }

    /// `offset + R * S * (p - base)`
    pub fn apply_point(&self, p: Point) -> Point {
        let local = p - self.base;
        let mapped = self.apply_vector(local);
        Point::with_z(
            mapped.x + self.offset.x,
            mapped.y + self.offset.y,
            p.z + self.offset.z,
        )
    }

    /// Map a segment into the parent frame.
    ///
    /// Non-uniform scale would turn an arc into an ellipse; the result
    /// keeps the radius measured along the start direction.
    pub fn apply_segment(&self, segment: &GeometrySegment) -> GeometrySegment {
        match segment {
            GeometrySegment::Line(line) => GeometrySegment::Line(LineSegment::new(
                self.apply_point(line.start),
                self.apply_point(line.end),
            )),
            GeometrySegment::Arc(arc) => {
                let (sin, cos) = arc.start_angle.sin_cos();
                let dir = self.apply_vector(Point::new(cos, sin));
                let extent = if self.is_mirrored() {
                    -arc.extent
                } else {
                    arc.extent
                };
                GeometrySegment::Arc(ArcSegment::new(
                    self.apply_point(arc.center),
                    arc.radius * dir.length(),
                    dir.y.atan2(dir.x),
                    extent,
                ))
            }
        }
    }
}

/// Transform `segment` through `chain`, ordered root to leaf.
///
/// The leaf placement is the frame the segment is authored in, so it is
/// applied first and the root last.
pub fn resolve_absolute(segment: &GeometrySegment, chain: &[Placement]) -> GeometrySegment {
    chain
        .iter()
        .rev()
        .fold(*segment, |seg, placement| placement.apply_segment(&seg))
}

/// Placement with its link to the enclosing insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementNode {
    pub id: Uuid,
    #[serde(default)]
    pub parent: Option<Uuid>,
    #[serde(flatten)]
    pub placement: Placement,
}

impl PlacementNode {
    pub fn new(placement: Placement) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent: None,
            placement,
        }
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Lookup table of placements keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PlacementTree {
    nodes: HashMap<Uuid, PlacementNode>,
}

impl PlacementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: PlacementNode) -> Uuid {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&PlacementNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Placements from the root down to `leaf`, inclusive.
    pub fn chain(&self, leaf: Uuid) -> Result<Vec<Placement>, GeometryError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(leaf);

        while let Some(id) = current {
            if !seen.insert(id) {
                return Err(GeometryError::PlacementCycle { id });
            }
            let node = self
                .nodes
                .get(&id)
                .ok_or(GeometryError::UnknownPlacement { id })?;
            chain.push(node.placement);
            current = node.parent;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Absolute-coordinate copy of `shape`. The input is left untouched.
    pub fn resolve_shape(&self, shape: &Shape) -> Result<Shape, GeometryError> {
        let Some(parent) = shape.parent else {
            return Ok(shape.clone());
        };

        let chain = self.chain(parent)?;
        trace!(
            "Resolving shape {} through {} placements",
            shape.id,
            chain.len()
        );

        let segments = shape
            .segments
            .iter()
            .map(|seg| resolve_absolute(seg, &chain))
            .collect();

        Ok(Shape {
            id: shape.id,
            segments,
            closed: shape.closed,
            parent: shape.parent,
        })
    }
}
