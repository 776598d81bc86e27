//! # Toolpath Tessellation
//!
//! Turns a shape's absolute line/arc segments into an extruded ribbon:
//! a top cap, a bottom cap and two side walls per line or arc
//! sub-segment. The ribbon is `tool_width` wide, centered on the
//! contour, and spans `z_bottom..z_top`.
//!
//! Meshes are produced in world coordinates (Y up). The renderer mirrors
//! Y when drawing, and the winding below is chosen so that caps and
//! walls face outwards after that mirror and the orthographic
//! projection.

use contourview_core::{ArcSegment, GeometryError, GeometrySegment, LineSegment, Point, Shape};
use contourview_settings::{EndMarkerPolicy, ToolpathSettings};
use glam::Vec3;
use thiserror::Error;
use tracing::{debug, trace};

use super::mesh_rendering::{Quad, ToolpathMesh};
use super::viewport::Bounds;

/// Errors raised while compiling a shape
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshBuildError {
    #[error("Segment {index} cannot be tessellated: {source}")]
    InvalidSegment {
        index: usize,
        #[source]
        source: GeometryError,
    },

    #[error(
        "Arc segment {index} with extent {extent} rad needs more than {max} sub-arcs",
        max = MAX_ARC_SEGMENTS
    )]
    TooManySubdivisions { index: usize, extent: f64 },

    #[error("Invalid toolpath settings: {0}")]
    InvalidSettings(String),
}

/// Upper limit on sub-arcs for a single arc or marker.
pub const MAX_ARC_SEGMENTS: usize = 1 << 16;

/// Number of sub-arcs for an arc of `extent` radians so that none spans
/// more than `tolerance_deg` degrees: `floor(|deg| / tolerance) + 1`.
///
/// Returns `None` when the count is not finite or exceeds
/// [`MAX_ARC_SEGMENTS`].
pub fn arc_segment_count(extent: f64, tolerance_deg: f64) -> Option<usize> {
    let steps = (extent.to_degrees().abs() / tolerance_deg).floor();
    if steps.is_finite() && steps >= 0.0 && steps < MAX_ARC_SEGMENTS as f64 {
        Some(steps as usize + 1)
    } else {
        None
    }
}

/// Compiles shapes into [`ToolpathMesh`]es.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    settings: ToolpathSettings,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new(ToolpathSettings::default())
    }
}

impl MeshBuilder {
    pub fn new(settings: ToolpathSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ToolpathSettings {
        &self.settings
    }

    pub fn arc_segment_count(&self, extent: f64) -> Option<usize> {
        arc_segment_count(extent, self.settings.arc_tolerance_deg)
    }

    /// Compile `shape`.
    ///
    /// Every cap corner is recorded in `bounds`, but only once the whole
    /// shape compiled; a rejected shape leaves `bounds` untouched. An
    /// empty shape yields an empty mesh.
    pub fn build(&self, shape: &Shape, bounds: &mut Bounds) -> Result<ToolpathMesh, MeshBuildError> {
        let circle_segments = self.check_settings()?;
        for (index, segment) in shape.segments.iter().enumerate() {
            segment
                .validate()
                .map_err(|source| MeshBuildError::InvalidSegment { index, source })?;
        }

        let mut ribbon = Ribbon::new(&self.settings);

        if !shape.closed && self.settings.mark_open_path_start {
            if let Some(start) = shape.start_point() {
                ribbon.marker(start, circle_segments);
            }
        }

        for (index, segment) in shape.segments.iter().enumerate() {
            trace!("Tessellating segment {} of shape {}: {:?}", index, shape.id, segment);
            match segment {
                GeometrySegment::Line(line) => ribbon.line(line),
                GeometrySegment::Arc(arc) => {
                    let segments = self.arc_segment_count(arc.extent).ok_or(
                        MeshBuildError::TooManySubdivisions {
                            index,
                            extent: arc.extent,
                        },
                    )?;
                    ribbon.arc(arc, segments);
                }
            }

            let wants_marker = match self.settings.end_markers {
                EndMarkerPolicy::EverySegment => true,
                EndMarkerPolicy::ArcsOnly => segment.is_arc(),
                EndMarkerPolicy::Off => false,
            };
            if wants_marker {
                ribbon.marker(segment.end_point(), circle_segments);
            }
        }

        debug!(
            "Compiled shape {} ({} segments, closed: {}) into {} quads",
            shape.id,
            shape.len(),
            shape.closed,
            ribbon.mesh.quad_count()
        );

        bounds.merge(&ribbon.bounds);
        Ok(ribbon.mesh)
    }

    /// Validate the settings and return the sub-arc count of a full circle.
    fn check_settings(&self) -> Result<usize, MeshBuildError> {
        let s = &self.settings;
        if !(s.tool_width.is_finite() && s.tool_width >= 0.0) {
            return Err(MeshBuildError::InvalidSettings(format!(
                "tool width {}",
                s.tool_width
            )));
        }
        if !(s.arc_tolerance_deg.is_finite() && s.arc_tolerance_deg > 0.0) {
            return Err(MeshBuildError::InvalidSettings(format!(
                "arc tolerance {}",
                s.arc_tolerance_deg
            )));
        }
        if !(s.z_top.is_finite() && s.z_bottom.is_finite()) {
            return Err(MeshBuildError::InvalidSettings(format!(
                "depth range {}..{}",
                s.z_bottom, s.z_top
            )));
        }
        self.arc_segment_count(std::f64::consts::TAU).ok_or_else(|| {
            MeshBuildError::InvalidSettings(format!(
                "arc tolerance {} needs more than {} sub-arcs per circle",
                s.arc_tolerance_deg, MAX_ARC_SEGMENTS
            ))
        })
    }
}

/// Accumulates quads and cap bounds for one shape.
struct Ribbon {
    half_width: f64,
    z_top: f32,
    z_bottom: f32,
    mesh: ToolpathMesh,
    bounds: Bounds,
}

impl Ribbon {
    fn new(settings: &ToolpathSettings) -> Self {
        Self {
            half_width: settings.half_width(),
            z_top: settings.z_top as f32,
            z_bottom: settings.z_bottom as f32,
            mesh: ToolpathMesh::default(),
            bounds: Bounds::new(),
        }
    }

    fn line(&mut self, line: &LineSegment) {
        let dir = line.start.unit_vector(&line.end);
        let d = Point::new(dir.y * self.half_width, -dir.x * self.half_width);

        let xy1 = line.start + d;
        let xy2 = line.end + d;
        let xy3 = line.end - d;
        let xy4 = line.start - d;

        self.caps(xy1, xy2, xy3, xy4);
        self.wall(xy1, xy2);
        self.wall(xy3, xy4);
    }

    fn arc(&mut self, arc: &ArcSegment, segments: usize) {
        let outer = arc.radius + self.half_width;
        let inner = (arc.radius - self.half_width).max(0.0);
        let step = arc.extent / segments as f64;

        // Shared angles guarantee neighbouring sub-arcs meet exactly.
        let angles: Vec<f64> = (0..=segments)
            .map(|i| arc.start_angle + i as f64 * step)
            .collect();

        for pair in angles.windows(2) {
            let (prv, ang) = if arc.extent > 0.0 {
                (pair[0], pair[1])
            } else {
                (pair[1], pair[0])
            };

            let xy1 = arc.center.arc_point(prv, outer);
            let xy2 = arc.center.arc_point(ang, outer);
            let xy3 = arc.center.arc_point(ang, inner);
            let xy4 = arc.center.arc_point(prv, inner);

            self.caps(xy1, xy2, xy3, xy4);
            self.wall(xy1, xy2);
            self.wall(xy3, xy4);
        }
    }

    /// Filled disk of radius `half_width`.
    fn marker(&mut self, at: Point, segments: usize) {
        self.arc(&ArcSegment::circle(at, 0.0), segments);
    }

    fn caps(&mut self, xy1: Point, xy2: Point, xy3: Point, xy4: Point) {
        let (top, bottom) = (self.z_top, self.z_bottom);

        self.mesh.bottom.push(Quad::new(
            [
                at(xy2, bottom),
                at(xy1, bottom),
                at(xy4, bottom),
                at(xy3, bottom),
            ],
            Vec3::NEG_Z,
        ));
        self.mesh.top.push(Quad::new(
            [at(xy3, top), at(xy4, top), at(xy1, top), at(xy2, top)],
            Vec3::Z,
        ));

        for p in [xy1, xy2, xy3, xy4] {
            self.bounds.update(p.x, p.y);
        }
    }

    /// Side wall along the edge `a -> b`.
    fn wall(&mut self, a: Point, b: Point) {
        let d = b - a;
        let normal = Vec3::new(d.y as f32, -d.x as f32, 0.0).normalize_or_zero();
        let (top, bottom) = (self.z_top, self.z_bottom);

        self.mesh.walls.push(Quad::new(
            [at(b, top), at(a, top), at(a, bottom), at(b, bottom)],
            normal,
        ));
    }
}

fn at(p: Point, z: f32) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, z)
}
