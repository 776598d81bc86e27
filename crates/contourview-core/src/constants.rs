//! Shared constants for toolpath extrusion and camera control.

/// Default cutter width in drawing units. The ribbon extends half of it
/// on each side of the contour.
pub const DEFAULT_TOOL_WIDTH: f64 = 1.5;

/// Top of the extruded ribbon.
pub const DEFAULT_Z_TOP: f64 = 0.0;

/// Bottom of the extruded ribbon.
pub const DEFAULT_Z_BOTTOM: f64 = -3.0;

/// Largest angle covered by one arc sub-segment, in degrees.
pub const ARC_TOLERANCE_DEG: f64 = 3.0;

/// Rotation accumulators are stored in 1/16 degree units.
pub const ANGLE_UNITS_PER_DEGREE: f64 = 16.0;

/// One full turn in 1/16 degree units.
pub const ANGLE_UNITS_PER_TURN: f64 = 360.0 * ANGLE_UNITS_PER_DEGREE;

/// Rotation units applied per dragged pixel.
pub const ROTATE_FACTOR: f64 = 8.0;

/// Base of the wheel zoom exponent (`scale *= ZOOM_BASE ^ delta`).
pub const ZOOM_BASE: f64 = 1.001;

/// Fraction of the frustum used by auto-scale (5% margin).
pub const FIT_MARGIN: f64 = 0.95;

/// Initial camera distance along Z.
pub const DEFAULT_POSITION_Z: f64 = -10.0;
