//! Error handling for ContourView
//!
//! Geometry and placement errors live here together with the umbrella
//! [`Error`] type used by loaders and the binary.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;
use uuid::Uuid;

/// Geometry error type
///
/// Raised while validating or resolving contour geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate, radius or angle is NaN or infinite
    #[error("Non-finite geometry in {what}")]
    NonFinite {
        /// Description of the offending value.
        what: String,
    },

    /// A shape or placement refers to a placement that does not exist
    #[error("Unknown placement {id}")]
    UnknownPlacement {
        /// The missing placement id.
        id: Uuid,
    },

    /// Following parent links revisits a placement
    #[error("Placement cycle detected at {id}")]
    PlacementCycle {
        /// The placement at which the cycle was detected.
        id: Uuid,
    },
}

/// Main error type for ContourView
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
