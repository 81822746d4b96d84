//! Core of a true-size map overlay: drag a GeoJSON shape across a map
//! while keeping its real-world size, by re-deriving every vertex from a
//! per-vertex (bearing, distance) fingerprint about a movable anchor.

use std::error;
use std::fmt;

pub mod fingerprint;
pub mod geometry;
pub mod layer;
pub mod overlay;

pub use fingerprint::{ShapeFingerprint, VertexFingerprint};
pub use geometry::{Feature, GeographicPoint, Geometry, GeometryKind};
pub use layer::{OverlayId, Projection, ScreenPosition, TrueSizeLayer};
pub use overlay::{DragState, ShapeOverlay};

#[derive(Debug, Clone, PartialEq)]
pub enum TrueSizeError {
    /// The geometry kind has no shape to preserve (for example a bare
    /// `Point`) and cannot be fingerprinted.
    UnsupportedGeometry(String),
    /// Coordinate structure does not line up with the stored layout.
    MalformedCoordinates(String),
    /// A drag update arrived for an overlay with no gesture in progress.
    DragNotStarted,
    /// The id does not refer to an attached overlay.
    OverlayNotFound(OverlayId),
}

impl error::Error for TrueSizeError {}

impl fmt::Display for TrueSizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrueSizeError::UnsupportedGeometry(kind) => {
                write!(f, "unsupported geometry kind: {}", kind)
            }
            TrueSizeError::MalformedCoordinates(detail) => {
                write!(f, "malformed coordinates: {}", detail)
            }
            TrueSizeError::DragNotStarted => {
                write!(f, "no drag gesture in progress")
            }
            TrueSizeError::OverlayNotFound(id) => {
                write!(f, "no overlay with id {}", id)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TrueSizeError>;
