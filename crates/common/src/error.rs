//! Error types shared across evtt crates.

use std::path::PathBuf;

/// Top-level error type for event-track export operations.
#[derive(Debug, thiserror::Error)]
pub enum EvttError {
    /// No clip or marker list could be resolved for export.
    #[error("No marker source: {message}")]
    NoMarkersSource { message: String },

    /// The frame rate resolves to a zero, negative, or non-finite value.
    #[error("Invalid frame rate: fps={fps}, fps_base={fps_base:?}")]
    InvalidRate { fps: f64, fps_base: Option<f64> },

    /// The serialized track could not be written to its destination.
    #[error("Failed to write event track to {path}: {source}")]
    SerializationWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The track could not be encoded as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using EvttError.
pub type EvttResult<T> = Result<T, EvttError>;

impl EvttError {
    pub fn no_markers_source(msg: impl Into<String>) -> Self {
        Self::NoMarkersSource {
            message: msg.into(),
        }
    }

    pub fn invalid_rate(fps: f64, fps_base: Option<f64>) -> Self {
        Self::InvalidRate { fps, fps_base }
    }

    pub fn serialization_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SerializationWrite {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means nothing was available to export, as opposed
    /// to a failure while exporting.
    pub fn is_no_source(&self) -> bool {
        matches!(self, Self::NoMarkersSource { .. })
    }
}
