//! Event-track document types (`.evtt`).
//!
//! An event track is UTF-8 JSON written with two-space indentation:
//!
//! ```json
//! {
//!   "file": "hero.blend",
//!   "frames_per_second": 24.0,
//!   "frame_start": 0.0,
//!   "frame_end": 48.0,
//!   "duration_seconds": 2.0,
//!   "events": [
//!     { "name": "hit", "frame": 12.0, "time": 0.5, "time_normalized": 0.25 }
//!   ]
//! }
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A marker converted to real and normalized time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Marker name, copied verbatim.
    pub name: String,

    /// Frame position, copied verbatim.
    pub frame: f64,

    /// Seconds from frame zero at the clip's effective rate.
    pub time: f64,

    /// Progress through the clip in `[0.0, 1.0]`.
    pub time_normalized: f64,
}

impl EventRecord {
    /// Create an event whose normalized time is not yet known.
    pub fn timed(name: impl Into<String>, frame: f64, time: f64) -> Self {
        Self {
            name: name.into(),
            frame,
            time,
            time_normalized: 0.0,
        }
    }

    /// Export ordering: by time, then by name for equal times.
    pub fn export_order(&self, other: &Self) -> Ordering {
        self.time
            .partial_cmp(&other.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// The complete exported event track for one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrackDocument {
    /// Originating host file name, empty when unsaved or unknown.
    #[serde(default)]
    pub file: String,

    /// Effective playback rate.
    pub frames_per_second: f64,

    /// Clip start frame.
    pub frame_start: f64,

    /// Clip end frame.
    pub frame_end: f64,

    /// Clip length in seconds, `0.0` for degenerate clips.
    pub duration_seconds: f64,

    /// Events sorted by `(time, name)`.
    pub events: Vec<EventRecord>,

    /// Markers skipped because their frame or time was not finite.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dropped_markers: usize,
}

fn is_zero(count: &usize) -> bool {
    *count == 0
}

impl EventTrackDocument {
    /// Number of events in the track.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up the first event with the given name.
    pub fn event(&self, name: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Check the document against the track format's invariants.
    ///
    /// Returns one human-readable message per problem; an empty list means
    /// the track is well-formed.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = vec![];

        if !(self.frames_per_second.is_finite() && self.frames_per_second > 0.0) {
            issues.push(format!(
                "frames_per_second must be finite and positive, got {}",
                self.frames_per_second
            ));
        }

        if !(self.duration_seconds.is_finite() && self.duration_seconds >= 0.0) {
            issues.push(format!(
                "duration_seconds must be finite and non-negative, got {}",
                self.duration_seconds
            ));
        }

        for (index, event) in self.events.iter().enumerate() {
            if !(0.0..=1.0).contains(&event.time_normalized) {
                issues.push(format!(
                    "event {index} ({}) has time_normalized {} outside [0, 1]",
                    event.name, event.time_normalized
                ));
            }
            if self.duration_seconds == 0.0 && event.time_normalized != 0.0 {
                issues.push(format!(
                    "event {index} ({}) has time_normalized {} in a zero-length clip",
                    event.name, event.time_normalized
                ));
            }
        }

        for (index, pair) in self.events.windows(2).enumerate() {
            if pair[0].export_order(&pair[1]) == Ordering::Greater {
                issues.push(format!(
                    "events {index} ({}) and {} ({}) are out of order",
                    pair[0].name,
                    index + 1,
                    pair[1].name
                ));
            }
        }

        issues
    }
}

/// Errors reading or writing track and scene files.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Parse an event track from JSON text.
pub fn parse_track(json: &str) -> Result<EventTrackDocument, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize an event track to indented JSON with a trailing newline.
pub fn serialize_track(document: &EventTrackDocument) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(document)?;
    output.push('\n');
    Ok(output)
}

/// Read and parse an event track file.
pub fn load_track(path: impl AsRef<Path>) -> Result<EventTrackDocument, ModelError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ModelError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_track(&content).map_err(|e| ModelError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}
