//! Animation clip and marker types.
//!
//! Frames are floating-point: hosts allow subframe marker placement and
//! fractional frame ranges.

use serde::{Deserialize, Deserializer, Serialize};

/// Frame rate as a rate/base pair.
///
/// The effective rate is `fps / fps_base`; NTSC 29.97 is `30 / 1.001`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRate {
    /// Rate numerator.
    pub fps: f64,

    /// Rate denominator. Unset or zero means `1.0`.
    #[serde(default)]
    pub fps_base: Option<f64>,
}

impl FrameRate {
    /// Integer-style rate with an implicit base of 1.
    pub fn new(fps: f64) -> Self {
        Self {
            fps,
            fps_base: None,
        }
    }

    pub fn with_base(fps: f64, fps_base: f64) -> Self {
        Self {
            fps,
            fps_base: Some(fps_base),
        }
    }
}

/// Identifies the animation source being exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipReference {
    /// Clip (action) name.
    pub name: String,

    /// First frame of the clip.
    pub frame_start: f64,

    /// Last frame of the clip. Expected to be `>= frame_start`.
    pub frame_end: f64,

    /// Playback rate.
    pub rate: FrameRate,
}

impl ClipReference {
    pub fn new(name: impl Into<String>, frame_start: f64, frame_end: f64, rate: FrameRate) -> Self {
        Self {
            name: name.into(),
            frame_start,
            frame_end,
            rate,
        }
    }

    /// Length of the clip in frames. Non-positive for degenerate clips.
    pub fn duration_frames(&self) -> f64 {
        self.frame_end - self.frame_start
    }
}

/// A named marker at a frame position, as read from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// Marker label. Not guaranteed unique within a clip.
    pub name: String,

    /// Frame position. May be non-finite when the host data is corrupt.
    #[serde(deserialize_with = "deserialize_frame")]
    pub frame: f64,
}

impl MarkerRecord {
    pub fn new(name: impl Into<String>, frame: f64) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }

    /// Whether the marker has a usable frame position.
    pub fn is_timed(&self) -> bool {
        self.frame.is_finite()
    }
}

/// Accepts a number, `null` (read as NaN), or a string such as `"inf"` or
/// `"nan"`. JSON has no literal for non-finite floats, and serde_json writes
/// them as `null`.
fn deserialize_frame<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFrame {
        Number(f64),
        Text(String),
    }

    match Option::<RawFrame>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(RawFrame::Number(frame)) => Ok(frame),
        Some(RawFrame::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid frame {text:?}: {e}"))),
    }
}
