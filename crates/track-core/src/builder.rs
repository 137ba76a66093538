//! Track Builder: turns a clip and its markers into an event-track document.
//!
//! # Algorithm
//!
//! 1. **Timing:** resolve the clip's effective rate, start time, and duration.
//! 2. **Filter:** convert markers into timed events, skipping non-finite times.
//! 3. **Sort:** order events by `(time, name)`.
//! 4. **Normalize:** map each event time onto the clip span, clamped to `[0, 1]`.
//!
//! Each stage is a separate function so its invariant can be checked on its own.

use evtt_common::error::{EvttError, EvttResult};
use evtt_model::clip::{ClipReference, MarkerRecord};
use evtt_model::track::{EventRecord, EventTrackDocument};

use crate::timing::{effective_rate, frame_to_seconds};

/// Time-domain view of a clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipTiming {
    /// Effective playback rate.
    pub effective_fps: f64,

    /// Time of `frame_start` in seconds.
    pub start_seconds: f64,

    /// Clip length in seconds, `0.0` when the frame range is not positive.
    pub duration_seconds: f64,
}

impl ClipTiming {
    /// Compute timing for a clip. Fails only on a degenerate frame rate.
    pub fn for_clip(clip: &ClipReference) -> EvttResult<Self> {
        let effective_fps = effective_rate(&clip.rate)?;

        let duration_frames = clip.duration_frames();
        let duration_seconds = if duration_frames > 0.0 {
            frame_to_seconds(duration_frames, effective_fps)
        } else {
            0.0
        };
        // A span too long to express in seconds has no usable progress axis.
        let duration_seconds = if duration_seconds.is_finite() {
            duration_seconds
        } else {
            0.0
        };

        Ok(Self {
            effective_fps,
            start_seconds: frame_to_seconds(clip.frame_start, effective_fps),
            duration_seconds,
        })
    }

    /// Whether the clip has a usable progress axis.
    pub fn has_duration(&self) -> bool {
        self.duration_seconds > 0.0
    }
}

/// Output of the filter stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedEvents {
    /// Timed events in input order.
    pub events: Vec<EventRecord>,

    /// Number of markers skipped because they could not be timed.
    pub dropped: usize,
}

/// Filter stage: time every marker, skipping those whose frame or time is
/// not finite.
pub fn collect_events(markers: &[MarkerRecord], effective_fps: f64) -> CollectedEvents {
    let mut collected = CollectedEvents::default();

    for marker in markers {
        let time = frame_to_seconds(marker.frame, effective_fps);
        if !marker.is_timed() || !time.is_finite() {
            tracing::debug!(marker = %marker.name, frame = marker.frame, "Skipping untimed marker");
            collected.dropped += 1;
            continue;
        }
        collected
            .events
            .push(EventRecord::timed(marker.name.clone(), marker.frame, time));
    }

    collected
}

/// Sort stage: order by time, then by name for equal times.
pub fn sort_events(events: &mut [EventRecord]) {
    events.sort_by(EventRecord::export_order);
}

/// Normalize stage: assign `time_normalized` from the clip timing.
///
/// Zero-length clips get `0.0` for every event.
pub fn normalize_events(events: &mut [EventRecord], timing: &ClipTiming) {
    if !timing.has_duration() {
        for event in events.iter_mut() {
            event.time_normalized = 0.0;
        }
        return;
    }

    for event in events.iter_mut() {
        let progress = (event.time - timing.start_seconds) / timing.duration_seconds;
        // A non-finite clip start leaves no position on the axis.
        event.time_normalized = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }
}

/// Build the event track for a clip.
///
/// `markers` is `None` when the host could not supply a marker list at all,
/// which fails with [`EvttError::NoMarkersSource`]. An empty list is valid and
/// yields a track with no events.
pub fn build_track(
    clip: &ClipReference,
    markers: Option<&[MarkerRecord]>,
    source_file: &str,
) -> EvttResult<EventTrackDocument> {
    let markers = markers.ok_or_else(|| {
        EvttError::no_markers_source(format!("clip '{}' has no marker list", clip.name))
    })?;

    let timing = ClipTiming::for_clip(clip)?;

    let CollectedEvents {
        mut events,
        dropped,
    } = collect_events(markers, timing.effective_fps);
    sort_events(&mut events);
    normalize_events(&mut events, &timing);

    tracing::debug!(
        clip = %clip.name,
        fps = timing.effective_fps,
        duration_secs = timing.duration_seconds,
        events = events.len(),
        dropped,
        "Built event track"
    );

    Ok(EventTrackDocument {
        file: source_file.to_string(),
        frames_per_second: timing.effective_fps,
        frame_start: clip.frame_start,
        frame_end: clip.frame_end,
        duration_seconds: timing.duration_seconds,
        events,
        dropped_markers: dropped,
    })
}
