//! Export orchestration: resolve, build, write.

use std::path::{Path, PathBuf};

use evtt_common::config::ExportDefaults;
use evtt_common::error::{EvttError, EvttResult};
use evtt_model::track::EventTrackDocument;

use crate::builder::build_track;
use crate::naming::output_path;
use crate::resolve::{ExportTarget, ExportTargetResolver};
use crate::writer::write_track;

/// Message shown when there is nothing to export.
pub const NO_ACTIVE_CLIP: &str = "no active clip; select an armature with an active action";

/// Summary of a completed export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Where the track was written.
    pub path: PathBuf,

    /// Clip that was exported.
    pub clip_name: String,

    /// Events written.
    pub events: usize,

    /// Markers skipped because they could not be timed.
    pub dropped_markers: usize,

    /// Clip length in seconds.
    pub duration_seconds: f64,

    /// The clip came from a pinned action without an animated armature in
    /// context.
    pub pinned_fallback: bool,
}

/// Resolve the export target or fail with [`EvttError::NoMarkersSource`].
pub fn resolve_target(resolver: &dyn ExportTargetResolver) -> EvttResult<ExportTarget> {
    resolver
        .resolve_export_target()
        .ok_or_else(|| EvttError::no_markers_source(NO_ACTIVE_CLIP))
}

/// Build the event track for a resolved target without writing it.
pub fn build_for_target(target: &ExportTarget) -> EvttResult<EventTrackDocument> {
    build_track(&target.clip, target.markers.as_deref(), &target.source_file)
}

/// Export the resolver's clip to an event-track file.
///
/// `requested` is the user's chosen path (file or directory); without one the
/// default file name is placed in `defaults.output_dir`. Nothing is written
/// unless the whole document builds.
pub fn export_track(
    resolver: &dyn ExportTargetResolver,
    requested: Option<&Path>,
    defaults: &ExportDefaults,
) -> EvttResult<ExportReport> {
    let target = resolve_target(resolver)?;
    let pinned_fallback = !resolver.can_export();
    if pinned_fallback {
        tracing::warn!(
            clip = %target.clip.name,
            "No animated armature in context; exporting the pinned action"
        );
    }

    tracing::info!(
        clip = %target.clip.name,
        owner = target.owner_name.as_deref().unwrap_or("-"),
        "Starting event track export"
    );

    let document = build_for_target(&target)?;
    if document.dropped_markers > 0 {
        tracing::debug!(
            dropped = document.dropped_markers,
            "Markers that could not be timed were left out"
        );
    }

    let path = output_path(
        requested,
        defaults.output_dir.as_deref(),
        &target,
        &defaults.extension,
    );
    let path = write_track(&document, &path)?;

    tracing::info!(
        path = %path.display(),
        events = document.len(),
        "Exported event track"
    );

    Ok(ExportReport {
        path,
        clip_name: target.clip.name,
        events: document.len(),
        dropped_markers: document.dropped_markers,
        duration_seconds: document.duration_seconds,
        pinned_fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evtt_model::clip::{ClipReference, FrameRate, MarkerRecord};
    use evtt_model::scene::{ActionData, SceneSnapshot};
    use evtt_model::track::load_track;

    use crate::resolve::SceneResolver;

    struct NoClip;

    impl ExportTargetResolver for NoClip {
        fn resolve_export_target(&self) -> Option<ExportTarget> {
            None
        }
    }

    fn target(markers: Option<Vec<MarkerRecord>>) -> ExportTarget {
        ExportTarget {
            owner_name: Some("Hero".to_string()),
            clip: ClipReference::new("Jump", 0.0, 48.0, FrameRate::new(24.0)),
            markers,
            source_file: "hero.blend".to_string(),
        }
    }

    fn defaults_in(dir: &Path) -> ExportDefaults {
        ExportDefaults {
            output_dir: Some(dir.to_path_buf()),
            ..ExportDefaults::default()
        }
    }

    #[test]
    fn test_export_writes_default_name() {
        let dir = std::env::temp_dir().join("evtt_test_export_default");
        let _ = std::fs::remove_dir_all(&dir);

        let target = target(Some(vec![
            MarkerRecord::new("land", 40.0),
            MarkerRecord::new("takeoff", 8.0),
            MarkerRecord::new("glitch", f64::NAN),
        ]));
        let report = export_track(&target, None, &defaults_in(&dir)).unwrap();

        assert_eq!(report.path, dir.join("Hero_animation_Jump_event_track.evtt"));
        assert_eq!(report.clip_name, "Jump");
        assert_eq!(report.events, 2);
        assert_eq!(report.dropped_markers, 1);
        assert_eq!(report.duration_seconds, 2.0);
        assert!(!report.pinned_fallback);

        let track = load_track(&report.path).unwrap();
        assert_eq!(track.events[0].name, "takeoff");
        assert_eq!(track.file, "hero.blend");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_respects_requested_path() {
        let dir = std::env::temp_dir().join("evtt_test_export_requested");
        let _ = std::fs::remove_dir_all(&dir);
        let requested = dir.join("custom");

        let report = export_track(
            &target(Some(vec![])),
            Some(&requested),
            &ExportDefaults::default(),
        )
        .unwrap();
        assert_eq!(report.path, dir.join("custom.evtt"));
        assert!(report.path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_no_clip_writes_nothing() {
        let dir = std::env::temp_dir().join("evtt_test_export_no_clip");
        let _ = std::fs::remove_dir_all(&dir);

        let err = export_track(&NoClip, None, &defaults_in(&dir)).unwrap_err();
        assert!(err.is_no_source());
        assert!(err.to_string().contains(NO_ACTIVE_CLIP));
        assert!(!dir.exists());
    }

    #[test]
    fn test_missing_marker_list_writes_nothing() {
        let dir = std::env::temp_dir().join("evtt_test_export_no_markers");
        let _ = std::fs::remove_dir_all(&dir);

        let err = export_track(&target(None), None, &defaults_in(&dir)).unwrap_err();
        assert!(err.is_no_source());
        assert!(!dir.exists());
    }

    #[test]
    fn test_invalid_rate_writes_nothing() {
        let dir = std::env::temp_dir().join("evtt_test_export_bad_rate");
        let _ = std::fs::remove_dir_all(&dir);

        let mut target = target(Some(vec![MarkerRecord::new("a", 1.0)]));
        target.clip.rate = FrameRate::with_base(f64::INFINITY, 1.0);

        let err = export_track(&target, None, &defaults_in(&dir)).unwrap_err();
        assert!(matches!(err, EvttError::InvalidRate { .. }));
        assert!(!dir.exists());
    }

    #[test]
    fn test_pinned_action_exports_with_fallback_flag() {
        let dir = std::env::temp_dir().join("evtt_test_export_pinned");
        let _ = std::fs::remove_dir_all(&dir);

        let scene = SceneSnapshot {
            filepath: "/work/hero.blend".to_string(),
            render: FrameRate::new(24.0),
            active_object: None,
            selected_objects: vec![],
            objects: vec![],
            actions: vec![ActionData {
                name: "Idle".to_string(),
                frame_range: [0.0, 24.0],
                pose_markers: Some(vec![MarkerRecord::new("blink", 12.0)]),
            }],
            dopesheet_actions: vec!["Idle".to_string()],
        };
        let resolver = SceneResolver::new(&scene);
        assert!(!resolver.can_export());

        let report = export_track(&resolver, None, &defaults_in(&dir)).unwrap();
        assert!(report.pinned_fallback);
        assert_eq!(report.path, dir.join("Armature_animation_Idle_event_track.evtt"));
        assert_eq!(report.events, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_uses_configured_extension() {
        let dir = std::env::temp_dir().join("evtt_test_export_extension");
        let _ = std::fs::remove_dir_all(&dir);

        let defaults = ExportDefaults {
            output_dir: Some(dir.clone()),
            extension: "json".to_string(),
        };
        let report = export_track(&target(Some(vec![])), None, &defaults).unwrap();
        assert_eq!(report.path, dir.join("Hero_animation_Jump_event_track.json"));
        assert!(report.path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_build_for_target_is_deterministic() {
        let target = target(Some(vec![
            MarkerRecord::new("b", 10.0),
            MarkerRecord::new("a", 10.0),
        ]));
        let first = evtt_model::track::serialize_track(&build_for_target(&target).unwrap()).unwrap();
        let second = evtt_model::track::serialize_track(&build_for_target(&target).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
