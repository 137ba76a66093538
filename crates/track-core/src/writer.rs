//! Atomic event-track writer.
//!
//! The track is written to a temporary sibling and renamed into place, so
//! the destination either holds the complete new document or is untouched.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use evtt_common::error::{EvttError, EvttResult};
use evtt_model::track::{serialize_track, EventTrackDocument};

/// Serialize `document` and write it to `path`.
pub fn write_track(document: &EventTrackDocument, path: &Path) -> EvttResult<PathBuf> {
    let json = serialize_track(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| EvttError::serialization_write(path, e))?;
    }

    let temp_path = temp_sibling(path);
    if let Err(e) = std::fs::write(&temp_path, json.as_bytes()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(EvttError::serialization_write(path, e));
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(EvttError::serialization_write(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = json.len(), "Wrote event track");
    Ok(path.to_path_buf())
}

/// `.name.tmp` next to the destination.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("track")));
    name.push(".tmp");
    path.with_file_name(name)
}
