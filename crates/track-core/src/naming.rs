//! Output file naming.

use std::path::{Path, PathBuf};

use crate::resolve::ExportTarget;

/// Event-track file extension, without the dot.
pub const TRACK_EXTENSION: &str = "evtt";

/// Stem of the suggested name when no clip resolves.
const FALLBACK_STEM: &str = "animation_event_track";

/// Owner name used when the clip has no known owner.
const DEFAULT_OWNER: &str = "Armature";

/// Trim, replace spaces with underscores, and substitute `Unnamed` for empty names.
fn clean_name(name: &str) -> String {
    let cleaned = name.trim().replace(' ', "_");
    if cleaned.is_empty() {
        "Unnamed".to_string()
    } else {
        cleaned
    }
}

/// Default file name: `{owner}_animation_{clip}_event_track.{extension}`.
pub fn default_track_filename(owner: Option<&str>, clip_name: &str, extension: &str) -> String {
    let owner = clean_name(owner.unwrap_or(DEFAULT_OWNER));
    let clip = clean_name(clip_name);
    format!("{owner}_animation_{clip}_event_track.{extension}")
}

/// Suggested file name for an optional export target.
pub fn suggested_filename(target: Option<&ExportTarget>, extension: &str) -> String {
    match target {
        Some(target) => {
            default_track_filename(target.owner_name.as_deref(), &target.clip.name, extension)
        }
        None => format!("{FALLBACK_STEM}.{extension}"),
    }
}

/// Append `.{extension}` unless the path already ends with it (ASCII case-insensitive).
pub fn ensure_extension(path: impl Into<PathBuf>, extension: &str) -> PathBuf {
    let path = path.into();
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if has_extension {
        return path;
    }

    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

/// Final output path for a target.
///
/// An explicit `requested` path is used as is (with the extension enforced),
/// unless it is an existing directory or ends with a path separator, in which
/// case the default name is placed inside it. Without a request, the default
/// name goes into `fallback_dir`, or the current directory.
pub fn output_path(
    requested: Option<&Path>,
    fallback_dir: Option<&Path>,
    target: &ExportTarget,
    extension: &str,
) -> PathBuf {
    let filename = suggested_filename(Some(target), extension);
    match requested {
        Some(path) if names_directory(path) => path.join(filename),
        Some(path) => ensure_extension(path, extension),
        None => fallback_dir.unwrap_or_else(|| Path::new(".")).join(filename),
    }
}

fn names_directory(path: &Path) -> bool {
    path.is_dir()
        || path
            .as_os_str()
            .to_string_lossy()
            .ends_with(std::path::is_separator)
}
