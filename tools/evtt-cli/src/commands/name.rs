//! Print the default event-track file name for a scene.

use std::path::PathBuf;

use evtt_common::config::AppConfig;
use evtt_core::naming::suggested_filename;
use evtt_core::resolve::{ExportTargetResolver, SceneResolver};
use evtt_model::scene::SceneSnapshot;

pub fn run(scene_path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let scene = SceneSnapshot::load(&scene_path)
        .map_err(|e| anyhow::anyhow!("Failed to load scene: {e}"))?;

    let resolver = SceneResolver::new(&scene);
    let target = resolver.resolve_export_target();
    if target.is_none() {
        tracing::warn!("No active clip in scene; using the generic file name");
    } else if !resolver.can_export() {
        tracing::warn!("No animated armature in context; naming the pinned action");
    }

    println!(
        "{}",
        suggested_filename(target.as_ref(), &config.export.extension)
    );
    Ok(())
}
