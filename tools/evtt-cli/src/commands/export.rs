//! Export the active clip's markers to an event track.

use std::path::PathBuf;

use evtt_common::config::AppConfig;
use evtt_core::export::{build_for_target, export_track, resolve_target};
use evtt_core::resolve::SceneResolver;
use evtt_model::scene::SceneSnapshot;
use evtt_model::track::serialize_track;

pub fn run(
    scene_path: PathBuf,
    output: Option<PathBuf>,
    dry_run: bool,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let scene = SceneSnapshot::load(&scene_path)
        .map_err(|e| anyhow::anyhow!("Failed to load scene: {e}"))?;
    let resolver = SceneResolver::new(&scene);

    if dry_run {
        let target = resolve_target(&resolver)?;
        let document = build_for_target(&target)?;
        print!("{}", serialize_track(&document)?);
        return Ok(());
    }

    println!("Exporting event track from: {}", scene_path.display());

    let report = export_track(&resolver, output.as_deref(), &config.export)
        .map_err(|e| anyhow::anyhow!("Export failed: {e}"))?;

    println!("  Clip: {}", report.clip_name);
    if report.pinned_fallback {
        println!("  Source: pinned action (no animated armature selected)");
    }
    println!("  Duration: {:.3}s", report.duration_seconds);
    println!("  Events: {}", report.events);
    if report.dropped_markers > 0 {
        println!(
            "  Skipped: {} marker(s) that could not be timed",
            report.dropped_markers
        );
    }
    println!("\nExported events to {}", report.path.display());

    Ok(())
}
