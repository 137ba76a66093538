//! Validate an event track.

use std::path::PathBuf;

use evtt_model::track::load_track;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating event track at: {}", path.display());

    let track = load_track(&path).map_err(|e| anyhow::anyhow!("Failed to load track: {e}"))?;

    println!("  Events: {}", track.len());
    println!("  Duration: {:.3}s", track.duration_seconds);

    let issues = track.validate();
    if issues.is_empty() {
        println!("\nEvent track is valid.");
        return Ok(());
    }

    println!("\nValidation issues:");
    for issue in &issues {
        println!("  - {issue}");
    }
    Err(anyhow::anyhow!("{} issue(s) found", issues.len()))
}
