//! Show event track information.

use std::path::PathBuf;

use evtt_model::track::load_track;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let track = load_track(&path).map_err(|e| anyhow::anyhow!("Failed to load track: {e}"))?;

    println!("Event track: {}", path.display());
    if track.file.is_empty() {
        println!("  Source: (unsaved)");
    } else {
        println!("  Source: {}", track.file);
    }
    println!("  Rate: {}fps", track.frames_per_second);
    println!(
        "  Frames: {} - {} ({:.3}s)",
        track.frame_start, track.frame_end, track.duration_seconds
    );
    if track.dropped_markers > 0 {
        println!("  Dropped markers: {}", track.dropped_markers);
    }
    println!();

    println!("Events ({}):", track.len());
    for event in &track.events {
        println!(
            "  {:>8.3}s  {:>6.1}%  frame {:>7.2}  {}",
            event.time,
            event.time_normalized * 100.0,
            event.frame,
            event.name
        );
    }

    Ok(())
}
