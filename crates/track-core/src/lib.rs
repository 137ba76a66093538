//! evtt Core — event-track export
//!
//! Turns an animation clip's markers into an `.evtt` event track:
//! - **Timing:** Frame-rate resolution and frame/second conversion
//! - **Builder:** Marker filtering, ordering, and normalization
//! - **Resolve:** Locating the clip to export from host state
//! - **Naming/Writer:** Output file naming and atomic writes
//!
//! Timing and building are pure computation; only the writer touches disk.

pub mod builder;
pub mod export;
pub mod naming;
pub mod resolve;
pub mod timing;
pub mod writer;

pub use builder::{build_track, ClipTiming};
pub use export::{export_track, ExportReport};
pub use resolve::{ExportTarget, ExportTargetResolver, SceneResolver};
