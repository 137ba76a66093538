//! evtt Track Model
//!
//! Defines the data contracts for event-track export:
//! - **Clip:** The animation source (frame range, frame rate) and its markers
//! - **Track:** The exported `.evtt` document and its events
//! - **Scene:** A snapshot of host state used to locate the clip to export
//!
//! Event times are in seconds; normalized times are in the `[0.0, 1.0]`
//! range relative to the clip's span.

pub mod clip;
pub mod scene;
pub mod track;

pub use clip::*;
pub use scene::*;
pub use track::*;
