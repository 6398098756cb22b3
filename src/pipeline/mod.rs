//! Recording processing pipeline.
//!
//! One recording flows through partitioning, annotation, day/night
//! classification and selection. Nothing is shared between recordings
//! except the read-only [`PipelineSettings`].

pub mod command;
mod naming;
mod recording;
mod settings;

pub use naming::file_number_from_name;
pub use recording::{RecordingInput, RecordingOutcome, process_recording};
pub use settings::PipelineSettings;
