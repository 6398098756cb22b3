//! Clip extraction for selected windows.
//!
//! Kept windows are grouped by file (or day), fetched from a raw-signal
//! source and written into one container per group.

mod extractor;
mod grouper;
mod progress;
mod sink;
mod source;
mod writer;

pub use extractor::{ClipExtractor, ClipFailure, ExtractedClip, ExtractionReport, LabeledClip, clip_name};
pub use grouper::{ClipGroup, group_selected};
pub use progress::{create_clip_progress, finish_progress};
pub use sink::ClipSink;
pub use source::{SignalBlock, SignalSource, WavSignalSource};
pub use writer::WavClipWriter;
