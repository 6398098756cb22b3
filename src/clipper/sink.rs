//! Clip sink trait definition.

use super::{ClipGroup, LabeledClip};
use crate::error::Result;

/// Trait for writing extracted clips into per-group containers.
pub trait ClipSink {
    /// Open the container for a group.
    fn begin_group(&mut self, group: ClipGroup) -> Result<()>;

    /// Write a single clip into the open group.
    fn write_clip(&mut self, name: &str, clip: &LabeledClip) -> Result<()>;

    /// Finalize the open group (flush, write attributes, etc.).
    fn end_group(&mut self) -> Result<()>;
}
