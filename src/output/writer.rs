//! Output writer trait definition.

use crate::error::Result;

/// Trait for writing tabular records.
pub trait OutputWriter {
    /// Record type accepted by the writer.
    type Record;

    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single record.
    fn write_record(&mut self, record: &Self::Record) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
