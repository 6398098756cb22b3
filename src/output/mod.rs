//! Recording output files.

mod metadata;
mod table;
mod writer;

pub use metadata::{
    ExtractionSummary, RecordingMetadata, SegmentSummary, SettingsSummary, WindowCounts,
    write_metadata,
};
pub use table::{
    ANNOTATION_COLUMNS, CsvTableWriter, WINDOW_COLUMNS, WindowRow, write_annotation_table,
    write_window_table,
};
pub use writer::OutputWriter;
