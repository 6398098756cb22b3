//! CSV tables: annotated windows and merged annotations.

use std::fs::File;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::annotate::{AnnotatedWindow, Event};
use crate::constants::annotation::JOIN_SEPARATOR;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use crate::selection::ExtractionMask;

/// Columns of the annotated-window table.
pub const WINDOW_COLUMNS: &[&str] = &[
    "timestamp",
    "start_time_usec",
    "end_time_usec",
    "has_events",
    "events",
    "annotators",
    "layers",
    "close_to_event",
    "day_index",
    "is_night",
    "file_num",
    "mark_for_extraction",
];

/// Columns of the merged annotation table.
pub const ANNOTATION_COLUMNS: &[&str] = &[
    "layer",
    "annotator",
    "description",
    "type",
    "start_time_usec",
    "end_time_usec",
];

/// One row of the annotated-window table.
///
/// Set-valued fields are joined with `", "`. Unclassified phase fields and
/// a missing file number are written as empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowRow {
    /// `Day N HH:MM:SS` label, empty without an anchor.
    pub timestamp: String,
    /// Window start in microseconds.
    pub start_time_usec: i64,
    /// Window end in microseconds.
    pub end_time_usec: i64,
    /// At least one event overlaps the window.
    pub has_events: bool,
    /// Event descriptions.
    pub events: String,
    /// Event annotators.
    pub annotators: String,
    /// Event layers.
    pub layers: String,
    /// Within the exclusion radius of an event.
    pub close_to_event: bool,
    /// 1-based recording day.
    pub day_index: Option<i64>,
    /// Night flag.
    pub is_night: Option<bool>,
    /// Recording file number.
    pub file_num: Option<u32>,
    /// Kept for extraction.
    pub mark_for_extraction: bool,
}

impl WindowRow {
    /// Build a row from an annotated window and its keep flag.
    pub fn new(window: &AnnotatedWindow, mark_for_extraction: bool) -> Self {
        let join = |set: &std::collections::BTreeSet<String>| {
            set.iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(JOIN_SEPARATOR)
        };

        Self {
            timestamp: window.phase.map(|p| p.label()).unwrap_or_default(),
            start_time_usec: window.start_usec(),
            end_time_usec: window.end_usec(),
            has_events: window.has_event,
            events: join(&window.event_descriptions),
            annotators: join(&window.annotators),
            layers: join(&window.layers),
            close_to_event: window.close_to_event,
            day_index: window.day_index(),
            is_night: window.is_night(),
            file_num: window.file_num,
            mark_for_extraction,
        }
    }
}

/// CSV table writer for serializable records.
pub struct CsvTableWriter<R> {
    writer: csv::Writer<File>,
    path: PathBuf,
    columns: &'static [&'static str],
    record: PhantomData<R>,
}

impl<R> CsvTableWriter<R> {
    /// Create a table at `path` with the given header columns.
    pub fn create(path: &Path, columns: &'static [&'static str]) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| Error::TableWrite {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            columns,
            record: PhantomData,
        })
    }

    fn table_error(&self, source: csv::Error) -> Error {
        Error::TableWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl<R: Serialize> OutputWriter for CsvTableWriter<R> {
    type Record = R;

    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(self.columns)
            .map_err(|e| self.table_error(e))
    }

    fn write_record(&mut self, record: &R) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|e| self.table_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::FileWrite {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Write the annotated-window table, one row per window.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_window_table(
    path: &Path,
    windows: &[AnnotatedWindow],
    mask: &ExtractionMask,
) -> Result<()> {
    let mut table = CsvTableWriter::create(path, WINDOW_COLUMNS)?;
    table.write_header()?;
    for (pos, window) in windows.iter().enumerate() {
        table.write_record(&WindowRow::new(window, mask.is_kept(pos)))?;
    }
    table.finalize()
}

/// Write the merged annotation table.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_annotation_table(path: &Path, events: &[Event]) -> Result<()> {
    let mut table = CsvTableWriter::create(path, ANNOTATION_COLUMNS)?;
    table.write_header()?;
    for event in events {
        table.write_record(event)?;
    }
    table.finalize()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::annotate::{annotate_windows, read_annotation_table};
    use crate::selection::{SelectionPolicy, select_windows};
    use crate::window::partition_windows;
    use tempfile::TempDir;

    const MINUTE: i64 = 60_000_000;

    fn event(description: &str, annotator: &str, start_usec: i64, end_usec: i64) -> Event {
        Event {
            layer: "device".to_string(),
            annotator: annotator.to_string(),
            description: description.to_string(),
            kind: "note".to_string(),
            start_usec,
            end_usec,
        }
    }

    #[test]
    fn test_window_row_joins_sets() {
        let windows = partition_windows(2 * MINUTE, MINUTE).unwrap();
        let events = vec![
            event("spike", "b", 10, 20),
            event("artifact, muscle", "a", 30, 40),
        ];
        let annotated = annotate_windows(&windows, &events, 0, Some(3)).unwrap();

        let row = WindowRow::new(&annotated[0], false);
        assert!(row.has_events);
        assert_eq!(row.events, "artifact, muscle, spike");
        assert_eq!(row.annotators, "a, b");
        assert_eq!(row.layers, "device");
        assert_eq!(row.file_num, Some(3));
        assert!(row.timestamp.is_empty());
        assert!(row.day_index.is_none());
    }

    #[test]
    fn test_window_table_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clips.csv");
        let windows = partition_windows(3 * MINUTE, MINUTE).unwrap();
        let annotated = annotate_windows(&windows, &[], 0, None).unwrap();
        let report = select_windows(&annotated, &SelectionPolicy::new(MINUTE, 2).unwrap());

        write_window_table(&path, &annotated, &report.mask).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), WINDOW_COLUMNS);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][1], "60000000");
        assert_eq!(&rows[1][3], "false");
        assert_eq!(&rows[1][8], "");
        assert_eq!(&rows[1][11], "true");
        assert_eq!(&rows[2][11], "false");
    }

    #[test]
    fn test_empty_window_table_still_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clips.csv");
        write_window_table(&path, &[], &ExtractionMask::none(0)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("timestamp,start_time_usec,"));
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_annotation_table_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annotations.csv");
        let events = vec![event("spike, sharp", "tech", 0, 5), event("seizure", "md", 10, 10)];

        write_annotation_table(&path, &events).unwrap();

        assert_eq!(read_annotation_table(&path).unwrap(), events);
    }
}
