//! Annotation table readers.
//!
//! Two sources feed the annotator: the device annotation table exported
//! alongside each recording, and the manual seizure validation table.
//! Both are parsed with the `csv` crate.

use std::path::Path;

use serde::Deserialize;

use super::Event;
use crate::constants::annotation::{MANUAL_LAYER, SEIZURE, UNKNOWN_ANNOTATOR};
use crate::constants::USEC_PER_SEC;
use crate::error::{Error, Result};

/// Row of the manual seizure validation table. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct SeizureRecord {
    #[serde(default)]
    source: Option<String>,
    start: f64,
    end: f64,
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::EventParse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Read a device annotation table.
///
/// Columns: `layer, annotator, description, type, start_time_usec,
/// end_time_usec`. Events are returned in file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a column is missing, a value
/// cannot be parsed, or an event ends before it starts.
pub fn read_annotation_table(path: &Path) -> Result<Vec<Event>> {
    let mut reader = open_reader(path)?;
    let mut events = Vec::new();

    for (line_num, result) in reader.deserialize::<Event>().enumerate() {
        let event = result.map_err(|e| Error::InvalidEventFormat {
            message: format!("{} line {}: {e}", path.display(), line_num + 2),
        })?;

        if event.end_usec < event.start_usec {
            return Err(Error::InvalidEventFormat {
                message: format!(
                    "{} line {}: end time ({}) precedes start time ({})",
                    path.display(),
                    line_num + 2,
                    event.end_usec,
                    event.start_usec
                ),
            });
        }

        events.push(event);
    }

    Ok(events)
}

/// Read a manual seizure validation table and convert rows to events.
///
/// Columns: `start`, `end` (seconds) and optionally `source`. Each row
/// becomes a `seizure` event on the manual validation layer, sorted by
/// start time.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or a row has non-finite or reversed times.
pub fn read_seizure_table(path: &Path) -> Result<Vec<Event>> {
    let mut reader = open_reader(path)?;
    let mut events = Vec::new();

    for (line_num, result) in reader.deserialize::<SeizureRecord>().enumerate() {
        let record = result.map_err(|e| Error::InvalidEventFormat {
            message: format!("{} line {}: {e}", path.display(), line_num + 2),
        })?;

        if !record.start.is_finite() || !record.end.is_finite() || record.end < record.start {
            return Err(Error::InvalidEventFormat {
                message: format!(
                    "{} line {}: invalid seizure interval {}-{} s",
                    path.display(),
                    line_num + 2,
                    record.start,
                    record.end
                ),
            });
        }

        events.push(seizure_event(record.source, record.start, record.end));
    }

    events.sort_by_key(|e| e.start_usec);
    Ok(events)
}

/// Build a manual-validation seizure event from times in seconds.
///
/// Times are truncated to whole microseconds.
pub fn seizure_event(source: Option<String>, start_secs: f64, end_secs: f64) -> Event {
    let annotator = source
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_ANNOTATOR.to_string());

    Event {
        layer: MANUAL_LAYER.to_string(),
        annotator,
        description: SEIZURE.to_string(),
        kind: SEIZURE.to_string(),
        start_usec: secs_to_usec(start_secs),
        end_usec: secs_to_usec(end_secs),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn secs_to_usec(secs: f64) -> i64 {
    (secs * USEC_PER_SEC as f64).trunc() as i64
}
