//! Recording summary JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clipper::ExtractionReport;
use crate::error::{Error, Result};
use crate::pipeline::{PipelineSettings, RecordingInput, RecordingOutcome};

/// Summary of one processed recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Tool version that produced the outputs.
    pub version: String,
    /// When the recording was processed.
    pub processed_at: DateTime<Utc>,
    /// Recording file number.
    pub file_num: Option<u32>,
    /// Recording length in microseconds.
    pub duration_usec: i64,
    /// Wall-clock time at offset zero, if known.
    pub anchor: Option<NaiveDateTime>,
    /// Window counts.
    pub windows: WindowCounts,
    /// Bounds of the selected segment.
    pub selected_segment: Option<SegmentSummary>,
    /// Events merged from all sources.
    pub event_count: usize,
    /// Events the final annotation was computed from.
    pub events_used: usize,
    /// Ignored descriptions were dropped to find eligible windows.
    pub used_ignore_fallback: bool,
    /// Clip extraction results, when a signal was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionSummary>,
    /// Parameters used.
    pub settings: SettingsSummary,
}

/// Window counts through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCounts {
    /// Windows in the recording.
    pub total: usize,
    /// Windows overlapped by an event.
    pub with_events: usize,
    /// Windows inside an exclusion zone.
    pub close_to_event: usize,
    /// Eligible windows.
    pub candidates: usize,
    /// Contiguous segments among the candidates.
    pub segments: usize,
    /// Windows kept for extraction.
    pub kept: usize,
}

/// Selected segment bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Start of the first window in microseconds.
    pub start_usec: i64,
    /// End of the last window in microseconds.
    pub end_usec: i64,
    /// Windows in the segment before the cap.
    pub windows: usize,
}

/// Clip extraction outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Clips written.
    pub clips_written: usize,
    /// Windows skipped because their signal was unavailable.
    pub windows_skipped: usize,
}

/// Pipeline parameters, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSummary {
    /// Window length.
    pub window_len_usec: i64,
    /// Exclusion radius.
    pub exclusion_radius_usec: i64,
    /// First night hour.
    pub night_start_hour: u32,
    /// First day hour.
    pub night_end_hour: u32,
    /// Continuity gap.
    pub continuity_gap_usec: i64,
    /// Window cap.
    pub cap_windows: usize,
}

impl RecordingMetadata {
    /// Summarize a processed recording.
    pub fn new(
        input: &RecordingInput,
        outcome: &RecordingOutcome,
        settings: &PipelineSettings,
    ) -> Self {
        let windows = &outcome.windows;
        let selection = &outcome.selection;

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            processed_at: Utc::now(),
            file_num: input.file_num,
            duration_usec: input.duration_usec,
            anchor: input.anchor,
            windows: WindowCounts {
                total: windows.len(),
                with_events: windows.iter().filter(|w| w.has_event).count(),
                close_to_event: windows.iter().filter(|w| w.close_to_event).count(),
                candidates: selection.candidate_count,
                segments: selection.segments.len(),
                kept: selection.mask.kept_count(),
            },
            selected_segment: selection.selected_segment().map(|s| SegmentSummary {
                start_usec: s.start_usec,
                end_usec: s.end_usec,
                windows: s.len(),
            }),
            event_count: input.events.len(),
            events_used: outcome.events_used,
            used_ignore_fallback: outcome.used_ignore_fallback,
            extraction: None,
            settings: SettingsSummary {
                window_len_usec: settings.window_len_usec,
                exclusion_radius_usec: settings.exclusion_radius_usec,
                night_start_hour: settings.night.start_hour,
                night_end_hour: settings.night.end_hour,
                continuity_gap_usec: settings.policy.continuity_gap_usec,
                cap_windows: settings.policy.cap_windows,
            },
        }
    }

    /// Attach clip extraction results.
    #[must_use]
    pub fn with_extraction(mut self, report: &ExtractionReport) -> Self {
        self.extraction = Some(ExtractionSummary {
            clips_written: report.clips.len(),
            windows_skipped: report.failures.len(),
        });
        self
    }
}

/// Write recording metadata as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_metadata(path: &Path, metadata: &RecordingMetadata) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, metadata).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::circadian::parse_anchor;
    use crate::pipeline::process_recording;
    use tempfile::TempDir;

    const MINUTE: i64 = 60_000_000;

    #[test]
    fn test_metadata_counts() {
        let input = RecordingInput {
            file_num: Some(2),
            duration_usec: 40 * MINUTE,
            anchor: parse_anchor("2024-01-02 10:00:00").unwrap(),
            events: Vec::new(),
        };
        let settings = PipelineSettings::default();
        let outcome = process_recording(&input, &settings).unwrap();

        let metadata = RecordingMetadata::new(&input, &outcome, &settings);
        assert_eq!(metadata.windows.total, 40);
        // Everything is on day 1, so nothing is eligible.
        assert_eq!(metadata.windows.candidates, 0);
        assert!(metadata.selected_segment.is_none());
        assert!(metadata.extraction.is_none());
        assert_eq!(metadata.settings.cap_windows, 30);
    }

    #[test]
    fn test_metadata_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        let input = RecordingInput {
            duration_usec: 45 * MINUTE,
            ..RecordingInput::default()
        };
        let settings = PipelineSettings::default();
        let outcome = process_recording(&input, &settings).unwrap();
        let metadata = RecordingMetadata::new(&input, &outcome, &settings)
            .with_extraction(&ExtractionReport::default());

        write_metadata(&path, &metadata).unwrap();

        let parsed: RecordingMetadata =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, metadata);
        assert_eq!(parsed.windows.kept, 30);
        assert_eq!(
            parsed.selected_segment,
            Some(SegmentSummary {
                start_usec: 0,
                end_usec: 45 * MINUTE,
                windows: 45,
            })
        );
    }
}
