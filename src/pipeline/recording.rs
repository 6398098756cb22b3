//! Per-recording orchestration.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::PipelineSettings;
use crate::annotate::{AnnotatedWindow, Event, annotate_windows, without_ignored};
use crate::circadian::classify_windows;
use crate::error::Result;
use crate::selection::{SelectionReport, select_windows};
use crate::window::{Window, partition_windows};

/// Everything known about one recording before processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingInput {
    /// Physical file number when the recording is split across files.
    pub file_num: Option<u32>,
    /// Recording length in microseconds.
    pub duration_usec: i64,
    /// Wall-clock time at offset zero, if known.
    pub anchor: Option<NaiveDateTime>,
    /// Merged events, ordered by start.
    pub events: Vec<Event>,
}

/// Result of processing one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOutcome {
    /// Annotated and classified windows.
    pub windows: Vec<AnnotatedWindow>,
    /// Selection over `windows`.
    pub selection: SelectionReport,
    /// Events the final annotation was computed from.
    pub events_used: usize,
    /// The result comes from the retry without ignored descriptions.
    pub used_ignore_fallback: bool,
}

impl RecordingOutcome {
    /// Whether any window was kept for extraction.
    pub fn has_interictal_data(&self) -> bool {
        self.selection.mask.kept_count() > 0
    }
}

/// Partition, annotate, classify and select one recording.
///
/// When no window is eligible, events matching the ignored descriptions are
/// dropped and the recording is annotated and selected once more. An empty
/// pool after that is reported, not treated as an error.
///
/// # Errors
///
/// Returns [`crate::Error::Configuration`] for an invalid duration or
/// window length.
pub fn process_recording(
    input: &RecordingInput,
    settings: &PipelineSettings,
) -> Result<RecordingOutcome> {
    let windows = partition_windows(input.duration_usec, settings.window_len_usec)?;
    debug!(
        "Partitioned {} usec into {} windows",
        input.duration_usec,
        windows.len()
    );

    let (annotated, selection) = annotate_and_select(&windows, &input.events, input, settings)?;
    let mut outcome = RecordingOutcome {
        windows: annotated,
        selection,
        events_used: input.events.len(),
        used_ignore_fallback: false,
    };

    if outcome.selection.is_empty_pool() && !settings.ignored_descriptions.is_empty() {
        let kept = without_ignored(&input.events, &settings.ignored_descriptions);
        if kept.len() < input.events.len() {
            info!(
                "No eligible windows, retrying without {} ignored events",
                input.events.len() - kept.len()
            );
            let (annotated, selection) = annotate_and_select(&windows, &kept, input, settings)?;
            outcome = RecordingOutcome {
                windows: annotated,
                selection,
                events_used: kept.len(),
                used_ignore_fallback: true,
            };
        }
    }

    if outcome.selection.is_empty_pool() {
        info!(
            "No interictal data available{}",
            input
                .file_num
                .map(|n| format!(" in file {n}"))
                .unwrap_or_default()
        );
    } else {
        info!(
            "Kept {} of {} windows ({} eligible)",
            outcome.selection.mask.kept_count(),
            outcome.windows.len(),
            outcome.selection.candidate_count
        );
    }

    Ok(outcome)
}

fn annotate_and_select(
    windows: &[Window],
    events: &[Event],
    input: &RecordingInput,
    settings: &PipelineSettings,
) -> Result<(Vec<AnnotatedWindow>, SelectionReport)> {
    let mut annotated = annotate_windows(
        windows,
        events,
        settings.exclusion_radius_usec,
        input.file_num,
    )?;
    classify_windows(&mut annotated, input.anchor, settings.night);
    let selection = select_windows(&annotated, &settings.policy);
    Ok((annotated, selection))
}
