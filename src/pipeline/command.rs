//! Process command execution.

use std::fs;

use tracing::{info, warn};

use super::{PipelineSettings, RecordingInput, file_number_from_name, process_recording};
use crate::annotate::{Event, merge_events, read_annotation_table, read_seizure_table};
use crate::circadian::parse_anchor;
use crate::cli::ProcessArgs;
use crate::clipper::{
    ClipExtractor, WavClipWriter, WavSignalSource, create_clip_progress, finish_progress,
};
use crate::config::Config;
use crate::constants::USEC_PER_SEC;
use crate::constants::output_files::{ANNOTATION_TABLE, METADATA, WINDOW_TABLE};
use crate::error::{Error, Result};
use crate::output::{RecordingMetadata, write_annotation_table, write_metadata, write_window_table};
use crate::utils::channel_labels::read_channel_labels;

/// Execute the process command.
///
/// Writes the window table, the merged annotation table and the recording
/// metadata to the output directory, then extracts clips when a signal file
/// was given and at least one window was kept.
///
/// # Errors
///
/// Returns an error if inputs cannot be read, settings are invalid, or
/// outputs cannot be written. Unavailable signal ranges are logged and
/// skipped.
pub fn execute(args: &ProcessArgs, config: &Config, show_progress: bool) -> Result<()> {
    let config = apply_overrides(config, args);
    let settings = PipelineSettings::from_config(&config)?;

    let events = load_events(args)?;
    info!("Loaded {} events", events.len());

    let mut source = match &args.signal {
        Some(path) => {
            let labels = args
                .labels
                .as_deref()
                .map(read_channel_labels)
                .transpose()?;
            Some(WavSignalSource::open(path, labels)?)
        }
        None => None,
    };

    let duration_usec = match (&source, args.duration_secs) {
        (Some(source), _) => source.duration_usec(),
        (None, Some(secs)) => secs_to_usec(secs),
        (None, None) => {
            return Err(Error::Configuration {
                message: "either a duration or a signal file is required".to_string(),
            });
        }
    };

    let anchor = parse_anchor(args.anchor.as_deref().unwrap_or_default())?;
    if args.anchor.is_some() && anchor.is_none() {
        warn!("Anchor time is unknown, day/night filtering disabled");
    }

    let input = RecordingInput {
        file_num: args.file_num.or_else(|| infer_file_number(args)),
        duration_usec,
        anchor,
        events,
    };

    let outcome = process_recording(&input, &settings)?;

    fs::create_dir_all(&args.output).map_err(|e| Error::OutputDirCreateFailed {
        path: args.output.clone(),
        source: e,
    })?;
    write_window_table(
        &args.output.join(WINDOW_TABLE),
        &outcome.windows,
        &outcome.selection.mask,
    )?;
    write_annotation_table(&args.output.join(ANNOTATION_TABLE), &input.events)?;

    let mut metadata = RecordingMetadata::new(&input, &outcome, &settings);

    if let Some(source) = source.as_mut()
        && !args.no_clips
        && outcome.has_interictal_data()
    {
        let pb = create_clip_progress(outcome.selection.mask.kept_count(), show_progress);
        let extractor = ClipExtractor::new().with_progress(pb.clone());
        let mut writer = WavClipWriter::new(args.output.clone(), &config.output.clip_prefix);

        let report = extractor.extract(
            &outcome.windows,
            &outcome.selection.mask,
            source,
            &mut writer,
        )?;
        finish_progress(pb.as_ref(), "done");

        if !report.failures.is_empty() {
            warn!(
                "{} of {} windows had no signal and were skipped",
                report.failures.len(),
                outcome.selection.mask.kept_count()
            );
        }
        info!("Extracted {} clips", report.clips.len());
        metadata = metadata.with_extraction(&report);
    }

    write_metadata(&args.output.join(METADATA), &metadata)?;

    info!("Wrote outputs to {}", args.output.display());
    Ok(())
}

/// Config with command-line overrides applied.
fn apply_overrides(config: &Config, args: &ProcessArgs) -> Config {
    let mut config = config.clone();
    if let Some(window_secs) = args.window_secs {
        config.windowing.window_secs = window_secs;
    }
    if let Some(radius) = args.radius_hours {
        config.annotation.exclusion_radius_hours = radius;
    }
    if let Some(cap) = args.cap {
        config.selection.cap_windows = cap;
    }
    config
}

/// Read and merge every annotation and seizure table.
fn load_events(args: &ProcessArgs) -> Result<Vec<Event>> {
    let mut sources = Vec::with_capacity(args.events.len() + args.seizures.len());
    for path in &args.events {
        sources.push(read_annotation_table(path)?);
    }
    for path in &args.seizures {
        sources.push(read_seizure_table(path)?);
    }
    Ok(merge_events(sources))
}

/// File number from the signal file name, else the first annotation table.
fn infer_file_number(args: &ProcessArgs) -> Option<u32> {
    args.signal
        .iter()
        .chain(args.events.iter())
        .filter_map(|path| path.file_name().and_then(|n| n.to_str()))
        .find_map(file_number_from_name)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn secs_to_usec(secs: f64) -> i64 {
    (secs * USEC_PER_SEC as f64).round() as i64
}
