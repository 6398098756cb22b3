//! End-to-end tests for the selection pipeline through the public API.

use std::fs;

use ieeg_clips::annotate::{merge_events, read_annotation_table, read_seizure_table};
use ieeg_clips::circadian::parse_anchor;
use ieeg_clips::config::Config;
use ieeg_clips::output::{write_annotation_table, write_window_table};
use ieeg_clips::pipeline::{PipelineSettings, RecordingInput, process_recording};
use tempfile::TempDir;

const MINUTE: i64 = 60_000_000;
const HOUR: i64 = 60 * MINUTE;

const ANNOTATION_HEADER: &str = "layer,annotator,description,type,start_time_usec,end_time_usec";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_monitoring_note_is_dropped_and_seizure_zone_excluded() {
    let dir = TempDir::new().unwrap();
    let events_path = write_file(
        &dir,
        "events.csv",
        &format!(
            "{ANNOTATION_HEADER}\n\
             device,Tech,Tech notation: Video/EEG monitoring taking place,note,0,{}\n",
            6 * HOUR
        ),
    );
    let seizures_path = write_file(&dir, "seizures.csv", "source,start,end\nreviewer,10800,10860\n");

    let events = merge_events(vec![
        read_annotation_table(&events_path).unwrap(),
        read_seizure_table(&seizures_path).unwrap(),
    ]);
    assert_eq!(events.len(), 2);

    let settings = PipelineSettings::from_config(&Config::default()).unwrap();
    let input = RecordingInput {
        file_num: Some(1),
        duration_usec: 6 * HOUR,
        anchor: None,
        events,
    };
    let outcome = process_recording(&input, &settings).unwrap();

    assert!(outcome.used_ignore_fallback);
    assert_eq!(outcome.events_used, 1);
    assert!(outcome.windows[180].has_event);
    assert!(outcome.windows[60].close_to_event);
    assert!(!outcome.windows[59].close_to_event);

    let kept: Vec<usize> = outcome.selection.mask.kept_positions().collect();
    assert_eq!(kept, (0..30).collect::<Vec<_>>());

    let table = dir.path().join("clips.csv");
    write_window_table(&table, &outcome.windows, &outcome.selection.mask).unwrap();
    let mut reader = csv::Reader::from_path(&table).unwrap();
    let marked = reader
        .records()
        .map(|r| r.unwrap())
        .filter(|r| &r[11] == "true")
        .count();
    assert_eq!(marked, 30);
}

#[test]
fn test_short_event_blocks_whole_short_recording() {
    let dir = TempDir::new().unwrap();
    let events_path = write_file(
        &dir,
        "events.csv",
        &format!("{ANNOTATION_HEADER}\ndevice,Tech,spike,note,90000000,150000000\n"),
    );

    let settings = PipelineSettings::from_config(&Config::default()).unwrap();
    let input = RecordingInput {
        duration_usec: 10 * MINUTE,
        events: read_annotation_table(&events_path).unwrap(),
        ..RecordingInput::default()
    };
    let outcome = process_recording(&input, &settings).unwrap();

    assert!(outcome.windows[1].has_event);
    assert!(outcome.windows[2].has_event);
    assert!(!outcome.windows[0].has_event);
    assert!(outcome.windows.iter().all(|w| w.close_to_event));
    assert!(!outcome.has_interictal_data());
    assert!(!outcome.used_ignore_fallback);
}

#[test]
fn test_night_and_first_day_never_kept() {
    let settings = PipelineSettings::from_config(&Config::default()).unwrap();
    let input = RecordingInput {
        duration_usec: 3 * 24 * HOUR,
        anchor: parse_anchor("2024-05-10 21:30:00").unwrap(),
        ..RecordingInput::default()
    };
    let outcome = process_recording(&input, &settings).unwrap();

    for pos in outcome.selection.mask.kept_positions() {
        let window = &outcome.windows[pos];
        assert_eq!(window.is_night(), Some(false));
        assert_ne!(window.day_index(), Some(1));
    }
    assert_eq!(outcome.selection.mask.kept_count(), 30);
}

#[test]
fn test_merged_annotations_written_in_start_order() {
    let dir = TempDir::new().unwrap();
    let events_path = write_file(
        &dir,
        "events.csv",
        &format!(
            "{ANNOTATION_HEADER}\n\
             device,Tech,late,note,5000000,6000000\n\
             device,Tech,early,note,1000000,2000000\n"
        ),
    );
    let seizures_path = write_file(&dir, "seizures.csv", "start,end\n3,4\n");

    let events = merge_events(vec![
        read_annotation_table(&events_path).unwrap(),
        read_seizure_table(&seizures_path).unwrap(),
    ]);
    let out = dir.path().join("annotations.csv");
    write_annotation_table(&out, &events).unwrap();

    let written = read_annotation_table(&out).unwrap();
    let starts: Vec<i64> = written.iter().map(|e| e.start_usec).collect();
    assert_eq!(starts, vec![1_000_000, 3_000_000, 5_000_000]);
    assert_eq!(written[1].annotator, "Unknown");
    assert_eq!(written[1].layer, "manual_validation");
}
