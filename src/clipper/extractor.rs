//! Clip extraction from a raw-signal source.

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::{ClipGroup, ClipSink, SignalBlock, SignalSource, group_selected};
use crate::annotate::AnnotatedWindow;
use crate::error::{Error, Result};
use crate::selection::ExtractionMask;

/// Signal data for one kept window.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledClip {
    /// Window start in microseconds.
    pub start_usec: i64,
    /// Window end in microseconds.
    pub end_usec: i64,
    /// Samples, sampling rate and channel labels.
    pub signal: SignalBlock,
}

/// A clip that was written to its group container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClip {
    /// Container the clip went to.
    pub group: ClipGroup,
    /// Clip name within the container, e.g. `clip01`.
    pub name: String,
    /// Position of the source window in the selector input.
    pub window_pos: usize,
    /// Window start in microseconds.
    pub start_usec: i64,
    /// Window end in microseconds.
    pub end_usec: i64,
}

/// A kept window whose signal could not be fetched.
#[derive(Debug)]
pub struct ClipFailure {
    /// Container the clip would have gone to.
    pub group: ClipGroup,
    /// Position of the window in the selector input.
    pub window_pos: usize,
    /// Why the fetch failed.
    pub error: Error,
}

/// Clips produced and windows skipped by one extraction run.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Successfully written clips, in write order.
    pub clips: Vec<ExtractedClip>,
    /// Windows skipped because their signal was unavailable.
    pub failures: Vec<ClipFailure>,
}

/// Name of the `n`-th clip in a group, counting from 1.
pub fn clip_name(n: usize) -> String {
    format!("clip{n:02}")
}

/// Extracts kept windows from a signal source into a clip sink.
#[derive(Default)]
pub struct ClipExtractor {
    progress: Option<ProgressBar>,
}

impl ClipExtractor {
    /// Create an extractor without progress reporting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress on `pb`, one tick per kept window.
    #[must_use]
    pub fn with_progress(mut self, pb: Option<ProgressBar>) -> Self {
        self.progress = pb;
        self
    }

    /// Extract every window kept by `mask`.
    ///
    /// Windows are processed group by group in ascending group order and
    /// chronologically within a group. Clip numbering restarts at 1 for each
    /// group and only advances on a successful write. A failed fetch skips
    /// the window and is recorded in the report.
    ///
    /// # Errors
    ///
    /// Returns an error if `mask` does not cover `windows`, or if the sink
    /// fails. Fetch failures are not errors.
    pub fn extract<S, K>(
        &self,
        windows: &[AnnotatedWindow],
        mask: &ExtractionMask,
        source: &mut S,
        sink: &mut K,
    ) -> Result<ExtractionReport>
    where
        S: SignalSource + ?Sized,
        K: ClipSink + ?Sized,
    {
        if mask.len() != windows.len() {
            return Err(Error::Configuration {
                message: format!(
                    "extraction mask covers {} windows but {} were given",
                    mask.len(),
                    windows.len()
                ),
            });
        }

        let mut report = ExtractionReport::default();

        for (group, positions) in group_selected(windows, mask) {
            info!("Extracting {} clips for {group}", positions.len());
            sink.begin_group(group)?;

            let mut written = 0;
            for pos in positions {
                let window = &windows[pos];
                if let Some(pb) = &self.progress {
                    pb.set_message(group.to_string());
                }

                match source.fetch(window.start_usec(), window.end_usec()) {
                    Ok(signal) => {
                        written += 1;
                        let name = clip_name(written);
                        let clip = LabeledClip {
                            start_usec: window.start_usec(),
                            end_usec: window.end_usec(),
                            signal,
                        };
                        sink.write_clip(&name, &clip)?;
                        debug!("Wrote {name} for {group}");
                        report.clips.push(ExtractedClip {
                            group,
                            name,
                            window_pos: pos,
                            start_usec: clip.start_usec,
                            end_usec: clip.end_usec,
                        });
                    }
                    Err(e) => {
                        warn!(
                            "Skipping window {}-{} usec in {group}: {e}",
                            window.start_usec(),
                            window.end_usec()
                        );
                        report.failures.push(ClipFailure {
                            group,
                            window_pos: pos,
                            error: e,
                        });
                    }
                }

                if let Some(pb) = &self.progress {
                    pb.inc(1);
                }
            }

            sink.end_group()?;
        }

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::selection::{SelectionPolicy, select_windows};
    use crate::window::partition_windows;

    const MINUTE: i64 = 60_000_000;

    /// Source returning a constant block, failing for chosen start times.
    struct FakeSource {
        missing: Vec<i64>,
    }

    impl SignalSource for FakeSource {
        fn fetch(&mut self, start_usec: i64, end_usec: i64) -> Result<SignalBlock> {
            if self.missing.contains(&start_usec) {
                return Err(Error::SignalUnavailable {
                    start_usec,
                    end_usec,
                    reason: "gap in recording".to_string(),
                });
            }
            Ok(SignalBlock {
                samples: vec![vec![0.0; 4]],
                sampling_rate: 4.0,
                channel_labels: vec!["ch01".to_string()],
            })
        }
    }

    /// Sink recording the calls it receives.
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl ClipSink for RecordingSink {
        fn begin_group(&mut self, group: ClipGroup) -> Result<()> {
            self.calls.push(format!("begin {group}"));
            Ok(())
        }

        fn write_clip(&mut self, name: &str, clip: &LabeledClip) -> Result<()> {
            self.calls.push(format!("{name}@{}", clip.start_usec / MINUTE));
            Ok(())
        }

        fn end_group(&mut self) -> Result<()> {
            self.calls.push("end".to_string());
            Ok(())
        }
    }

    fn windows(count: i64, file_num: Option<u32>) -> Vec<AnnotatedWindow> {
        partition_windows(count * MINUTE, MINUTE)
            .unwrap()
            .into_iter()
            .map(|w| AnnotatedWindow::new(w, file_num))
            .collect()
    }

    #[test]
    fn test_clip_names_are_zero_padded() {
        assert_eq!(clip_name(1), "clip01");
        assert_eq!(clip_name(30), "clip30");
        assert_eq!(clip_name(100), "clip100");
    }

    #[test]
    fn test_extracts_kept_windows_in_order() {
        let windows = windows(3, Some(2));
        let report = select_windows(&windows, &SelectionPolicy::default());
        let mut source = FakeSource { missing: vec![] };
        let mut sink = RecordingSink::default();

        let result = ClipExtractor::new()
            .extract(&windows, &report.mask, &mut source, &mut sink)
            .unwrap();

        assert_eq!(result.clips.len(), 3);
        assert!(result.failures.is_empty());
        assert_eq!(
            sink.calls,
            vec!["begin file 2", "clip01@0", "clip02@1", "clip03@2", "end"]
        );
    }

    #[test]
    fn test_unavailable_signal_skips_window() {
        let windows = windows(4, None);
        let report = select_windows(&windows, &SelectionPolicy::default());
        let mut source = FakeSource {
            missing: vec![MINUTE],
        };
        let mut sink = RecordingSink::default();

        let result = ClipExtractor::new()
            .extract(&windows, &report.mask, &mut source, &mut sink)
            .unwrap();

        assert_eq!(result.clips.len(), 3);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].window_pos, 1);
        assert!(matches!(
            result.failures[0].error,
            Error::SignalUnavailable { .. }
        ));
        assert_eq!(
            sink.calls,
            vec!["begin recording", "clip01@0", "clip02@2", "clip03@3", "end"]
        );
    }

    #[test]
    fn test_empty_mask_touches_nothing() {
        let windows = windows(3, None);
        let mut source = FakeSource { missing: vec![] };
        let mut sink = RecordingSink::default();

        let result = ClipExtractor::new()
            .extract(&windows, &ExtractionMask::none(3), &mut source, &mut sink)
            .unwrap();

        assert!(result.clips.is_empty());
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_mask_length_mismatch() {
        let windows = windows(3, None);
        let mut source = FakeSource { missing: vec![] };
        let mut sink = RecordingSink::default();

        let result = ClipExtractor::new().extract(
            &windows,
            &ExtractionMask::none(2),
            &mut source,
            &mut sink,
        );
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
