//! Raw-signal access.
//!
//! The extractor only sees the [`SignalSource`] trait. [`WavSignalSource`]
//! serves a multi-channel WAV recording through it.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::constants::USEC_PER_SEC;
use crate::error::{Error, Result};
use crate::utils::channel_labels::default_channel_labels;

/// Samples for one requested time range.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBlock {
    /// One sample vector per channel, all the same length.
    pub samples: Vec<Vec<f32>>,
    /// Sampling rate in Hz.
    pub sampling_rate: f64,
    /// Channel names, aligned with `samples`.
    pub channel_labels: Vec<String>,
}

impl SignalBlock {
    /// Number of samples per channel.
    pub fn frames(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }
}

/// Accessor for raw recording data.
pub trait SignalSource {
    /// Fetch the samples spanning `[start_usec, end_usec)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignalUnavailable`] if the range cannot be retrieved.
    fn fetch(&mut self, start_usec: i64, end_usec: i64) -> Result<SignalBlock>;
}

/// Signal source backed by a WAV file.
pub struct WavSignalSource {
    path: PathBuf,
    reader: WavReader<BufReader<File>>,
    channel_labels: Vec<String>,
}

impl WavSignalSource {
    /// Open a WAV recording.
    ///
    /// When `channel_labels` is `None`, channels are named `ch01`, `ch02`, ...
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, or if the number of
    /// labels does not match the channel count.
    pub fn open(path: &Path, channel_labels: Option<Vec<String>>) -> Result<Self> {
        let reader = WavReader::open(path).map_err(|e| Error::SignalOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        let channels = usize::from(reader.spec().channels);
        let channel_labels = match channel_labels {
            Some(labels) if labels.len() != channels => {
                return Err(Error::Configuration {
                    message: format!(
                        "{} channel labels given but '{}' has {channels} channels",
                        labels.len(),
                        path.display()
                    ),
                });
            }
            Some(labels) => labels,
            None => default_channel_labels(channels),
        };

        debug!(
            "Opened signal {} ({} channels, {} Hz, {} frames)",
            path.display(),
            channels,
            reader.spec().sample_rate,
            reader.duration()
        );

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            channel_labels,
        })
    }

    /// Sampling rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.reader.spec().sample_rate
    }

    /// Recording length in microseconds.
    pub fn duration_usec(&self) -> i64 {
        i64::from(self.reader.duration()) * USEC_PER_SEC / i64::from(self.sample_rate())
    }

    /// Channel names.
    pub fn channel_labels(&self) -> &[String] {
        &self.channel_labels
    }

    /// Frame index of the instant `usec`, truncated toward zero.
    fn frame_at(&self, usec: i64) -> i64 {
        let frames = i128::from(usec) * i128::from(self.sample_rate()) / i128::from(USEC_PER_SEC);
        i64::try_from(frames).unwrap_or(i64::MAX)
    }
}

impl SignalSource for WavSignalSource {
    #[allow(clippy::cast_precision_loss)]
    fn fetch(&mut self, start_usec: i64, end_usec: i64) -> Result<SignalBlock> {
        let unavailable = |reason: String| Error::SignalUnavailable {
            start_usec,
            end_usec,
            reason,
        };

        if start_usec < 0 || end_usec < start_usec {
            return Err(unavailable("invalid range".to_string()));
        }

        let start_frame = self.frame_at(start_usec);
        let end_frame = self.frame_at(end_usec);
        let total_frames = i64::from(self.reader.duration());
        if end_frame > total_frames {
            return Err(unavailable(format!(
                "range ends at frame {end_frame} but '{}' has {total_frames} frames",
                self.path.display()
            )));
        }

        let seek_to = u32::try_from(start_frame)
            .map_err(|_| unavailable(format!("frame {start_frame} out of range")))?;
        self.reader
            .seek(seek_to)
            .map_err(|e| unavailable(e.to_string()))?;

        let spec = self.reader.spec();
        let channels = usize::from(spec.channels);
        let frames = usize::try_from(end_frame - start_frame)
            .map_err(|_| unavailable("range too large".to_string()))?;
        let wanted = frames * channels;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => self
                .reader
                .samples::<f32>()
                .take(wanted)
                .collect::<std::result::Result<_, _>>(),
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                self.reader
                    .samples::<i32>()
                    .take(wanted)
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()
            }
        }
        .map_err(|e| unavailable(e.to_string()))?;

        if interleaved.len() != wanted {
            return Err(unavailable(format!(
                "expected {wanted} samples, read {}",
                interleaved.len()
            )));
        }

        let mut samples = vec![Vec::with_capacity(frames); channels];
        for frame in interleaved.chunks_exact(channels) {
            for (channel, &value) in samples.iter_mut().zip(frame) {
                channel.push(value);
            }
        }

        Ok(SignalBlock {
            samples,
            sampling_rate: f64::from(spec.sample_rate),
            channel_labels: self.channel_labels.clone(),
        })
    }
}
