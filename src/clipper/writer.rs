//! WAV clip container writing.
//!
//! Each group becomes a directory holding one WAV file per clip and an
//! `attributes.json` manifest with the per-clip metadata.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use serde::Serialize;

use super::{ClipGroup, ClipSink, LabeledClip};
use crate::constants::output_files::CLIP_ATTRIBUTES;
use crate::error::{Error, Result};

/// Attributes stored for each clip.
#[derive(Debug, Clone, Serialize)]
struct ClipAttributes {
    clip: String,
    start_usec: i64,
    end_usec: i64,
    sampling_rate: f64,
    channel_labels: Vec<String>,
}

/// Group currently being written.
struct OpenGroup {
    dir: PathBuf,
    clips: Vec<ClipAttributes>,
}

/// Writes clips as WAV files, one directory per group.
pub struct WavClipWriter {
    /// Output directory for group containers.
    output_dir: PathBuf,
    /// Container name prefix.
    prefix: String,
    current: Option<OpenGroup>,
}

impl WavClipWriter {
    /// Create a new clip writer under `output_dir`.
    #[must_use]
    pub fn new(output_dir: PathBuf, prefix: &str) -> Self {
        Self {
            output_dir,
            prefix: sanitize_filename(prefix),
            current: None,
        }
    }

    /// Directory a group is written to.
    pub fn group_dir(&self, group: ClipGroup) -> PathBuf {
        self.output_dir.join(group_dir_name(&self.prefix, group))
    }
}

impl ClipSink for WavClipWriter {
    fn begin_group(&mut self, group: ClipGroup) -> Result<()> {
        if self.current.is_some() {
            return Err(Error::ClipSinkState {
                message: format!("cannot open {group} while another group is open"),
            });
        }

        let dir = self.group_dir(group);
        fs::create_dir_all(&dir).map_err(|e| Error::OutputDirCreateFailed {
            path: dir.clone(),
            source: e,
        })?;

        self.current = Some(OpenGroup {
            dir,
            clips: Vec::new(),
        });
        Ok(())
    }

    fn write_clip(&mut self, name: &str, clip: &LabeledClip) -> Result<()> {
        let Some(group) = self.current.as_mut() else {
            return Err(Error::ClipSinkState {
                message: format!("cannot write {name} with no open group"),
            });
        };

        let path = group.dir.join(format!("{}.wav", sanitize_filename(name)));
        write_wav_file(&path, clip)?;

        group.clips.push(ClipAttributes {
            clip: name.to_string(),
            start_usec: clip.start_usec,
            end_usec: clip.end_usec,
            sampling_rate: clip.signal.sampling_rate,
            channel_labels: clip.signal.channel_labels.clone(),
        });
        Ok(())
    }

    fn end_group(&mut self) -> Result<()> {
        let Some(group) = self.current.take() else {
            return Err(Error::ClipSinkState {
                message: "no open group to finalize".to_string(),
            });
        };

        let path = group.dir.join(CLIP_ATTRIBUTES);
        let file = File::create(&path).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &group.clips).map_err(|e| Error::JsonWrite {
            path: path.clone(),
            source: e,
        })?;
        out.flush().map_err(|e| Error::FileWrite { path, source: e })?;
        Ok(())
    }
}

/// Container directory name: `{prefix}_day{N}`, or `{prefix}` alone.
fn group_dir_name(prefix: &str, group: ClipGroup) -> String {
    match group.number() {
        Some(n) => format!("{prefix}_day{n}"),
        None => prefix.to_string(),
    }
}

/// Sanitize a string for use as a filename/directory name.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}

/// Write a clip as a 32-bit float WAV file, one channel per label.
fn write_wav_file(path: &Path, clip: &LabeledClip) -> Result<()> {
    let signal = &clip.signal;
    let channels = u16::try_from(signal.samples.len())
        .ok()
        .filter(|&c| c > 0)
        .ok_or_else(|| Error::ClipSinkState {
            message: format!(
                "clip {} has unsupported channel count {}",
                path.display(),
                signal.samples.len()
            ),
        })?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sample_rate = signal.sampling_rate.round() as u32;

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let wav_error = |e: hound::Error| Error::ClipWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_error)?;

    for frame in 0..signal.frames() {
        for channel in &signal.samples {
            let sample = channel.get(frame).copied().unwrap_or(0.0);
            writer.write_sample(sample).map_err(wav_error)?;
        }
    }

    writer.finalize().map_err(wav_error)?;

    Ok(())
}
