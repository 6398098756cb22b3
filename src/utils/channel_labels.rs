//! Channel label file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read channel labels from a file.
///
/// # File Format
/// - One label per line, in channel order
/// - Surrounding whitespace is trimmed
/// - Blank lines are ignored
///
/// # Errors
/// - Returns error if file cannot be read
/// - Returns error if file contains invalid UTF-8
pub fn read_channel_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::ChannelLabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut labels = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::ChannelLabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            labels.push(trimmed.to_string());
        }
    }

    Ok(labels)
}

/// Default labels `ch01`, `ch02`, ... for `count` channels.
pub fn default_channel_labels(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("ch{i:02}")).collect()
}
