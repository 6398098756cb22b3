//! Recording time partitioning into contiguous windows.

use serde::Serialize;

use crate::error::{Error, Result};

/// A fixed-length, half-open span `[start_usec, end_usec)` of recording time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    /// Position in partition order.
    pub index: usize,
    /// Start offset in microseconds.
    pub start_usec: i64,
    /// End offset in microseconds (exclusive).
    pub end_usec: i64,
}

impl Window {
    /// Window length in microseconds.
    pub const fn len_usec(&self) -> i64 {
        self.end_usec - self.start_usec
    }
}

/// Partition `[0, duration_usec)` into consecutive windows of `window_len_usec`.
///
/// Produces `floor(duration_usec / window_len_usec)` windows. A trailing
/// remainder shorter than one window is dropped, never padded.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if `window_len_usec <= 0` or
/// `duration_usec < 0`.
pub fn partition_windows(duration_usec: i64, window_len_usec: i64) -> Result<Vec<Window>> {
    if window_len_usec <= 0 {
        return Err(Error::Configuration {
            message: format!("window length must be positive, got {window_len_usec} usec"),
        });
    }
    if duration_usec < 0 {
        return Err(Error::Configuration {
            message: format!("duration must be non-negative, got {duration_usec} usec"),
        });
    }

    let count = duration_usec / window_len_usec;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let windows = (0..count)
        .map(|i| {
            let start_usec = i * window_len_usec;
            Window {
                index: i as usize,
                start_usec,
                end_usec: start_usec + window_len_usec,
            }
        })
        .collect();

    Ok(windows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60_000_000;

    #[test]
    fn test_partition_exact_multiple() {
        let windows = partition_windows(3 * MINUTE, MINUTE).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start_usec, 0);
        assert_eq!(windows[2].end_usec, 3 * MINUTE);
    }

    #[test]
    fn test_partition_drops_trailing_remainder() {
        let windows = partition_windows(3 * MINUTE + 59_999_999, MINUTE).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows.last().unwrap().end_usec, 3 * MINUTE);
    }

    #[test]
    fn test_partition_is_contiguous() {
        let windows = partition_windows(17 * 7_000, 7_000).unwrap();
        assert_eq!(windows.len(), 17);
        for (i, pair) in windows.windows(2).enumerate() {
            assert_eq!(pair[0].end_usec, pair[1].start_usec);
            assert_eq!(pair[0].index, i);
            assert_eq!(pair[0].len_usec(), 7_000);
        }
    }

    #[test]
    fn test_partition_shorter_than_one_window() {
        assert!(partition_windows(MINUTE - 1, MINUTE).unwrap().is_empty());
        assert!(partition_windows(0, MINUTE).unwrap().is_empty());
    }

    #[test]
    fn test_partition_rejects_invalid_parameters() {
        assert!(matches!(
            partition_windows(MINUTE, 0),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            partition_windows(MINUTE, -5),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            partition_windows(-1, MINUTE),
            Err(Error::Configuration { .. })
        ));
    }
}
