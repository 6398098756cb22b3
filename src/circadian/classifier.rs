//! Day index and night/day classification of windows.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::annotate::AnnotatedWindow;
use crate::constants::circadian::{DEFAULT_NIGHT_END_HOUR, DEFAULT_NIGHT_START_HOUR};
use crate::constants::{SECS_PER_DAY, USEC_PER_SEC};
use crate::error::{Error, Result};

/// Circadian phase of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircadianPhase {
    /// 1-based recording day.
    pub day_index: i64,
    /// Falls within the night hours.
    pub is_night: bool,
    /// Wall-clock time at the window start.
    pub clock_time: NaiveDateTime,
}

impl CircadianPhase {
    /// Label in the form `Day 2 14:05:00`.
    pub fn label(&self) -> String {
        format!("Day {} {}", self.day_index, self.clock_time.format("%H:%M:%S"))
    }
}

/// Night-hour boundaries on the recording's naive clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightHours {
    /// First hour counted as night.
    pub start_hour: u32,
    /// First hour counted as day again.
    pub end_hour: u32,
}

impl Default for NightHours {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_NIGHT_START_HOUR,
            end_hour: DEFAULT_NIGHT_END_HOUR,
        }
    }
}

impl NightHours {
    /// Create night hours, validating both bounds are within 0-23.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour > 23 || end_hour > 23 {
            return Err(Error::Configuration {
                message: format!(
                    "night hours must be between 0 and 23, got {start_hour}-{end_hour}"
                ),
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// Whether `hour` is a night hour. Handles ranges wrapping midnight.
    pub const fn contains(&self, hour: u32) -> bool {
        if self.start_hour > self.end_hour {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            hour >= self.start_hour && hour < self.end_hour
        }
    }
}

/// Assign day index and night flag to each window.
///
/// With no anchor the windows are left unclassified.
pub fn classify_windows(
    windows: &mut [AnnotatedWindow],
    anchor: Option<NaiveDateTime>,
    night: NightHours,
) {
    let Some(anchor) = anchor else {
        return;
    };

    for window in windows {
        window.phase = Some(phase_at(anchor, window.start_usec(), night));
    }
}

/// Phase of the instant `offset_usec` after `anchor`, at whole-second resolution.
pub fn phase_at(anchor: NaiveDateTime, offset_usec: i64, night: NightHours) -> CircadianPhase {
    let elapsed_secs = offset_usec.div_euclid(USEC_PER_SEC);
    let clock_time = anchor + TimeDelta::seconds(elapsed_secs);

    CircadianPhase {
        day_index: elapsed_secs.div_euclid(SECS_PER_DAY) + 1,
        is_night: night.contains(clock_time.hour()),
        clock_time,
    }
}
