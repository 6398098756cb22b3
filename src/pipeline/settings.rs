//! Pipeline parameters in microseconds.

use crate::circadian::NightHours;
use crate::config::{Config, validate_config};
use crate::constants::USEC_PER_SEC;
use crate::constants::annotation::DEFAULT_EXCLUSION_RADIUS_HOURS;
use crate::constants::windowing::DEFAULT_WINDOW_SECS;
use crate::error::{Error, Result};
use crate::selection::SelectionPolicy;

const SECS_PER_HOUR: f64 = 3_600.0;

/// Read-only parameters shared by every recording.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Window length.
    pub window_len_usec: i64,
    /// Exclusion radius around event-bearing windows.
    pub exclusion_radius_usec: i64,
    /// Night-hour boundaries.
    pub night: NightHours,
    /// Segment selection policy.
    pub policy: SelectionPolicy,
    /// Event descriptions dropped by the empty-pool retry.
    pub ignored_descriptions: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let window_len_usec = DEFAULT_WINDOW_SECS as i64 * USEC_PER_SEC;
        Self {
            window_len_usec,
            exclusion_radius_usec: hours_to_usec(DEFAULT_EXCLUSION_RADIUS_HOURS),
            night: NightHours::default(),
            policy: SelectionPolicy::default(),
            ignored_descriptions: Vec::new(),
        }
    }
}

impl PipelineSettings {
    /// Build settings from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any value is out of range.
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_config(config)?;

        let window_len_usec = secs_to_usec(config.windowing.window_secs)?;
        let continuity_gap_usec = match config.selection.continuity_gap_secs {
            Some(secs) => secs_to_usec(secs)?,
            None => window_len_usec,
        };

        Ok(Self {
            window_len_usec,
            exclusion_radius_usec: hours_to_usec(config.annotation.exclusion_radius_hours),
            night: NightHours::new(
                config.circadian.night_start_hour,
                config.circadian.night_end_hour,
            )?,
            policy: SelectionPolicy::new(continuity_gap_usec, config.selection.cap_windows)?,
            ignored_descriptions: config.annotation.ignored_descriptions.clone(),
        })
    }
}

fn secs_to_usec(secs: u64) -> Result<i64> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| s.checked_mul(USEC_PER_SEC))
        .ok_or_else(|| Error::Configuration {
            message: format!("{secs} seconds is out of range"),
        })
}

/// Hours to whole microseconds, rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn hours_to_usec(hours: f64) -> i64 {
    (hours * SECS_PER_HOUR * USEC_PER_SEC as f64).round() as i64
}
