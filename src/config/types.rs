//! Configuration type definitions.

use crate::constants::annotation::{DEFAULT_EXCLUSION_RADIUS_HOURS, DEFAULT_IGNORED_DESCRIPTIONS};
use crate::constants::circadian::{DEFAULT_NIGHT_END_HOUR, DEFAULT_NIGHT_START_HOUR};
use crate::constants::output_files::DEFAULT_CLIP_PREFIX;
use crate::constants::selection::DEFAULT_CAP_WINDOWS;
use crate::constants::windowing::DEFAULT_WINDOW_SECS;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window partitioning settings.
    pub windowing: WindowingConfig,

    /// Event annotation settings.
    pub annotation: AnnotationConfig,

    /// Day/night classification settings.
    pub circadian: CircadianConfig,

    /// Segment selection settings.
    pub selection: SelectionConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Window partitioning settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowingConfig {
    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for WindowingConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

/// Event annotation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Exclusion radius around event-bearing windows, in hours.
    pub exclusion_radius_hours: f64,

    /// Event descriptions dropped when no window would otherwise be eligible.
    ///
    /// Matched case-insensitively as substrings. Empty disables the retry.
    pub ignored_descriptions: Vec<String>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            exclusion_radius_hours: DEFAULT_EXCLUSION_RADIUS_HOURS,
            ignored_descriptions: DEFAULT_IGNORED_DESCRIPTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Day/night classification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircadianConfig {
    /// First hour of the night (0-23).
    pub night_start_hour: u32,

    /// First hour of the day (0-23).
    pub night_end_hour: u32,
}

impl Default for CircadianConfig {
    fn default() -> Self {
        Self {
            night_start_hour: DEFAULT_NIGHT_START_HOUR,
            night_end_hour: DEFAULT_NIGHT_END_HOUR,
        }
    }
}

/// Segment selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum windows kept from the longest segment.
    pub cap_windows: usize,

    /// Largest start-to-start gap within a segment, in seconds.
    ///
    /// Defaults to the window length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuity_gap_secs: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            cap_windows: DEFAULT_CAP_WINDOWS,
            continuity_gap_secs: None,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix for clip group containers.
    pub clip_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clip_prefix: DEFAULT_CLIP_PREFIX.to_string(),
        }
    }
}
