//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "ieeg-clips";

/// Microseconds per second.
pub const USEC_PER_SEC: i64 = 1_000_000;

/// Seconds per day, used for day-index computation.
pub const SECS_PER_DAY: i64 = 86_400;

/// Windowing defaults.
pub mod windowing {
    /// Default window length in seconds.
    pub const DEFAULT_WINDOW_SECS: u64 = 60;
}

/// Annotation defaults.
pub mod annotation {
    /// Default exclusion radius around event-bearing windows, in hours.
    pub const DEFAULT_EXCLUSION_RADIUS_HOURS: f64 = 2.0;

    /// Layer name given to manually validated seizure markings.
    pub const MANUAL_LAYER: &str = "manual_validation";

    /// Description and kind given to manually validated seizure markings.
    pub const SEIZURE: &str = "seizure";

    /// Annotator used when a seizure table has no source column.
    pub const UNKNOWN_ANNOTATOR: &str = "Unknown";

    /// Descriptions dropped by the empty-pool fallback pass.
    pub const DEFAULT_IGNORED_DESCRIPTIONS: &[&str] = &[
        "Tech notation: Video/EEG monitoring taking place",
        "interictal",
    ];

    /// Separator used when joining set-valued window fields for tables.
    pub const JOIN_SEPARATOR: &str = ", ";
}

/// Circadian defaults.
pub mod circadian {
    /// First hour (inclusive) counted as night.
    pub const DEFAULT_NIGHT_START_HOUR: u32 = 19;

    /// First hour (inclusive) counted as day again.
    pub const DEFAULT_NIGHT_END_HOUR: u32 = 8;

    /// Day index of the acclimation day excluded from selection.
    pub const ACCLIMATION_DAY: i64 = 1;

    /// EDF de-identified recordings carry this start date; treated as unknown.
    pub const EDF_ANONYMIZED_DATE: (i32, u32, u32) = (1985, 1, 1);

    /// Date used to anchor bare time-of-day values.
    pub const TIME_ONLY_BASE_DATE: (i32, u32, u32) = (2000, 1, 1);
}

/// Selection defaults.
pub mod selection {
    /// Default maximum number of windows kept from the longest segment.
    pub const DEFAULT_CAP_WINDOWS: usize = 30;
}

/// Output file names.
pub mod output_files {
    /// Annotated-window table.
    pub const WINDOW_TABLE: &str = "clips.csv";
    /// Merged annotation table.
    pub const ANNOTATION_TABLE: &str = "annotations.csv";
    /// Recording summary.
    pub const METADATA: &str = "metadata.json";
    /// Per-group clip attribute manifest.
    pub const CLIP_ATTRIBUTES: &str = "attributes.json";
    /// Default prefix for clip group containers.
    pub const DEFAULT_CLIP_PREFIX: &str = "interictal_ieeg";
}
