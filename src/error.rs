//! Error types for ieeg-clips.

/// Result type alias for ieeg-clips operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for ieeg-clips.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Invalid pipeline parameters (window length, duration, radius, cap, gap).
    ///
    /// Fatal for the recording being processed.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// Description of the invalid value.
        message: String,
    },

    /// Failed to open or read an annotation table.
    #[error("failed to parse annotation file '{path}'")]
    EventParse {
        /// Path to the annotation file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Annotation table content is malformed.
    #[error("invalid annotation format: {message}")]
    InvalidEventFormat {
        /// Description of the format error.
        message: String,
    },

    /// Anchor timestamp could not be parsed.
    #[error("invalid anchor time '{value}' (expected YYYY-MM-DD HH:MM:SS or HH:MM:SS)")]
    InvalidAnchor {
        /// The rejected value.
        value: String,
    },

    /// Raw signal file could not be opened.
    #[error("failed to open signal file '{path}'")]
    SignalOpen {
        /// Path to the signal file.
        path: std::path::PathBuf,
        /// Underlying WAV error.
        #[source]
        source: hound::Error,
    },

    /// Requested signal range could not be retrieved.
    #[error("signal unavailable for {start_usec}-{end_usec} usec: {reason}")]
    SignalUnavailable {
        /// Requested range start in microseconds.
        start_usec: i64,
        /// Requested range end in microseconds.
        end_usec: i64,
        /// Why the range could not be fetched.
        reason: String,
    },

    /// Failed to read channel labels file.
    #[error("failed to read channel labels file '{path}'")]
    ChannelLabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a clip file.
    #[error("failed to write clip file '{path}'")]
    ClipWriteFailed {
        /// Path to the clip file.
        path: std::path::PathBuf,
        /// Underlying WAV error.
        #[source]
        source: hound::Error,
    },

    /// Clip sink was used out of order.
    #[error("clip sink misuse: {message}")]
    ClipSinkState {
        /// What went wrong.
        message: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or flush an output file.
    #[error("failed to write file '{path}'")]
    FileWrite {
        /// Path to the file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a CSV table.
    #[error("failed to write table '{path}'")]
    TableWrite {
        /// Path to the table file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
