//! CLI argument definitions.

use crate::cli::validators::{
    parse_cap_windows, parse_duration_secs, parse_radius_hours, parse_window_secs,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Interictal iEEG clip selection and extraction.
#[derive(Debug, Parser)]
#[command(name = "ieeg-clips")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "IEEG_CLIPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors, hide progress bars.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select interictal windows for one recording and extract clips.
    Process(ProcessArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the process command.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Device annotation table (CSV); may be repeated.
    #[arg(long, required = true)]
    pub events: Vec<PathBuf>,

    /// Manual seizure validation table (CSV, seconds); may be repeated.
    #[arg(long)]
    pub seizures: Vec<PathBuf>,

    /// Recording length in seconds, when no signal file is given.
    #[arg(
        long,
        value_parser = parse_duration_secs,
        required_unless_present = "signal",
        conflicts_with = "signal"
    )]
    pub duration_secs: Option<f64>,

    /// Multi-channel WAV recording to cut clips from.
    #[arg(long)]
    pub signal: Option<PathBuf>,

    /// Recording start time (YYYY-MM-DD HH:MM:SS or HH:MM:SS).
    #[arg(long)]
    pub anchor: Option<String>,

    /// Recording file number (default: from `run-N` / `dayN` in file names).
    #[arg(long)]
    pub file_num: Option<u32>,

    /// Channel labels file, one label per line.
    #[arg(long, requires = "signal")]
    pub labels: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Window length in seconds (overrides config).
    #[arg(long, value_parser = parse_window_secs)]
    pub window_secs: Option<u64>,

    /// Exclusion radius in hours (overrides config).
    #[arg(long, value_parser = parse_radius_hours)]
    pub radius_hours: Option<f64>,

    /// Maximum windows kept (overrides config).
    #[arg(long, value_parser = parse_cap_windows)]
    pub cap: Option<usize>,

    /// Write tables only, even when a signal is given.
    #[arg(long)]
    pub no_clips: bool,
}
