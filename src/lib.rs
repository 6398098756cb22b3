//! ieeg-clips - interictal clip selection for long iEEG recordings.
//!
//! Recordings are cut into fixed windows, annotated against clinical
//! events, classified by day and night, and reduced to one contiguous
//! stretch of clean daytime windows that is extracted as clips.

#![warn(missing_docs)]

pub mod annotate;
pub mod circadian;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod selection;
pub mod utils;
pub mod window;

use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use config::{Config, config_file_path, load_default_config, save_default_config};
use std::path::Path;

pub use error::{Error, Result};

/// Main entry point for the ieeg-clips CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    handle_command(&cli.command, cli.config.as_deref(), !cli.quiet)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: &Command, config_path: Option<&Path>, show_progress: bool) -> Result<()> {
    match command {
        Command::Process(args) => {
            let config = load_default_config(config_path)?;
            pipeline::command::execute(args, &config, show_progress)
        }
        Command::Config { action } => handle_config_command(*action, config_path),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = match config_path {
                Some(path) => path.to_path_buf(),
                None => config_file_path()?,
            };
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default(), Some(&path))?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config(config_path)?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = match config_path {
                Some(path) => path.to_path_buf(),
                None => config_file_path()?,
            };
            println!("{}", path.display());
            Ok(())
        }
    }
}
