//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_windowing(config)?;
    validate_annotation(config)?;
    validate_circadian(config)?;
    validate_selection(config)?;
    validate_output(config)?;
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::Configuration { message }
}

fn validate_windowing(config: &Config) -> Result<()> {
    if config.windowing.window_secs == 0 {
        return Err(invalid("window_secs must be at least 1".to_string()));
    }
    Ok(())
}

fn validate_annotation(config: &Config) -> Result<()> {
    let radius = config.annotation.exclusion_radius_hours;
    if !radius.is_finite() || radius < 0.0 {
        return Err(invalid(format!(
            "exclusion_radius_hours must be a non-negative number, got {radius}"
        )));
    }
    Ok(())
}

fn validate_circadian(config: &Config) -> Result<()> {
    let circadian = &config.circadian;
    for (name, hour) in [
        ("night_start_hour", circadian.night_start_hour),
        ("night_end_hour", circadian.night_end_hour),
    ] {
        if hour > 23 {
            return Err(invalid(format!("{name} must be between 0 and 23, got {hour}")));
        }
    }
    Ok(())
}

fn validate_selection(config: &Config) -> Result<()> {
    let selection = &config.selection;
    if selection.cap_windows == 0 {
        return Err(invalid("cap_windows must be at least 1".to_string()));
    }
    if selection.continuity_gap_secs == Some(0) {
        return Err(invalid("continuity_gap_secs must be at least 1".to_string()));
    }
    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    if config.output.clip_prefix.trim().is_empty() {
        return Err(invalid("clip_prefix must not be empty".to_string()));
    }
    Ok(())
}
