//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse and validate a bounded float value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_float(s: &str, min: f64, max: f64, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{name} must be between {min} and {max}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a positive integer.
fn parse_positive(s: &str, name: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid whole number"))?;

    if value == 0 {
        return Err(format!("{name} must be at least 1"));
    }

    Ok(value)
}

/// Parse and validate a recording duration in seconds (non-negative).
pub fn parse_duration_secs(s: &str) -> Result<f64, String> {
    // Bounded so the value fits in i64 microseconds.
    parse_bounded_float(s, 0.0, 9.0e12, "duration")
}

/// Parse and validate an exclusion radius in hours (non-negative).
pub fn parse_radius_hours(s: &str) -> Result<f64, String> {
    parse_bounded_float(s, 0.0, 1.0e6, "radius")
}

/// Parse and validate a window length in seconds (at least 1).
pub fn parse_window_secs(s: &str) -> Result<u64, String> {
    parse_positive(s, "window length")
}

/// Parse and validate a window cap (at least 1).
pub fn parse_cap_windows(s: &str) -> Result<usize, String> {
    let value = parse_positive(s, "cap")?;
    usize::try_from(value).map_err(|_| format!("cap {value} is too large"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounded_float_valid() {
        assert_eq!(
            parse_bounded_float("50.0", -100.0, 100.0, "test").ok(),
            Some(50.0)
        );
        assert_eq!(
            parse_bounded_float("100.0", -100.0, 100.0, "test").ok(),
            Some(100.0)
        );
    }

    #[test]
    fn test_parse_bounded_float_invalid() {
        let err = parse_bounded_float("101.0", -100.0, 100.0, "test");
        assert!(err.unwrap_err().contains("test must be between"));

        let err = parse_bounded_float("abc", -100.0, 100.0, "test");
        assert!(err.unwrap_err().contains("not a valid number"));

        assert!(parse_bounded_float("NaN", -100.0, 100.0, "test").is_err());
    }

    #[test]
    fn test_parse_duration_secs() {
        assert_eq!(parse_duration_secs("0").ok(), Some(0.0));
        assert_eq!(parse_duration_secs("86400.5").ok(), Some(86400.5));
        assert!(parse_duration_secs("-1").is_err());
        assert!(parse_duration_secs("inf").is_err());
    }

    #[test]
    fn test_parse_radius_hours() {
        assert_eq!(parse_radius_hours("0.5").ok(), Some(0.5));
        assert!(parse_radius_hours("-0.5").is_err());
    }

    #[test]
    fn test_parse_window_secs_and_cap() {
        assert_eq!(parse_window_secs("60").ok(), Some(60));
        assert!(parse_window_secs("0").is_err());
        assert!(parse_window_secs("1.5").is_err());
        assert_eq!(parse_cap_windows("30").ok(), Some(30));
        assert!(parse_cap_windows("0").is_err());
    }
}
