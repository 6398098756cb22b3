//! Recording anchor time parsing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::circadian::{EDF_ANONYMIZED_DATE, TIME_ONLY_BASE_DATE};
use crate::error::{Error, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Parse an anchor time string.
///
/// Accepts a full naive timestamp or a bare time of day. A bare time is
/// placed on a fixed base date, since only hour of day and elapsed time are
/// used downstream. Empty input, `none`, and the EDF anonymization date
/// yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`Error::InvalidAnchor`] if the value matches no known format.
pub fn parse_anchor(value: &str) -> Result<Option<NaiveDateTime>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    if let Some(parsed) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(known_anchor(parsed));
    }

    if let Some(time) = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
    {
        let (y, m, d) = TIME_ONLY_BASE_DATE;
        return Ok(NaiveDate::from_ymd_opt(y, m, d).map(|date| date.and_time(time)));
    }

    Err(Error::InvalidAnchor {
        value: trimmed.to_string(),
    })
}

/// Drop anchors carrying the EDF de-identification date.
pub fn known_anchor(anchor: NaiveDateTime) -> Option<NaiveDateTime> {
    let (y, m, d) = EDF_ANONYMIZED_DATE;
    if NaiveDate::from_ymd_opt(y, m, d) == Some(anchor.date()) {
        None
    } else {
        Some(anchor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_full_timestamp() {
        let anchor = parse_anchor("2024-01-01 18:30:00").unwrap().unwrap();
        assert_eq!(anchor.hour(), 18);
        assert_eq!(anchor.minute(), 30);

        let iso = parse_anchor("2024-01-01T18:30:00.250").unwrap().unwrap();
        assert_eq!(iso.hour(), 18);
    }

    #[test]
    fn test_parse_time_of_day() {
        let anchor = parse_anchor("07:45:10").unwrap().unwrap();
        assert_eq!(anchor.hour(), 7);
        assert_eq!(anchor.second(), 10);
    }

    #[test]
    fn test_absent_anchor() {
        assert!(parse_anchor("").unwrap().is_none());
        assert!(parse_anchor("  None ").unwrap().is_none());
    }

    #[test]
    fn test_anonymized_edf_date_is_unknown() {
        assert!(parse_anchor("1985-01-01 10:11:12").unwrap().is_none());
    }

    #[test]
    fn test_invalid_anchor() {
        assert!(matches!(
            parse_anchor("yesterday"),
            Err(Error::InvalidAnchor { .. })
        ));
    }
}
