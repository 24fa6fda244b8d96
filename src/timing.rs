//! Lap-time codec
//!
//! Converts timing strings (`"M:SS.sss"` or bare seconds) to seconds and back.
//! Parsing never panics; a bad value comes back as [`InvalidTime`] so the
//! caller can drop the record.

use log::trace;
use std::fmt;

use crate::core::types::LapRecord;

/// Why a timing string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTime {
    /// Empty or whitespace-only input
    Empty,
    /// Non-numeric minutes or seconds
    Malformed,
    /// Leading minus sign
    Negative,
    /// `SS` field of 60 or more
    SecondsOutOfRange,
    /// Zero, or above the context's plausibility ceiling
    ExceedsLimit,
}

impl fmt::Display for InvalidTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty time value"),
            Self::Malformed => write!(f, "time is not in M:SS.sss or seconds form"),
            Self::Negative => write!(f, "time cannot be negative"),
            Self::SecondsOutOfRange => write!(f, "seconds field must be below 60"),
            Self::ExceedsLimit => write!(f, "time is outside the plausible range"),
        }
    }
}

impl std::error::Error for InvalidTime {}

fn is_decimal(field: &str) -> bool {
    !field.is_empty()
        && field.chars().all(|c| c.is_ascii_digit() || c == '.')
        && field.chars().filter(|&c| c == '.').count() <= 1
        && field.chars().any(|c| c.is_ascii_digit())
}

/// Parse `"M:SS.sss"` or a bare seconds value into seconds.
///
/// # Examples
/// ```
/// use lapstat::timing::{parse_time, InvalidTime};
///
/// assert!((parse_time("1:31.447").unwrap() - 91.447).abs() < 1e-9);
/// assert!((parse_time("91.447").unwrap() - 91.447).abs() < 1e-9);
/// assert_eq!(parse_time("abc"), Err(InvalidTime::Malformed));
/// ```
pub fn parse_time(raw: &str) -> Result<f64, InvalidTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InvalidTime::Empty);
    }
    if raw.starts_with('-') {
        return Err(InvalidTime::Negative);
    }

    match raw.split_once(':') {
        Some((minutes, seconds)) => {
            if minutes.is_empty() || !minutes.chars().all(|c| c.is_ascii_digit()) {
                return Err(InvalidTime::Malformed);
            }
            if !is_decimal(seconds) {
                return Err(InvalidTime::Malformed);
            }
            let minutes: u32 = minutes.parse().map_err(|_| InvalidTime::Malformed)?;
            let seconds: f64 = seconds.parse().map_err(|_| InvalidTime::Malformed)?;
            if seconds >= 60.0 {
                return Err(InvalidTime::SecondsOutOfRange);
            }
            Ok(f64::from(minutes) * 60.0 + seconds)
        }
        None => {
            if !is_decimal(raw) {
                return Err(InvalidTime::Malformed);
            }
            raw.parse().map_err(|_| InvalidTime::Malformed)
        }
    }
}

/// Parse a timing string and require it to lie in `(0, ceiling]`.
pub fn parse_lap_time(raw: &str, ceiling: f64) -> Result<f64, InvalidTime> {
    let seconds = parse_time(raw)?;
    if seconds <= 0.0 || seconds > ceiling {
        return Err(InvalidTime::ExceedsLimit);
    }
    Ok(seconds)
}

/// Format seconds as `"M:SS.sss"`, rounding to the millisecond.
///
/// # Examples
/// ```
/// use lapstat::timing::format_time;
///
/// assert_eq!(format_time(91.447), "1:31.447");
/// assert_eq!(format_time(59.9996), "1:00.000");
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-:--.---".to_string();
    }
    let sign = if seconds < 0.0 { "-" } else { "" };
    let millis = (seconds.abs() * 1000.0).round() as u64;
    let minutes = millis / 60_000;
    let rest = millis % 60_000;
    format!("{sign}{minutes}:{:02}.{:03}", rest / 1000, rest % 1000)
}

/// Build a [`LapRecord`] from a raw timing string, or `None` if any part is invalid.
pub fn lap_record_from_raw(driver_id: &str, lap_number: u32, raw: &str) -> Option<LapRecord> {
    let seconds = match parse_time(raw) {
        Ok(seconds) => seconds,
        Err(reason) => {
            trace!("dropping lap {lap_number} for {driver_id}: {reason} ({raw:?})");
            return None;
        }
    };
    match LapRecord::new(driver_id, lap_number, seconds) {
        Ok(record) => Some(record),
        Err(reason) => {
            trace!("dropping lap {lap_number} for {driver_id}: {reason}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_time_minutes_form() {
        assert_close(parse_time("1:31.447").unwrap(), 91.447);
        assert_close(parse_time("0:59.999").unwrap(), 59.999);
        assert_close(parse_time("2:00").unwrap(), 120.0);
    }

    #[test]
    fn test_parse_time_bare_seconds() {
        assert_close(parse_time("91.447").unwrap(), 91.447);
        assert_close(parse_time(" 88 ").unwrap(), 88.0);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert_eq!(parse_time("abc"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time(""), Err(InvalidTime::Empty));
        assert_eq!(parse_time("   "), Err(InvalidTime::Empty));
        assert_eq!(parse_time("1:xx.123"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time(":31.4"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time("1:"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time("1:2:3"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time("inf"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time("1e2"), Err(InvalidTime::Malformed));
        assert_eq!(parse_time("1.2.3"), Err(InvalidTime::Malformed));
    }

    #[test]
    fn test_parse_time_rejects_negative_and_out_of_range() {
        assert_eq!(parse_time("-91.4"), Err(InvalidTime::Negative));
        assert_eq!(parse_time("-1:31.4"), Err(InvalidTime::Negative));
        assert_eq!(parse_time("1:60.000"), Err(InvalidTime::SecondsOutOfRange));
        assert_eq!(parse_time("1:75.1"), Err(InvalidTime::SecondsOutOfRange));
    }

    #[test]
    fn test_parse_lap_time_ceiling() {
        assert_close(parse_lap_time("1:59.000", 120.0).unwrap(), 119.0);
        assert_eq!(
            parse_lap_time("2:00.001", 120.0),
            Err(InvalidTime::ExceedsLimit)
        );
        assert_eq!(parse_lap_time("0", 120.0), Err(InvalidTime::ExceedsLimit));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(91.447), "1:31.447");
        assert_eq!(format_time(61.0), "1:01.000");
        assert_eq!(format_time(5.5), "0:05.500");
        assert_eq!(format_time(125.0004), "2:05.000");
        assert_eq!(format_time(59.9996), "1:00.000");
    }

    #[test]
    fn test_format_time_edge_values() {
        assert_eq!(format_time(-1.5), "-0:01.500");
        assert_eq!(format_time(f64::NAN), "-:--.---");
    }

    #[test]
    fn test_format_then_parse_agrees() {
        for seconds in [65.123, 89.8, 100.0, 119.999] {
            assert_close(parse_time(&format_time(seconds)).unwrap(), seconds);
        }
    }

    #[test]
    fn test_lap_record_from_raw() {
        let lap = lap_record_from_raw("LEC", 4, "1:30.250").unwrap();
        assert_eq!(lap.driver_id, "LEC");
        assert_close(lap.lap_time_seconds, 90.25);

        assert!(lap_record_from_raw("LEC", 4, "garbage").is_none());
        assert!(lap_record_from_raw("LEC", 0, "1:30.250").is_none());
        assert!(lap_record_from_raw("LEC", 5, "0.000").is_none());
    }
}
