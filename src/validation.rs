//! Input checks shared by game-record ingestion and player registration

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

use crate::shared::AppError;

/// Required length of a client-generated device identifier
pub const DEVICE_ID_LEN: usize = 32;

/// Wire format for timestamps in ranking responses
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("device id must be exactly 32 characters, got {0}")]
    DeviceIdLength(usize),

    #[error("{0} is empty")]
    EmptyTimestamp(&'static str),

    #[error("{field} is not a recognised timestamp: {value:?}")]
    UnparseableTimestamp { field: &'static str, value: String },

    #[error("overTime must be later than createdTime")]
    CompletionNotAfterStart,
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::Validation(failure.to_string())
    }
}

/// A device identifier that is known to be exactly [`DEVICE_ID_LEN`] bytes long
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn parse(raw: &str) -> Result<Self, ValidationFailure> {
        if raw.len() != DEVICE_ID_LEN {
            return Err(ValidationFailure::DeviceIdLength(raw.len()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Parses a client timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]`, the same with a `T` separator, or RFC 3339.
/// Offsets are normalised to UTC; offset-less values are taken as-is.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<NaiveDateTime, ValidationFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationFailure::EmptyTimestamp(field));
    }

    for format in ACCEPTED_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .map_err(|_| ValidationFailure::UnparseableTimestamp {
            field,
            value: raw.to_string(),
        })
}

/// Validates a start/finish pair, returning both parsed timestamps
pub fn validate_game_window(
    created: &str,
    completed: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), ValidationFailure> {
    let completed_at = parse_timestamp("overTime", completed)?;
    let created_at = parse_timestamp("createdTime", created)?;

    if completed_at <= created_at {
        return Err(ValidationFailure::CompletionNotAfterStart);
    }

    Ok((created_at, completed_at))
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_device_id_accepts_exactly_32_chars() {
        let raw = "a".repeat(32);
        let id = DeviceId::parse(&raw).unwrap();
        assert_eq!(id.into_inner(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("short")]
    #[case("0123456789abcdef0123456789abcde")]
    #[case("0123456789abcdef0123456789abcdef0")]
    fn test_device_id_rejects_wrong_length(#[case] raw: &str) {
        assert_eq!(
            DeviceId::parse(raw),
            Err(ValidationFailure::DeviceIdLength(raw.len()))
        );
    }

    #[rstest]
    #[case("2024-01-01 10:00:00.000", 0)]
    #[case("2024-01-01 10:00:00", 0)]
    #[case("2024-01-01T10:00:00.250", 250)]
    #[case("2024-01-01T12:00:00+02:00", 0)]
    fn test_parse_timestamp_formats(#[case] raw: &str, #[case] millis: u32) {
        let parsed = parse_timestamp("createdTime", raw).unwrap();
        assert_eq!(format_timestamp(&parsed), format!("2024-01-01 10:00:00.{:03}", millis));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("overTime", "yesterday").unwrap_err();
        assert!(matches!(
            err,
            ValidationFailure::UnparseableTimestamp { field: "overTime", .. }
        ));
    }

    #[rstest]
    #[case("", "2024-01-01 10:05:00.000", ValidationFailure::EmptyTimestamp("createdTime"))]
    #[case("2024-01-01 10:00:00.000", "", ValidationFailure::EmptyTimestamp("overTime"))]
    #[case(
        "2024-01-01 10:05:00.000",
        "2024-01-01 10:00:00.000",
        ValidationFailure::CompletionNotAfterStart
    )]
    #[case(
        "2024-01-01 10:00:00.000",
        "2024-01-01 10:00:00.000",
        ValidationFailure::CompletionNotAfterStart
    )]
    fn test_game_window_rejections(
        #[case] created: &str,
        #[case] completed: &str,
        #[case] expected: ValidationFailure,
    ) {
        assert_eq!(validate_game_window(created, completed), Err(expected));
    }

    #[test]
    fn test_game_window_compares_time_not_text() {
        // 'T' sorts after ' ' as text, so a string comparison would reject this pair
        let result = validate_game_window("2024-01-01T09:59:59", "2024-01-01 10:00:00");
        assert!(result.is_ok());
    }
}
