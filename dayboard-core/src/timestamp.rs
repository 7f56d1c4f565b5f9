//! Conversion between typed instants and the editor's local strings.
//!
//! Events carry `DateTime<Utc>` everywhere except inside an open editor,
//! where a human edits a minute-precision, timezone-local string
//! (`YYYY-MM-DDTHH:MM`). The conversions here are the only place that
//! string form exists; going back to UTC must reinterpret the string in
//! the editor's timezone or the instant silently shifts by the UTC offset.

use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};

use crate::error::ApiError;

/// The editor's string format: local date and time, no timezone, no seconds.
pub const EDIT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format an instant as the editor string in the given timezone.
pub fn to_edit_string<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    instant.with_timezone(tz).format(EDIT_FORMAT).to_string()
}

/// Parse an editor string back into a UTC instant.
///
/// Ambiguous local times (the repeated hour when DST ends) resolve to the
/// earliest valid instant. Local times that do not exist (the skipped hour
/// when DST starts) and malformed input are rejected with a validation
/// error rather than serialized as garbage.
pub fn parse_edit_string<Tz>(input: &str, tz: &Tz) -> Result<DateTime<Utc>, ApiError>
where
    Tz: TimeZone,
{
    let naive = NaiveDateTime::parse_from_str(input.trim(), EDIT_FORMAT).map_err(|_| {
        ApiError::Validation(format!(
            "invalid date/time \"{}\" (expected YYYY-MM-DDTHH:MM)",
            input
        ))
    })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ApiError::Validation(format!(
            "\"{}\" does not exist in the local timezone",
            input
        ))),
    }
}

/// Truncate an instant to minute precision.
pub fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp() - instant.timestamp().rem_euclid(60);
    DateTime::from_timestamp(secs, 0).unwrap_or(instant)
}
