//! Parsing and formatting of transaction timestamps.
//!
//! Timestamps are always handled in UTC. Strings without an offset are taken
//! to already be in UTC, strings with an offset are converted.

use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::well_known::{Iso8601, Rfc3339},
};

use crate::Error;

/// Parse an ISO 8601 date-time string and convert it to UTC.
///
/// Accepts `2025-10-14T15:37:41Z`, `2025-10-14T10:37:41-05:00` and the naive
/// `2025-10-14T15:37:41`, with or without fractional seconds. A space may be
/// used instead of `T` between the date and the time, which is how some
/// databases store date-times.
///
/// # Errors
/// Returns [Error::InvalidTimestamp] if `raw` is not an ISO 8601 date-time,
/// or if the instant falls outside the years -9999 to 9999 once in UTC.
pub fn normalize_timestamp(raw: &str) -> Result<OffsetDateTime, Error> {
    let trimmed = raw.trim();

    let candidate = match trimmed.as_bytes().get(10) {
        Some(b' ') => format!("{}T{}", &trimmed[..10], &trimmed[11..]),
        _ => trimmed.to_owned(),
    };

    if let Ok(timestamp) = OffsetDateTime::parse(&candidate, &Iso8601::DEFAULT) {
        return to_utc(timestamp).ok_or_else(|| Error::InvalidTimestamp(raw.to_owned()));
    }

    PrimitiveDateTime::parse(&candidate, &Iso8601::DEFAULT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| Error::InvalidTimestamp(raw.to_owned()))
}

/// Express `timestamp` as the same instant with a UTC offset.
///
/// Returns `None` if the instant has no representation in UTC, e.g.
/// `9999-12-31T23:00:00-05:00` is in the year 10000 in UTC.
pub fn to_utc(timestamp: OffsetDateTime) -> Option<OffsetDateTime> {
    timestamp.checked_to_offset(UtcOffset::UTC)
}

/// Format a timestamp as an RFC 3339 string in UTC for storage.
///
/// # Errors
/// Returns [Error::InvalidTimestamp] if the timestamp cannot be represented in
/// RFC 3339, i.e. the year in UTC is before 0 or after 9999.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, Error> {
    to_utc(timestamp)
        .and_then(|timestamp| timestamp.format(&Rfc3339).ok())
        .ok_or_else(|| Error::InvalidTimestamp(timestamp.to_string()))
}
