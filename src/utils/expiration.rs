//! Expiration timestamp parsing and policy checks.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::AppError;

/// Sentinel value clients send to clear an expiration. Matched exactly.
pub const PERMANENT_SENTINEL: &str = "permanent";

/// Parses a client-supplied expiration into a UTC timestamp.
///
/// Absent, empty, and `"permanent"` inputs all mean "no expiration".
/// Accepted formats, tried in order:
///
/// 1. RFC 3339 with offset (`2025-07-01T12:00:00+02:00`), converted to UTC
/// 2. Naive datetime (`2025-07-01T12:00:00`), assumed to already be UTC
/// 3. Bare date (`2025-07-01`), taken as midnight UTC
///
/// # Errors
///
/// Returns [`AppError::InvalidExpiration`] when the input matches none of
/// the accepted formats.
pub fn parse_expiration(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if raw.is_empty() || raw == PERMANENT_SENTINEL {
        return Ok(None);
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(with_offset.with_timezone(&Utc)));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }

    Err(AppError::invalid_expiration(raw))
}

/// Parses an expiration and enforces that it lies in the future.
///
/// This is the write-path entry point: both creation and edits refuse
/// timestamps at or before now, so a record can never be born expired.
///
/// # Errors
///
/// Returns [`AppError::InvalidExpiration`] on unparseable input and
/// [`AppError::ExpirationInPast`] when the timestamp is not in the future.
pub fn resolve_expiration(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let parsed = parse_expiration(raw)?;

    if let Some(expires_at) = parsed {
        if expires_at <= Utc::now() {
            return Err(AppError::expiration_in_past(expires_at));
        }
    }

    Ok(parsed)
}
