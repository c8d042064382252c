//! Recognized ledger date formats.
//!
//! Records arrive from external collaborators with raw string dates. The
//! core keeps those strings verbatim (the reconciliation engine must be
//! able to report the unparseable ones) and parses on use with this
//! helper.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

/// Day-granularity formats accepted besides RFC 3339 timestamps.
const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Error returned when a raw date string matches none of the recognized
/// formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized date: {0:?}")]
pub struct DateParseError(pub String);

/// Parses a raw ledger date string to a calendar day.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, and full RFC 3339 timestamps
/// (truncated to their calendar day).
///
/// # Errors
///
/// Returns [`DateParseError`] if the string matches no recognized format.
pub fn parse_ledger_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();

    for format in DAY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }

    Err(DateParseError(raw.to_string()))
}
