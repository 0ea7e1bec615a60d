//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tick_core::schedule::{DATE_FORMAT, TIME_FORMAT};

use crate::error::DatabaseError;

/// Format used for claim timestamps. Fixed width so string comparison orders correctly.
pub const CLAIM_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable `YYYY-MM-DD` column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if a stored value is not a date.
pub fn get_opt_date(row: &libsql::Row, idx: i32) -> Result<Option<NaiveDate>, DatabaseError> {
    get_opt_string(row, idx)?
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .map_err(|e| DatabaseError::InvalidState(format!("bad scheduled_date '{s}': {e}")))
        })
        .transpose()
}

/// Read a nullable `HH:MM` column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if a stored value is not a time of day.
pub fn get_opt_time(row: &libsql::Row, idx: i32) -> Result<Option<NaiveTime>, DatabaseError> {
    get_opt_string(row, idx)?
        .map(|s| {
            NaiveTime::parse_from_str(&s, TIME_FORMAT)
                .map_err(|e| DatabaseError::InvalidState(format!("bad scheduled_time '{s}': {e}")))
        })
        .transpose()
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

#[must_use]
pub fn date_value(date: Option<NaiveDate>) -> libsql::Value {
    date.map_or(libsql::Value::Null, |d| {
        libsql::Value::Text(d.format(DATE_FORMAT).to_string())
    })
}

#[must_use]
pub fn time_value(time: Option<NaiveTime>) -> libsql::Value {
    time.map_or(libsql::Value::Null, |t| {
        libsql::Value::Text(t.format(TIME_FORMAT).to_string())
    })
}

#[must_use]
pub fn claim_timestamp(at: NaiveDateTime) -> String {
    at.format(CLAIM_TIMESTAMP_FORMAT).to_string()
}
