//! Scheduled-instant math shared by the reminder cycle and the interpreter.
//!
//! A task's scheduled instant is its local wall-clock date plus time of day.
//! Both halves must be present; a task missing either is unscheduled and is
//! never reminder-eligible.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Storage and wire format for scheduled dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage and wire format for scheduled times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Duration applied when none (or a non-positive one) is given.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Placeholder the classifier emits for a date or time it could not determine.
pub const UNDETERMINED: &str = "TBD";

/// Combine a date and a time into a scheduled instant.
#[must_use]
pub fn scheduled_instant(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    Some(date?.and_time(time?))
}

/// Whole minutes from `now` until `instant`, rounded toward negative infinity.
///
/// An instant 9 minutes 59 seconds away yields 9; one 30 seconds in the past
/// yields -1.
#[must_use]
pub fn minutes_until(instant: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (instant - now).num_milliseconds().div_euclid(60_000)
}

/// Lead-time window (inclusive, in whole minutes) during which a reminder may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderWindow {
    pub start_minutes: i64,
    pub end_minutes: i64,
}

impl ReminderWindow {
    #[must_use]
    pub const fn new(start_minutes: i64, end_minutes: i64) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    #[must_use]
    pub const fn contains(&self, minutes_until: i64) -> bool {
        minutes_until >= self.start_minutes && minutes_until <= self.end_minutes
    }

    /// The calendar dates a due task can fall on, given the current time.
    ///
    /// Used to bound the candidate query so the store never rescans history.
    #[must_use]
    pub fn date_span(&self, now: NaiveDateTime) -> (NaiveDate, NaiveDate) {
        let earliest = now + Duration::minutes(self.start_minutes);
        let latest = now + Duration::minutes(self.end_minutes + 1);
        (earliest.date(), latest.date())
    }
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self::new(9, 10)
    }
}

/// Whether a task starting `minutes_until` from now is inside the upcoming horizon.
#[must_use]
pub const fn is_upcoming(minutes_until: i64, horizon_minutes: i64) -> bool {
    minutes_until > 0 && minutes_until <= horizon_minutes
}

/// Parse a scheduled date, treating blank input and the undetermined marker as unscheduled.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the value is present but not `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let raw = raw.trim();
    if is_undetermined(raw) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| CoreError::Validation(format!("invalid date '{raw}': {e}")))
}

/// Parse a scheduled time of day, treating blank input and the undetermined marker as unscheduled.
///
/// Accepts `HH:MM` and `HH:MM:SS`; seconds are dropped.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the value is present but not a time of day.
pub fn parse_time(raw: &str) -> Result<Option<NaiveTime>, CoreError> {
    let raw = raw.trim();
    if is_undetermined(raw) {
        return Ok(None);
    }
    parse_hhmm(raw).map(Some)
}

fn parse_hhmm(raw: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t))
        .map_err(|e| CoreError::Validation(format!("invalid time '{raw}': {e}")))
}

fn is_undetermined(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case(UNDETERMINED)
}

/// Resolve a requested duration, falling back to the default for absent or non-positive values.
#[must_use]
pub fn normalize_duration(requested: Option<i64>) -> u32 {
    requested
        .filter(|minutes| *minutes > 0)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(DEFAULT_DURATION_MINUTES)
}

/// Serde adapter keeping optional times in `HH:MM` form.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIME_FORMAT;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_some(&time.format(TIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| super::parse_hhmm(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn instant_requires_both_halves() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 17);
        let time = NaiveTime::from_hms_opt(14, 0, 0);
        assert_eq!(
            scheduled_instant(date, time),
            Some(at("2024-09-17", "14:00:00"))
        );
        assert_eq!(scheduled_instant(date, None), None);
        assert_eq!(scheduled_instant(None, time), None);
    }

    #[rstest]
    #[case("10:00:00", 10)]
    #[case("10:00:30", 9)]
    #[case("10:09:00", 1)]
    #[case("10:09:30", 0)]
    #[case("10:10:30", -1)]
    #[case("09:40:00", 30)]
    fn minutes_until_floors(#[case] now: &str, #[case] expected: i64) {
        let instant = at("2024-09-16", "10:10:00");
        assert_eq!(minutes_until(instant, at("2024-09-16", now)), expected);
    }

    #[rstest]
    #[case(8, false)]
    #[case(9, true)]
    #[case(10, true)]
    #[case(11, false)]
    fn default_window_is_nine_to_ten(#[case] minutes: i64, #[case] inside: bool) {
        assert_eq!(ReminderWindow::default().contains(minutes), inside);
    }

    #[test]
    fn date_span_crosses_midnight() {
        let window = ReminderWindow::default();
        let (from, to) = window.date_span(at("2024-09-16", "23:50:00"));
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 9, 16).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 9, 17).unwrap());
    }

    #[test]
    fn date_span_same_day() {
        let (from, to) = ReminderWindow::default().date_span(at("2024-09-16", "12:00:00"));
        assert_eq!(from, to);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(60, true)]
    #[case(61, false)]
    fn upcoming_horizon_excludes_now(#[case] minutes: i64, #[case] upcoming: bool) {
        assert_eq!(is_upcoming(minutes, 60), upcoming);
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case("TBD")]
    #[case("tbd")]
    fn undetermined_dates_are_unscheduled(#[case] raw: &str) {
        assert_eq!(parse_date(raw).unwrap(), None);
        assert_eq!(parse_time(raw).unwrap(), None);
    }

    #[test]
    fn parses_valid_date_and_time() {
        assert_eq!(
            parse_date("2024-09-17").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 17)
        );
        assert_eq!(parse_time("14:00").unwrap(), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(
            parse_time("14:05:33").unwrap(),
            NaiveTime::from_hms_opt(14, 5, 0)
        );
    }

    #[test]
    fn rejects_malformed_schedule() {
        assert!(matches!(parse_date("17/09/2024"), Err(CoreError::Validation(_))));
        assert!(matches!(parse_time("2pm"), Err(CoreError::Validation(_))));
        assert!(matches!(parse_time("25:00"), Err(CoreError::Validation(_))));
    }

    #[rstest]
    #[case(None, 60)]
    #[case(Some(0), 60)]
    #[case(Some(-15), 60)]
    #[case(Some(30), 30)]
    fn duration_defaults_when_not_positive(#[case] requested: Option<i64>, #[case] expected: u32) {
        assert_eq!(normalize_duration(requested), expected);
    }
}
