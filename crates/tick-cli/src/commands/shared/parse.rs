use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use tick_core::schedule;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional `--date`. `TBD` or an empty value means unscheduled.
pub fn parse_date_arg(raw: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    Ok(raw.map(schedule::parse_date).transpose()?.flatten())
}

/// Parse an optional `--time`. `TBD` or an empty value means unscheduled.
pub fn parse_time_arg(raw: Option<&str>) -> anyhow::Result<Option<NaiveTime>> {
    Ok(raw.map(schedule::parse_time).transpose()?.flatten())
}
