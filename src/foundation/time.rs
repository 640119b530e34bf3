use chrono::{DateTime, SecondsFormat, Utc};

/// Seconds in one UTC day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Whole seconds since the Unix epoch. Instants before the epoch map to 0.
pub fn unix_seconds(now: DateTime<Utc>) -> u64 {
    u64::try_from(now.timestamp()).unwrap_or(0)
}

/// Whole days since the Unix epoch (floor).
pub fn days_since_epoch(now: DateTime<Utc>) -> u64 {
    unix_seconds(now) / SECONDS_PER_DAY
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
pub fn iso8601(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Instant at `secs` seconds after the epoch, saturating at chrono's maximum.
pub fn from_unix_seconds(secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
