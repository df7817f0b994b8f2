use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive layouts accepted for `BaseDateTime`, tried in order after RFC 3339.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layout; such values mean midnight UTC.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an AIS `BaseDateTime` value into a UTC instant.
///
/// AIS exports use naive timestamps such as `2024-01-01T00:00:03`; those are
/// interpreted as UTC. A bare date such as `2024-01-01` is midnight UTC. Values carrying an explicit offset (RFC 3339) are
/// converted to UTC. Anything else yields `None`, which downstream stages
/// treat as an invalid timestamp rather than an error.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Signed number of seconds from `earlier` to `later`, with millisecond resolution.
pub fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 1000.0
}
