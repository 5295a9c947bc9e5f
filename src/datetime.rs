//! Date/time helpers for API responses.

use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC datetime as ISO-8601 with millisecond precision.
///
/// Example: `2024-01-15T10:30:00.000Z`
pub fn to_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an ISO-8601 timestamp.
pub fn now_iso() -> String {
    to_iso_millis(&Utc::now())
}

/// Milliseconds elapsed since `start`.
pub fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_iso_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(to_iso_millis(&dt), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_now_iso_parses() {
        let now = now_iso();
        assert!(now.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
    }

    #[test]
    fn test_elapsed_ms() {
        let start = Instant::now();
        assert!(elapsed_ms(start) < 1000);
    }
}
