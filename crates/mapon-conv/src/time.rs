//! Timestamp parsing
//!
//! Unit, route and alert fields use RFC3339. Most `unit_data` series use a
//! bare `YYYY-MM-DD HH:MM:SS` string which is always UTC. A value that does
//! not parse is treated as absent; the caller never sees an error.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use tracing::trace;

/// Format of the bare timestamps used by the unit data endpoints
pub const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an RFC3339 timestamp, normalized to UTC
pub fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            trace!(value = raw, error = %e, "dropping malformed RFC3339 timestamp");
            None
        }
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp as UTC
pub fn parse_local(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(raw, LOCAL_FORMAT) {
        Ok(t) => Some(t.and_utc()),
        Err(e) => {
            trace!(value = raw, error = %e, "dropping malformed timestamp");
            None
        }
    }
}

/// Format a timestamp the way the API expects it in query parameters
pub fn format_rfc3339(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2017, 5, 22, 12, 23, 46).unwrap();
        assert_eq!(parse_rfc3339("2017-05-22T12:23:46Z"), Some(expected));
        assert_eq!(parse_rfc3339("2017-05-22T15:23:46+03:00"), Some(expected));
    }

    #[test]
    fn test_parse_rfc3339_rejects_local_format() {
        assert_eq!(parse_rfc3339("2017-05-22 12:23:46"), None);
        assert_eq!(parse_rfc3339(""), None);
        assert_eq!(parse_rfc3339("yesterday"), None);
    }

    #[test]
    fn test_parse_local() {
        let expected = Utc.with_ymd_and_hms(2021, 1, 1, 10, 5, 0).unwrap();
        assert_eq!(parse_local("2021-01-01 10:05:00"), Some(expected));
    }

    #[test]
    fn test_parse_local_rejects_rfc3339() {
        assert_eq!(parse_local("2021-01-01T10:05:00Z"), None);
        assert_eq!(parse_local("0000-00-00 00:00:00"), None);
        assert_eq!(parse_local(""), None);
    }

    #[test]
    fn test_format_rfc3339() {
        let time = Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(format_rfc3339(&time), "2021-01-01T10:00:00Z");
    }
}
