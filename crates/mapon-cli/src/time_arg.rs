//! Parsing of `--from`/`--till`/`--datetime` values

use chrono::{DateTime, Utc};
use mapon_conv::{parse_local, parse_rfc3339};

/// Accept RFC3339 or `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn parse_time_arg(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    parse_rfc3339(raw).or_else(|| parse_local(raw)).ok_or_else(|| {
        format!(
            "invalid time '{}', expected RFC3339 (2021-01-01T10:00:00Z) or 'YYYY-MM-DD HH:MM:SS'",
            raw
        )
    })
}
