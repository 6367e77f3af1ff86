/// Versioned timestamp serialization for query embedding
///
/// The direct-query path embeds the write time in insert statements. The
/// format is fixed and locale-independent; bump the version constant when
/// the rendering changes rather than altering it in place.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Version 1 timestamp rendering: UTC, millisecond precision.
pub const TIMESTAMP_FORMAT_V1: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Render a timestamp with the current (v1) format.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT_V1).to_string()
}

/// Parse a v1-rendered timestamp back. Used by tests and by tooling that
/// reads raw table rows.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT_V1)
        .ok()
        .map(|naive| naive.and_utc())
}
