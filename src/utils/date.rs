//! Date parsing and formatting for front matter, filters and feeds.

use chrono::{NaiveDate, NaiveTime};

/// Parse a front-matter date.
///
/// Accepts `YYYY-MM-DD` and anything that starts with it
/// (`2026-01-15T09:30:00Z`, `2026-01-15 09:30`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let ymd = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(ymd, "%Y-%m-%d").ok()
}

/// Long human form: `October 18, 2026`.
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// ISO calendar form: `2026-10-18`.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// RFC 2822 timestamp at midnight UTC, for RSS `pubDate`.
pub fn to_rfc2822(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()
}
