//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an ISO date or date-time string down to its calendar date
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Format a date in full format (like "January 5, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format an ISO date string in full format, if it parses
pub fn full_date_str(s: &str) -> Option<String> {
    parse_iso_date(s).map(|d| full_date(&d))
}
