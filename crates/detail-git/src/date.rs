// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Permissive date parsing
//!
//! Dates reach us from `git log` in whatever format was requested, and from
//! hand-written note files. Anything that cannot be understood becomes `None`
//! rather than an error.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Formats with an explicit offset, tried in order
const OFFSET_FORMATS: &[&str] = &[
    // git's default (`%ad` without --date)
    "%a %b %e %H:%M:%S %Y %z",
    // --date=iso
    "%Y-%m-%d %H:%M:%S %z",
];

/// Formats without an offset, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a timestamp in any of the formats git or a person is likely to write.
///
/// Accepts RFC 3339 (`--date=iso-strict`), RFC 2822, git's default and
/// `--date=iso` formats, naive date-times (UTC) and bare dates (midnight UTC).
#[must_use]
pub fn parse_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date);
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Some(date);
    }
    for format in OFFSET_FORMATS {
        if let Ok(date) = DateTime::parse_from_str(input, format) {
            return Some(date);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).fixed_offset())
}
