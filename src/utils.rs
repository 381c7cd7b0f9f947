//! Small formatting helpers shared by the pipeline stages.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Format a timestamp as `Month DD, YYYY`, e.g. `October 08, 2026`.
pub fn long_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%B %d, %Y").to_string()
}

/// Turn a category identifier into a section header.
///
/// ```ignore
/// assert_eq!(section_header("supply_chain"), "SUPPLY CHAIN");
/// ```
pub fn section_header(category: &str) -> String {
    category.to_uppercase().replace('_', " ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count appended.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
