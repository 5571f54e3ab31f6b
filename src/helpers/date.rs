//! Date helper functions

use chrono::NaiveDateTime;

/// Long US-style date, e.g. `October 5, 2025`
pub fn long_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Date part for `<time datetime>`
pub fn iso_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert a Moment.js style format (`YYYY-MM-DD`, `LL`) to chrono
pub fn moment_to_chrono_format(format: &str) -> String {
    if format == "LL" {
        return "%B %-d, %Y".to_string();
    }

    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
