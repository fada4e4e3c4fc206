//! Timestamp helpers shared by the repositories and the dashboard views.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Current instant as a fixed-width RFC 3339 string (microseconds, `Z`).
///
/// Fixed width keeps lexicographic order equal to chronological order, which
/// the `ORDER BY created_at` listings rely on.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long display date, e.g. `October 16th, 2026`.
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// Format a stored RFC 3339 timestamp for display.
/// Unparseable input is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => format_long_date(&dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("Unparseable timestamp '{}': {}", timestamp, e);
            timestamp.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(format!("{}{}", day, ordinal_suffix(day)), expected);
        }
    }

    #[test]
    fn long_date() {
        let date = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        assert_eq!(format_long_date(&date), "October 16th, 2026");
    }

    #[test]
    fn stored_timestamp() {
        assert_eq!(
            format_timestamp("2023-03-01T12:00:00.000000Z"),
            "March 1st, 2023"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn now_is_fixed_width() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), "2026-10-16T09:30:00.000000Z".len());
        assert!(ts.ends_with('Z'));
    }
}
