//! Timestamp helpers
//!
//! The backend sends `createdAt`/`updatedAt` either as RFC 3339 strings or as
//! naive ISO timestamps without an offset. Both are accepted here and
//! normalised to UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Parse a backend timestamp.
///
/// Returns `None` if the string matches none of the accepted formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar year of a backend timestamp
pub fn year_of(s: &str) -> Option<i32> {
    parse_timestamp(s).map(|dt| dt.year())
}

/// Short `YYYY-MM-DD` rendering used by the listing pages
pub fn format_date(s: &str) -> Option<String> {
    parse_timestamp(s).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Year on the local clock, for copyright lines
pub fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_naive_forms() {
        assert_eq!(year_of("2023-05-01T10:00:00Z"), Some(2023));
        assert_eq!(year_of("2021-12-31T23:59:59.1234567"), Some(2021));
        assert_eq!(year_of("2020-02-29"), Some(2020));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn formats_day() {
        assert_eq!(
            format_date("2024-03-07T08:15:00+02:00").as_deref(),
            Some("2024-03-07")
        );
    }

    #[test]
    fn current_year_matches_clock() {
        let year = current_year();
        assert!(year >= 2024);
        assert_eq!(year_of(&Utc::now().to_rfc3339()), Some(year));
    }
}
