//! Display formatting for episode fields.

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime};

/// Naive layouts accepted when a timestamp carries no offset. Read as UTC.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a duration in seconds as `HH:MM:SS`.
///
/// Every field is zero-padded to two digits. Hours are not capped, so
/// `format_duration(360_000)` is `"100:00:00"`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse an ISO-8601 publication timestamp.
///
/// Accepts RFC 3339 (`2021-05-10T00:00:00Z`, `2021-05-10T08:00:00-03:00`),
/// offset-less date-times and bare dates. Returns `None` for anything else.
pub fn parse_published_at(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Format a publication date as `d MMM yy` in Brazilian Portuguese,
/// e.g. `10 mai 21`. The calendar day is taken in the timestamp's own offset.
pub fn format_published_at(date: &DateTime<FixedOffset>) -> String {
    date.format_localized("%-d %b %y", Locale::pt_BR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_examples() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(3725), "01:02:05");
        assert_eq!(format_duration(86_399), "23:59:59");
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn test_format_duration_reassembles() {
        for seconds in (0..200_000u64).step_by(7).chain([u64::MAX / 2]) {
            let formatted = format_duration(seconds);
            let parts: Vec<&str> = formatted.split(':').collect();
            assert_eq!(parts.len(), 3, "{formatted}");
            assert!(parts.iter().all(|p| p.len() >= 2), "{formatted}");

            let h: u64 = parts[0].parse().unwrap();
            let m: u64 = parts[1].parse().unwrap();
            let s: u64 = parts[2].parse().unwrap();
            assert!(m < 60 && s < 60);
            assert_eq!(3600 * h + 60 * m + s, seconds);
        }
    }

    #[test]
    fn test_published_at_pt_br() {
        let date = parse_published_at("2021-05-10T00:00:00Z").unwrap();
        assert_eq!(format_published_at(&date), "10 mai 21");

        let date = parse_published_at("2021-01-22 19:01:00").unwrap();
        assert_eq!(format_published_at(&date), "22 jan 21");

        let date = parse_published_at("2020-12-03").unwrap();
        assert_eq!(format_published_at(&date), "3 dez 20");
    }

    #[test]
    fn test_published_at_keeps_offset_day() {
        // Still the 9th in Sao Paulo even though it is the 10th in UTC.
        let date = parse_published_at("2021-05-09T22:30:00-03:00").unwrap();
        assert_eq!(format_published_at(&date), "9 mai 21");
    }

    #[test]
    fn test_published_at_rejects_garbage() {
        assert!(parse_published_at("").is_none());
        assert!(parse_published_at("yesterday").is_none());
        assert!(parse_published_at("2021-13-40").is_none());
    }
}
