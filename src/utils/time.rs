use chrono::{DateTime, NaiveDate, Utc};

/// Parse ISO 8601 timestamp string
pub fn parse_iso_timestamp(timestamp_str: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(timestamp_str).map(|dt| dt.with_timezone(&Utc))
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp (the date part is kept).
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_iso_timestamp(trimmed).ok().map(|dt| dt.date_naive()))
}

/// Whole days from `start` to `end`. Negative when `start` is after `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Today's date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = parse_calendar_date("2024-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let date = parse_calendar_date("2024-03-01T22:15:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_calendar_date("last spring").is_none());
        assert!(parse_calendar_date("2024-13-40").is_none());
        assert!(parse_calendar_date("").is_none());
    }

    #[test]
    fn test_days_between() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(days_between(start, end), 365);
        assert_eq!(days_between(end, start), -365);
    }
}
