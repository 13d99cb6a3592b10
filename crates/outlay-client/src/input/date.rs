use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Format accepted by the aggregation path, and written by the upstream producer.
pub const MONTH_FIRST_FORMAT: &str = "%m-%d-%Y";
pub const MONTH_FIRST_LABEL: &str = "MM-DD-YYYY";
pub const LENIENT_LABEL: &str = "an ISO 8601 date/datetime or MM-DD-YYYY";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", MONTH_FIRST_FORMAT, "%m/%d/%Y"];

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a timestamp the way the forecast path does: ISO shapes first, then
/// month-first calendar dates. Offsets are converted to UTC.
pub fn parse_lenient_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed.and_time(NaiveTime::MIN));
        }
    }

    None
}

pub fn parse_month_first_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_month_first_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, MONTH_FIRST_FORMAT).ok()
}

/// Month end `months` months after the month containing `date`.
pub fn month_end_after(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = i64::from(date.month0()) + i64::from(months);
    let year = date.year() + i32::try_from(zero_based / 12).unwrap_or(0);
    let month = u32::try_from(zero_based % 12).unwrap_or(0) + 1;
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).unwrap_or(date)
}

fn looks_like_month_first_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[2] != b'-' || bytes[5] != b'-' {
        return false;
    }

    for index in [0usize, 1, 3, 4, 6, 7, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        format_iso_date, month_end_after, parse_lenient_timestamp,
        parse_month_first_date,
    };

    #[test]
    fn lenient_parsing_accepts_iso_and_month_first_shapes() {
        let cases = [
            ("2025-03-14", "2025-03-14 00:00:00"),
            ("2025-03-14T09:30:00", "2025-03-14 09:30:00"),
            ("2025-03-14 09:30:00.250", "2025-03-14 09:30:00.250"),
            ("2025-03-14T09:30:00+02:00", "2025-03-14 07:30:00"),
            ("03-14-2025", "2025-03-14 00:00:00"),
            ("03/14/2025", "2025-03-14 00:00:00"),
        ];

        for (raw, expected) in cases {
            let parsed = parse_lenient_timestamp(raw);
            assert!(parsed.is_some(), "expected `{raw}` to parse");
            if let Some(value) = parsed {
                assert_eq!(value.to_string(), expected);
            }
        }
    }

    #[test]
    fn lenient_parsing_rejects_garbage() {
        assert!(parse_lenient_timestamp("").is_none());
        assert!(parse_lenient_timestamp("yesterday").is_none());
        assert!(parse_lenient_timestamp("2025-13-40").is_none());
    }

    #[test]
    fn strict_parsing_only_accepts_month_first_dashes() {
        assert_eq!(
            parse_month_first_date("01-15-2025"),
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
        assert!(parse_month_first_date("2025-01-15").is_none());
        assert!(parse_month_first_date("01/15/2025").is_none());
        assert!(parse_month_first_date("1-15-2025").is_none());
        assert!(parse_month_first_date("02-30-2025").is_none());
    }

    #[test]
    fn month_end_handles_leap_years_and_year_rollover() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 3);
        assert!(leap.is_some());
        if let Some(value) = leap {
            assert_eq!(format_iso_date(&month_end_after(value, 0)), "2024-02-29");
            assert_eq!(format_iso_date(&month_end_after(value, 11)), "2025-01-31");
            assert_eq!(format_iso_date(&month_end_after(value, 12)), "2025-02-28");
        }
    }
}
