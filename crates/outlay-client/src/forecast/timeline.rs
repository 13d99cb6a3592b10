use chrono::NaiveDateTime;

use crate::input::date::month_end_after;

/// `periods` month-end timestamps strictly after `last`, oldest first.
///
/// Month ends carry the time of day of `last`, so a history ending exactly on
/// a month end starts the timeline at the following month.
pub fn month_end_timeline(last: NaiveDateTime, periods: usize) -> Vec<NaiveDateTime> {
    let time_of_day = last.time();
    let start = last.date();

    (0..=periods)
        .filter_map(|offset| u32::try_from(offset).ok())
        .map(|offset| month_end_after(start, offset).and_time(time_of_day))
        .filter(|candidate| *candidate > last)
        .take(periods)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::month_end_timeline;
    use crate::input::date::format_iso_date;

    fn at_midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or(NaiveDate::MIN)
            .and_time(NaiveTime::MIN)
    }

    fn dates(timeline: &[NaiveDateTime]) -> Vec<String> {
        timeline
            .iter()
            .map(|value| format_iso_date(&value.date()))
            .collect()
    }

    #[test]
    fn mid_month_history_starts_at_current_month_end() {
        let timeline = month_end_timeline(at_midnight(2025, 1, 15), 12);
        let labels = dates(&timeline);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "2025-01-31");
        assert_eq!(labels[1], "2025-02-28");
        assert_eq!(labels[11], "2025-12-31");
    }

    #[test]
    fn month_end_history_is_excluded() {
        let timeline = month_end_timeline(at_midnight(2024, 12, 31), 12);
        let labels = dates(&timeline);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "2025-01-31");
        assert_eq!(labels[11], "2025-12-31");
    }

    #[test]
    fn timeline_is_strictly_increasing() {
        let timeline = month_end_timeline(at_midnight(2023, 11, 30), 12);
        assert!(timeline.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(timeline.iter().all(|value| *value > at_midnight(2023, 11, 30)));
    }
}
