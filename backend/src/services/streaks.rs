//! Full-day scoring and streak counting over logged dates.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use crate::models::daily_log::DayRecord;

pub const MIN_WATER_LITERS: f64 = 3.0;
pub const MIN_READING_MINUTES: i64 = 10;

/// A full day: both workout slots filled, at least 3 L of water and 10 minutes of reading.
pub fn completion_score(record: &DayRecord) -> bool {
    record.has_workout_1
        && record.has_workout_2
        && record.water_liters >= MIN_WATER_LITERS
        && record.reading_minutes >= MIN_READING_MINUTES
}

/// Consecutive logged days ending today, or ending yesterday when today has
/// no log yet. Zero when the latest log is older than yesterday.
pub fn current_streak<I>(dates: I, today: NaiveDate) -> i32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let dates: BTreeSet<NaiveDate> = dates.into_iter().filter(|d| *d <= today).collect();

    let yesterday = today - Duration::days(1);
    let mut check_date = if dates.contains(&today) {
        today
    } else if dates.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0i32;
    while dates.contains(&check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive days inside `[from, to]`, no recency requirement.
pub fn longest_streak_in_range<I>(dates: I, from: NaiveDate, to: NaiveDate) -> i32
where
    I: IntoIterator<Item = NaiveDate>,
{
    longest_run(dates.into_iter().filter(|d| *d >= from && *d <= to))
}

/// Longest run of consecutive days anywhere in the history.
pub fn longest_streak_ever<I>(dates: I) -> i32
where
    I: IntoIterator<Item = NaiveDate>,
{
    longest_run(dates)
}

fn longest_run<I>(dates: I) -> i32
where
    I: IntoIterator<Item = NaiveDate>,
{
    // BTreeSet gives the sorted, de-duplicated order the scan relies on
    let sorted: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut longest = 0i32;
    let mut streak = 0i32;
    let mut prev_date: Option<NaiveDate> = None;

    for date in sorted {
        streak = match prev_date {
            Some(prev) if date == prev + Duration::days(1) => streak + 1,
            _ => 1,
        };
        longest = longest.max(streak);
        prev_date = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::daily_log::{fixtures, DayRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    fn record(w1: bool, w2: bool, water: f64, reading: i64) -> DayRecord {
        DayRecord {
            log_date: today(),
            has_workout_1: w1,
            has_workout_2: w2,
            workout_minutes: 0,
            water_liters: water,
            reading_minutes: reading,
        }
    }

    // ── completion_score ─────────────────────────────────────────────────

    #[test]
    fn test_completion_at_exact_thresholds() {
        assert!(completion_score(&record(true, true, 3.0, 10)));
    }

    #[test]
    fn test_completion_fails_without_second_workout() {
        assert!(!completion_score(&record(true, false, 5.0, 30)));
    }

    #[test]
    fn test_completion_fails_below_water_or_reading() {
        assert!(!completion_score(&record(true, true, 2.9, 60)));
        assert!(!completion_score(&record(true, true, 4.0, 9)));
    }

    #[test]
    fn test_completion_from_row_with_labels() {
        let mut row = fixtures::log(today());
        row.workout_1 = Some("Run".into());
        row.workout_2 = Some("Yoga".into());
        row.water_intake = Some(3.0);
        row.reading_time = Some(10);
        assert!(completion_score(&DayRecord::from(&row)));

        row.workout_2 = None;
        assert!(!completion_score(&DayRecord::from(&row)));
    }

    #[test]
    fn test_completion_missing_water_fails() {
        let mut row = fixtures::log(today());
        row.workout_1 = Some("Run".into());
        row.workout_2 = Some("Walk".into());
        row.reading_time = Some(45);
        assert!(!completion_score(&DayRecord::from(&row)));
    }

    // ── current_streak ───────────────────────────────────────────────────

    #[test]
    fn test_current_streak_three_days_ending_today() {
        let dates = vec![today(), days_ago(1), days_ago(2)];
        assert_eq!(current_streak(dates, today()), 3);
    }

    #[test]
    fn test_current_streak_gap_before_yesterday_is_zero() {
        assert_eq!(current_streak(vec![days_ago(2)], today()), 0);
    }

    #[test]
    fn test_current_streak_empty() {
        assert_eq!(current_streak(Vec::new(), today()), 0);
    }

    #[test]
    fn test_current_streak_survives_missing_today() {
        let dates = vec![days_ago(1), days_ago(2), days_ago(3), days_ago(5)];
        assert_eq!(current_streak(dates, today()), 3);
    }

    #[test]
    fn test_current_streak_stops_at_first_gap() {
        let dates = vec![today(), days_ago(1), days_ago(3), days_ago(4)];
        assert_eq!(current_streak(dates, today()), 2);
    }

    #[test]
    fn test_current_streak_ignores_duplicates_and_future() {
        let dates = vec![
            today() + Duration::days(1),
            today(),
            today(),
            days_ago(1),
        ];
        assert_eq!(current_streak(dates, today()), 2);
    }

    // ── longest runs ─────────────────────────────────────────────────────

    #[test]
    fn test_longest_in_range_picks_later_run() {
        let d0 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = [0, 1, 3, 4, 5]
            .iter()
            .map(|n| d0 + Duration::days(*n))
            .collect();
        let to = d0 + Duration::days(5);
        assert_eq!(longest_streak_in_range(dates, d0, to), 3);
    }

    #[test]
    fn test_longest_in_range_filters_bounds() {
        let d0 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..10).map(|n| d0 + Duration::days(n)).collect();
        let from = d0 + Duration::days(2);
        let to = d0 + Duration::days(4);
        assert_eq!(longest_streak_in_range(dates, from, to), 3);
    }

    #[test]
    fn test_longest_in_range_empty_and_single() {
        let d0 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let later = d0 + Duration::days(30);
        assert_eq!(longest_streak_in_range(vec![later], d0, d0), 0);
        assert_eq!(longest_streak_in_range(vec![d0], d0, later), 1);
    }

    #[test]
    fn test_longest_ever_unsorted_input() {
        let dates = vec![days_ago(10), days_ago(1), days_ago(11), days_ago(2), days_ago(12)];
        assert_eq!(longest_streak_ever(dates), 3);
    }

    #[test]
    fn test_longest_ever_crosses_month_boundary() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        ];
        assert_eq!(longest_streak_ever(dates), 3);
    }
}
