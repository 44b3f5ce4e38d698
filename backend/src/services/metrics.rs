use chrono::NaiveDate;
use serde::Serialize;

use crate::models::daily_log::DayRecord;
use crate::services::streaks::{completion_score, current_streak};

/// Aggregate activity over a set of daily records. Feeds badge checks and
/// leaderboard points; every field is zero for an empty history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActivityMetrics {
    pub days_logged: i32,
    pub streak: i32,
    pub full_completion_days: i32,
    pub full_completion_streak: i32,
    pub total_workout_min: i64,
    pub total_water_l: f64,
    pub total_reading_min: i64,
}

/// Metric a badge threshold is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    DaysLogged,
    Streak,
    #[serde(rename = "total_water_L")]
    TotalWaterL,
    TotalReadingMin,
    TotalWorkoutMin,
    FullCompletionStreak,
}

impl ActivityMetrics {
    pub fn value(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::DaysLogged => f64::from(self.days_logged),
            MetricKey::Streak => f64::from(self.streak),
            MetricKey::TotalWaterL => self.total_water_l,
            MetricKey::TotalReadingMin => self.total_reading_min as f64,
            MetricKey::TotalWorkoutMin => self.total_workout_min as f64,
            MetricKey::FullCompletionStreak => f64::from(self.full_completion_streak),
        }
    }
}

/// Metrics for badge evaluation; the streak is the current (recency-anchored) one.
pub fn compute_badge_metrics(records: &[DayRecord], today: NaiveDate) -> ActivityMetrics {
    let streak = current_streak(records.iter().map(|r| r.log_date), today);
    aggregate(records, streak)
}

/// Sums and counts over `records`, with `streak` supplied by the caller since
/// badges and leaderboard windows measure it differently.
pub(crate) fn aggregate(records: &[DayRecord], streak: i32) -> ActivityMetrics {
    if records.is_empty() {
        return ActivityMetrics::default();
    }

    ActivityMetrics {
        days_logged: records.len() as i32,
        streak,
        full_completion_days: records.iter().filter(|r| completion_score(r)).count() as i32,
        full_completion_streak: full_completion_streak(records),
        total_workout_min: records.iter().map(|r| r.workout_minutes).sum(),
        total_water_l: records.iter().map(|r| r.water_liters).sum(),
        total_reading_min: records.iter().map(|r| r.reading_minutes).sum(),
    }
}

/// Longest run of full days among the log rows taken in date order. Rows are
/// adjacent when no other row sits between them, even if calendar days were
/// skipped.
fn full_completion_streak(records: &[DayRecord]) -> i32 {
    let mut sorted: Vec<&DayRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.log_date);

    let mut longest = 0i32;
    let mut current = 0i32;
    for record in sorted {
        if completion_score(record) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::daily_log::fixtures;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn partial_day(date: NaiveDate) -> DayRecord {
        DayRecord {
            log_date: date,
            has_workout_1: true,
            has_workout_2: false,
            workout_minutes: 30,
            water_liters: 1.5,
            reading_minutes: 5,
        }
    }

    #[test]
    fn test_empty_records_give_zero_metrics() {
        assert_eq!(compute_badge_metrics(&[], today()), ActivityMetrics::default());
    }

    #[test]
    fn test_totals_and_counts() {
        let records = vec![
            fixtures::full_day(today()),
            partial_day(today() - Duration::days(1)),
            fixtures::full_day(today() - Duration::days(2)),
        ];
        let m = compute_badge_metrics(&records, today());
        assert_eq!(m.days_logged, 3);
        assert_eq!(m.streak, 3);
        assert_eq!(m.full_completion_days, 2);
        assert_eq!(m.full_completion_streak, 1);
        assert_eq!(m.total_workout_min, 90 + 30 + 90);
        assert!((m.total_water_l - 8.5).abs() < 1e-9);
        assert_eq!(m.total_reading_min, 20 + 5 + 20);
    }

    #[test]
    fn test_full_completion_streak_ignores_calendar_gaps() {
        // Full days 10 days apart with nothing logged in between still chain
        let records = vec![
            fixtures::full_day(today() - Duration::days(20)),
            fixtures::full_day(today() - Duration::days(10)),
            fixtures::full_day(today()),
        ];
        let m = compute_badge_metrics(&records, today());
        assert_eq!(m.full_completion_streak, 3);
        assert_eq!(m.streak, 1);
    }

    #[test]
    fn test_full_completion_streak_broken_by_partial_row() {
        let records = vec![
            fixtures::full_day(today() - Duration::days(3)),
            fixtures::full_day(today() - Duration::days(2)),
            partial_day(today() - Duration::days(1)),
            fixtures::full_day(today()),
        ];
        assert_eq!(compute_badge_metrics(&records, today()).full_completion_streak, 2);
    }

    #[test]
    fn test_full_completion_streak_order_independent_of_input() {
        let records = vec![
            fixtures::full_day(today()),
            partial_day(today() - Duration::days(1)),
            fixtures::full_day(today() - Duration::days(2)),
            fixtures::full_day(today() - Duration::days(3)),
        ];
        assert_eq!(compute_badge_metrics(&records, today()).full_completion_streak, 2);
    }

    #[test]
    fn test_value_lookup_by_key() {
        let m = ActivityMetrics {
            total_water_l: 12.5,
            total_reading_min: 45,
            ..Default::default()
        };
        assert_eq!(m.value(MetricKey::TotalWaterL), 12.5);
        assert_eq!(m.value(MetricKey::TotalReadingMin), 45.0);
        assert_eq!(m.value(MetricKey::Streak), 0.0);
    }
}
