use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

use crate::models::daily_log::DayRecord;
use crate::services::records::{personal_records, PersonalRecords};
use crate::services::streaks::{completion_score, current_streak};
use crate::services::xp::{calculate_xp, level_for_xp, xp_progress_in_level, LevelProgress};

/// Twelve weeks of activity squares.
pub const CALENDAR_DAYS: i64 = 84;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub logged: bool,
    pub full: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub water_l: f64,
    pub reading_min: i64,
    pub workout_min: i64,
    pub full: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub current_streak: i32,
    pub total_days: i32,
    pub full_days: i32,
    /// Percentage of logged days that were full days, one decimal.
    pub completion_rate: f64,
    pub days_last_7: i32,
    pub xp: i32,
    pub level: i32,
    pub title: &'static str,
    pub progress: LevelProgress,
    pub personal_records: PersonalRecords,
    pub calendar: Vec<CalendarDay>,
    pub series: Vec<SeriesPoint>,
}

pub fn summarize(records: &[DayRecord], today: NaiveDate) -> DashboardSummary {
    let total_days = records.len() as i32;
    let full_days = records.iter().filter(|r| completion_score(r)).count() as i32;
    let completion_rate = if total_days > 0 {
        (1000.0 * f64::from(full_days) / f64::from(total_days)).round() / 10.0
    } else {
        0.0
    };

    let week_ago = today - Duration::days(6);
    let days_last_7 = records
        .iter()
        .filter(|r| r.log_date >= week_ago && r.log_date <= today)
        .count() as i32;

    let xp = calculate_xp(records, full_days);
    let (level, title) = level_for_xp(xp);

    DashboardSummary {
        current_streak: current_streak(records.iter().map(|r| r.log_date), today),
        total_days,
        full_days,
        completion_rate,
        days_last_7,
        xp,
        level,
        title,
        progress: xp_progress_in_level(xp),
        personal_records: personal_records(records),
        calendar: activity_calendar(records, today),
        series: day_series(records),
    }
}

pub fn activity_calendar(records: &[DayRecord], today: NaiveDate) -> Vec<CalendarDay> {
    let logged: HashSet<NaiveDate> = records.iter().map(|r| r.log_date).collect();
    let full: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| completion_score(r))
        .map(|r| r.log_date)
        .collect();

    let start = today - Duration::days(CALENDAR_DAYS - 1);
    (0..CALENDAR_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarDay {
                date,
                logged: logged.contains(&date),
                full: full.contains(&date),
            }
        })
        .collect()
}

/// Per-day chart data in ascending date order.
pub fn day_series(records: &[DayRecord]) -> Vec<SeriesPoint> {
    let mut series: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date: r.log_date,
            water_l: r.water_liters,
            reading_min: r.reading_minutes,
            workout_min: r.workout_minutes,
            full: completion_score(r),
        })
        .collect();
    series.sort_by_key(|p| p.date);
    series
}
