use serde::Serialize;

use crate::models::daily_log::DayRecord;
use crate::services::streaks::{completion_score, longest_streak_ever};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PersonalRecords {
    pub best_streak: i32,
    pub max_water_l: f64,
    pub max_workout_min: i64,
    pub max_reading_min: i64,
    pub total_days: i32,
    pub full_completion_days: i32,
}

pub fn personal_records(records: &[DayRecord]) -> PersonalRecords {
    if records.is_empty() {
        return PersonalRecords::default();
    }

    PersonalRecords {
        best_streak: longest_streak_ever(records.iter().map(|r| r.log_date)),
        max_water_l: records.iter().map(|r| r.water_liters).fold(0.0, f64::max),
        max_workout_min: records.iter().map(|r| r.workout_minutes).max().unwrap_or(0),
        max_reading_min: records.iter().map(|r| r.reading_minutes).max().unwrap_or(0),
        total_days: records.len() as i32,
        full_completion_days: records.iter().filter(|r| completion_score(r)).count() as i32,
    }
}
