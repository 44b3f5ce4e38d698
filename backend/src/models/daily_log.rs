use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub workout_1: Option<String>,
    pub workout_1_duration: Option<i32>,
    pub workout_2: Option<String>,
    pub workout_2_duration: Option<i32>,
    pub water_intake: Option<f64>,
    pub reading_time: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertDailyLogRequest {
    pub log_date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Breakfast must be under 500 characters"))]
    pub breakfast: Option<String>,
    #[validate(length(max = 500, message = "Lunch must be under 500 characters"))]
    pub lunch: Option<String>,
    #[validate(length(max = 500, message = "Dinner must be under 500 characters"))]
    pub dinner: Option<String>,

    #[validate(length(max = 100, message = "Workout name must be under 100 characters"))]
    pub workout_1: Option<String>,
    #[validate(range(min = 0, max = 300, message = "Workout duration must be 0-300 minutes"))]
    pub workout_1_duration: Option<i32>,
    #[validate(length(max = 100, message = "Workout name must be under 100 characters"))]
    pub workout_2: Option<String>,
    #[validate(range(min = 0, max = 300, message = "Workout duration must be 0-300 minutes"))]
    pub workout_2_duration: Option<i32>,

    #[validate(range(min = 0.0, max = 10.0, message = "Water intake must be 0-10 liters"))]
    pub water_intake: Option<f64>,
    #[validate(range(min = 0, max = 240, message = "Reading time must be 0-240 minutes"))]
    pub reading_time: Option<i32>,

    #[validate(length(max = 5000, message = "Notes must be under 5000 characters"))]
    pub notes: Option<String>,
}

impl UpsertDailyLogRequest {
    /// Blank text and zero amounts are stored as NULL, matching what the
    /// tracker form submits for untouched fields.
    pub fn normalized(self) -> Self {
        Self {
            log_date: self.log_date,
            breakfast: blank_to_none(self.breakfast),
            lunch: blank_to_none(self.lunch),
            dinner: blank_to_none(self.dinner),
            workout_1: blank_to_none(self.workout_1),
            workout_1_duration: self.workout_1_duration.filter(|d| *d != 0),
            workout_2: blank_to_none(self.workout_2),
            workout_2_duration: self.workout_2_duration.filter(|d| *d != 0),
            water_intake: self.water_intake.filter(|w| *w != 0.0),
            reading_time: self.reading_time.filter(|r| *r != 0),
            notes: blank_to_none(self.notes),
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct DailyLogQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DailyLogWithStatus {
    #[serde(flatten)]
    pub log: DailyLog,
    pub is_full_day: bool,
}

/// A daily log with every numeric field resolved to a concrete value.
///
/// Built once from a [`DailyLog`] row; the scoring services only ever see
/// this shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRecord {
    pub log_date: NaiveDate,
    pub has_workout_1: bool,
    pub has_workout_2: bool,
    pub workout_minutes: i64,
    pub water_liters: f64,
    pub reading_minutes: i64,
}

impl From<&DailyLog> for DayRecord {
    fn from(log: &DailyLog) -> Self {
        Self {
            log_date: log.log_date,
            has_workout_1: slot_present(log.workout_1.as_deref(), log.workout_1_duration),
            has_workout_2: slot_present(log.workout_2.as_deref(), log.workout_2_duration),
            workout_minutes: minutes(log.workout_1_duration) + minutes(log.workout_2_duration),
            water_liters: liters(log.water_intake),
            reading_minutes: minutes(log.reading_time),
        }
    }
}

pub fn to_day_records(logs: &[DailyLog]) -> Vec<DayRecord> {
    logs.iter().map(DayRecord::from).collect()
}

fn slot_present(label: Option<&str>, duration: Option<i32>) -> bool {
    label.is_some_and(|l| !l.trim().is_empty()) || duration.is_some()
}

fn minutes(value: Option<i32>) -> i64 {
    value.map(|v| i64::from(v.max(0))).unwrap_or(0)
}

fn liters(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}
