use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::daily_log::{
    DailyLog, DailyLogQuery, DailyLogWithStatus, DayRecord, UpsertDailyLogRequest,
};
use crate::services::streaks::completion_score;
use crate::AppState;

/// Oldest date a log may be written for, counted back from today.
const MAX_BACKFILL_DAYS: i64 = 365;
const DEFAULT_LIST_DAYS: i64 = 30;

fn check_log_date(log_date: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if log_date > today {
        return Err(AppError::Validation("Cannot log a future date".into()));
    }
    if log_date < today - Duration::days(MAX_BACKFILL_DAYS) {
        return Err(AppError::Validation(format!(
            "Cannot log more than {} days back",
            MAX_BACKFILL_DAYS
        )));
    }
    Ok(())
}

fn with_status(log: DailyLog) -> DailyLogWithStatus {
    let is_full_day = completion_score(&DayRecord::from(&log));
    DailyLogWithStatus { log, is_full_day }
}

pub async fn upsert_daily_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertDailyLogRequest>,
) -> AppResult<Json<DailyLogWithStatus>> {
    body.validate()?;
    let body = body.normalized();

    let today = Utc::now().date_naive();
    let log_date = body.log_date.unwrap_or(today);
    check_log_date(log_date, today)?;

    let log = sqlx::query_as::<_, DailyLog>(
        r#"
        INSERT INTO daily_logs (
            id, user_id, log_date, breakfast, lunch, dinner,
            workout_1, workout_1_duration, workout_2, workout_2_duration,
            water_intake, reading_time, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (user_id, log_date) DO UPDATE SET
            breakfast = EXCLUDED.breakfast,
            lunch = EXCLUDED.lunch,
            dinner = EXCLUDED.dinner,
            workout_1 = EXCLUDED.workout_1,
            workout_1_duration = EXCLUDED.workout_1_duration,
            workout_2 = EXCLUDED.workout_2,
            workout_2_duration = EXCLUDED.workout_2_duration,
            water_intake = EXCLUDED.water_intake,
            reading_time = EXCLUDED.reading_time,
            notes = EXCLUDED.notes,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(log_date)
    .bind(&body.breakfast)
    .bind(&body.lunch)
    .bind(&body.dinner)
    .bind(&body.workout_1)
    .bind(body.workout_1_duration)
    .bind(&body.workout_2)
    .bind(body.workout_2_duration)
    .bind(body.water_intake)
    .bind(body.reading_time)
    .bind(&body.notes)
    .fetch_one(&state.db)
    .await?;

    tracing::debug!(user_id = %auth_user.id, log_date = %log_date, "Daily log saved");

    Ok(Json(with_status(log)))
}

pub async fn list_daily_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DailyLogQuery>,
) -> AppResult<Json<Vec<DailyLogWithStatus>>> {
    let today = Utc::now().date_naive();
    let start = query
        .start_date
        .unwrap_or_else(|| today - Duration::days(DEFAULT_LIST_DAYS));
    let end = query.end_date.unwrap_or(today);

    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let logs = sqlx::query_as::<_, DailyLog>(
        r#"
        SELECT * FROM daily_logs
        WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
        ORDER BY log_date DESC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(logs.into_iter().map(with_status).collect()))
}

pub async fn get_daily_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(log_date): Path<NaiveDate>,
) -> AppResult<Json<DailyLogWithStatus>> {
    let log = sqlx::query_as::<_, DailyLog>(
        "SELECT * FROM daily_logs WHERE user_id = $1 AND log_date = $2",
    )
    .bind(auth_user.id)
    .bind(log_date)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No log for {}", log_date)))?;

    Ok(Json(with_status(log)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::daily_log::fixtures::log;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_check_log_date_bounds() {
        let today = date(2026, 5, 10);
        assert!(check_log_date(today, today).is_ok());
        assert!(check_log_date(today - Duration::days(365), today).is_ok());
        assert!(matches!(
            check_log_date(today + Duration::days(1), today),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            check_log_date(today - Duration::days(366), today),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_with_status_flags_full_day() {
        let mut row = log(date(2026, 5, 10));
        row.workout_1 = Some("Run".into());
        row.workout_2 = Some("Lift".into());
        row.water_intake = Some(3.0);
        row.reading_time = Some(10);
        assert!(with_status(row.clone()).is_full_day);

        row.reading_time = Some(9);
        assert!(!with_status(row).is_full_day);
    }

    #[test]
    fn test_with_status_serializes_flat() {
        let json = serde_json::to_value(with_status(log(date(2026, 5, 10)))).unwrap();
        assert_eq!(json["log_date"], "2026-05-10");
        assert_eq!(json["is_full_day"], false);
    }
}
