use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::daily_log::DailyLog;

/// Logs for `user_id` in `[from, to]`, newest first, at most `limit` rows.
pub async fn fetch_logs_between(
    db: &PgPool,
    user_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
    limit: i64,
) -> Result<Vec<DailyLog>, sqlx::Error> {
    sqlx::query_as::<_, DailyLog>(
        r#"
        SELECT * FROM daily_logs
        WHERE user_id = $1 AND log_date BETWEEN $2 AND $3
        ORDER BY log_date DESC
        LIMIT $4
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .bind(limit)
    .fetch_all(db)
    .await
}
