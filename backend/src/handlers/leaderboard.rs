use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::fetch_logs_between;
use crate::error::{AppError, AppResult};
use crate::models::daily_log::to_day_records;
use crate::models::user::UserSummary;
use crate::services::points::{compare, compute_window_metrics, HeadToHead, Leader, LeaderboardRange};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub range: Option<String>,
    pub opponent_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub range: LeaderboardRange,
    pub user_a: UserSummary,
    pub user_b: UserSummary,
    /// Whether the caller is `user_a`. Sides follow registration order so both
    /// players see the same board.
    pub i_am_a: bool,
    pub message: String,
    #[serde(flatten)]
    pub result: HeadToHead,
}

fn standing_message(result: &HeadToHead, i_am_a: bool) -> String {
    if result.points_a == result.points_b {
        return "You're tied. Log today to pull ahead!".into();
    }
    let i_lead = matches!(
        (result.winner, i_am_a),
        (Leader::A, true) | (Leader::B, false)
    );
    if i_lead {
        format!("You're ahead by {} points. Keep it up!", result.advantage)
    } else {
        format!("You're behind by {} points. Time to catch up!", result.advantage)
    }
}

async fn resolve_opponent(state: &AppState, me: Uuid, requested: Option<Uuid>) -> AppResult<Uuid> {
    match requested {
        Some(id) if id == me => Err(AppError::Validation(
            "Cannot compare against yourself".into(),
        )),
        Some(id) => Ok(id),
        None => sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE id <> $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(me)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::Validation("No other user to compare against".into())),
    }
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardResponse>> {
    let range = LeaderboardRange::parse(query.range.as_deref());
    let opponent = resolve_opponent(&state, auth_user.id, query.opponent_id).await?;

    let mut players = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, display_name, xp, level FROM users
        WHERE id = $1 OR id = $2
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(auth_user.id)
    .bind(opponent)
    .fetch_all(&state.db)
    .await?;

    if players.len() != 2 {
        return Err(AppError::NotFound("Opponent not found".into()));
    }
    let user_b = players.remove(1);
    let user_a = players.remove(0);

    let today = Utc::now().date_naive();
    let (from, to) = range.bounds(today);
    let limit = state.config.log_fetch_limit;

    let logs_a = fetch_logs_between(&state.db, user_a.id, from, to, limit).await?;
    let logs_b = fetch_logs_between(&state.db, user_b.id, from, to, limit).await?;

    let metrics_a = compute_window_metrics(&to_day_records(&logs_a), range, today);
    let metrics_b = compute_window_metrics(&to_day_records(&logs_b), range, today);
    let result = compare(&metrics_a, &metrics_b);

    let i_am_a = user_a.id == auth_user.id;
    tracing::debug!(
        user_id = %auth_user.id,
        opponent = %opponent,
        points_a = result.points_a,
        points_b = result.points_b,
        "Leaderboard computed"
    );

    Ok(Json(LeaderboardResponse {
        range,
        message: standing_message(&result, i_am_a),
        user_a,
        user_b,
        i_am_a,
        result,
    }))
}
