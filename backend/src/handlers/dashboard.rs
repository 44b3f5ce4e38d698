use axum::{extract::State, Extension, Json};
use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::{award_badge, fetch_logs_between, list_achievements};
use crate::error::AppResult;
use crate::models::achievement::Achievement;
use crate::models::daily_log::to_day_records;
use crate::services::badges::{badge_catalogue, evaluate_badges, BadgeEntry};
use crate::services::dashboard::{summarize, DashboardSummary};
use crate::services::metrics::compute_badge_metrics;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub best_streak: i32,
    pub rank: String,
    pub badges: Vec<BadgeEntry>,
    pub newly_earned: Vec<BadgeEntry>,
}

/// One-based position by XP; ties share the better rank.
fn rank_label(own_xp: i32, others_xp: &[i32]) -> String {
    let ahead = others_xp.iter().filter(|xp| **xp > own_xp).count();
    format!("#{}", ahead + 1)
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardResponse>> {
    let today = Utc::now().date_naive();
    let from = today - Duration::days(state.config.dashboard_history_days);

    let logs = fetch_logs_between(
        &state.db,
        auth_user.id,
        from,
        today,
        state.config.log_fetch_limit,
    )
    .await?;
    let records = to_day_records(&logs);
    let summary = summarize(&records, today);

    let mut achievements = list_achievements(&state.db, auth_user.id).await?;
    let already: HashSet<String> = achievements.iter().map(|a| a.badge_type.clone()).collect();
    let new_ids = evaluate_badges(&compute_badge_metrics(&records, today), &already);

    let awarded = persist_badges(&state, auth_user.id, &new_ids).await;
    let newly_earned = newly_earned_entries(&awarded);
    achievements.extend(awarded);
    persist_level(&state, auth_user.id, summary.xp, summary.level).await;

    let others_xp = sqlx::query_scalar::<_, i32>("SELECT xp FROM users WHERE id <> $1")
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?;

    let badges = badge_catalogue(&achievements);

    Ok(Json(DashboardResponse {
        best_streak: summary.personal_records.best_streak,
        rank: rank_label(summary.xp, &others_xp),
        summary,
        badges,
        newly_earned,
    }))
}

/// Shelf entries for the badges this request actually stored. A badge another
/// request stored first, or one whose insert failed, is not reported.
fn newly_earned_entries(awarded: &[Achievement]) -> Vec<BadgeEntry> {
    badge_catalogue(awarded)
        .into_iter()
        .filter(|entry| entry.earned)
        .collect()
}

/// Store newly earned badges. A failed insert is logged and skipped so the
/// dashboard still renders.
async fn persist_badges(state: &AppState, user_id: Uuid, badge_ids: &[&str]) -> Vec<Achievement> {
    let mut awarded = Vec::with_capacity(badge_ids.len());
    for badge_id in badge_ids {
        match award_badge(&state.db, user_id, badge_id).await {
            Ok(Some(achievement)) => {
                tracing::info!(user_id = %user_id, badge = %badge_id, "Badge earned");
                awarded.push(achievement);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(user_id = %user_id, badge = %badge_id, error = %e, "Failed to store badge");
            }
        }
    }
    awarded
}

async fn persist_level(state: &AppState, user_id: Uuid, xp: i32, level: i32) {
    let result = sqlx::query("UPDATE users SET xp = $1, level = $2, updated_at = NOW() WHERE id = $3")
        .bind(xp)
        .bind(level)
        .bind(user_id)
        .execute(&state.db)
        .await;

    if let Err(e) = result {
        tracing::warn!(user_id = %user_id, error = %e, "Failed to store xp and level");
    }
}
