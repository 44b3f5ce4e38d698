use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::auth::middleware::AuthUser;
use crate::db::fetch_logs_between;
use crate::error::AppResult;
use crate::models::daily_log::to_day_records;
use crate::services::challenges::{find_monday, weekly_challenges, WeeklyChallenges};
use crate::AppState;

pub async fn get_challenges(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<WeeklyChallenges>> {
    let today = Utc::now().date_naive();
    let logs = fetch_logs_between(&state.db, auth_user.id, find_monday(today), today, 7).await?;

    Ok(Json(weekly_challenges(&to_day_records(&logs), today)))
}
