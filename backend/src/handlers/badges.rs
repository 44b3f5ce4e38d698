use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::db::list_achievements;
use crate::error::AppResult;
use crate::services::badges::{badge_catalogue, BadgeEntry};
use crate::AppState;

/// Read-only shelf. Badges are only awarded when the dashboard is computed.
pub async fn list_badges(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<BadgeEntry>>> {
    let achievements = list_achievements(&state.db, auth_user.id).await?;
    Ok(Json(badge_catalogue(&achievements)))
}
