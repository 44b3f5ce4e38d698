use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

/// The caller's identity, inserted into request extensions by [`require_auth`].
/// Handlers take it explicitly instead of reading any session state.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;

    let auth_user = AuthUser {
        id: token_data.claims.sub,
        username: token_data.claims.username,
    };
    tracing::debug!(user_id = %auth_user.id, username = %auth_user.username, "Authenticated request");

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
