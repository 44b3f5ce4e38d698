use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    jwt::{create_access_token, AccessToken},
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::error::{AppError, AppResult};
use crate::models::user::{User, UserProfile, UserSummary};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,
}

impl RegisterRequest {
    /// Trim names before validation so padding can't satisfy the length rules.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password,
            display_name: self.display_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<AccessToken>> {
    let body = body.normalized();
    body.validate()?;
    let username = body.username;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&state.db)
        .await?;

    if existing > 0 {
        return Err(AppError::Conflict("Username already taken".into()));
    }

    let pwd_hash = hash_password(&body.password)?;
    let user_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, display_name)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(&username)
    .bind(&pwd_hash)
    .bind(&body.display_name)
    .execute(&state.db)
    .await?;

    tracing::info!(user_id = %user_id, username = %username, "User registered");

    let token = create_access_token(user_id, &username, &state.config)?;
    Ok(Json(token))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AccessToken>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(body.username.trim())
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&body.password, &user.password_hash)? {
        tracing::info!(username = %user.username, "Login rejected");
        return Err(AppError::Unauthorized);
    }

    let token = create_access_token(user.id, &user.username, &state.config)?;
    Ok(Json(token))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth_user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = sqlx::query_as::<_, UserSummary>(
        "SELECT id, display_name, xp, level FROM users ORDER BY created_at ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(users))
}
