use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::xp::level_for_xp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub xp: i32,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub xp: i32,
    pub level: i32,
    pub title: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        // Title follows the stored XP so a stale `level` column can't disagree with it.
        let (level, title) = level_for_xp(u.xp);
        Self {
            id: u.id,
            username: u.username,
            display_name: u.display_name,
            xp: u.xp,
            level,
            title,
            created_at: u.created_at,
        }
    }
}

/// Row shape for the user picker and opponent lookup.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub display_name: String,
    pub xp: i32,
    pub level: i32,
}
