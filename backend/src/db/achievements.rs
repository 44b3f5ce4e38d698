use sqlx::PgPool;
use uuid::Uuid;

use crate::models::achievement::Achievement;

pub async fn list_achievements(db: &PgPool, user_id: Uuid) -> Result<Vec<Achievement>, sqlx::Error> {
    sqlx::query_as::<_, Achievement>(
        r#"
        SELECT * FROM achievements
        WHERE user_id = $1
        ORDER BY earned_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Record a badge for the user. Returns `None` when it was already stored.
pub async fn award_badge(
    db: &PgPool,
    user_id: Uuid,
    badge_type: &str,
) -> Result<Option<Achievement>, sqlx::Error> {
    sqlx::query_as::<_, Achievement>(
        r#"
        INSERT INTO achievements (id, user_id, badge_type)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, badge_type) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(badge_type)
    .fetch_optional(db)
    .await
}
