use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A living dex row, serialized payload included.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LivingDex {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub game_id: String,
    pub data: Option<String>, // serialized box payload, parsed by services::dex_parser
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary row without the payload column, for listings where the payload
/// would be dead weight.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LivingDexSummary {
    pub id: Uuid,
    pub title: String,
    pub game_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LivingDex {
    /// Finds a dex by ID, payload included
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let dex = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM living_dexes WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(dex)
    }

    /// Lists a user's dex summaries, most recently updated first
    pub async fn summaries_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<LivingDexSummary>, sqlx::Error> {
        let summaries = sqlx::query_as::<_, LivingDexSummary>(
            r#"
            SELECT id, title, game_id, created_at, updated_at
            FROM living_dexes
            WHERE user_id = $1
            ORDER BY updated_at DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(summaries)
    }

    /// Counts a user's dexes
    pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM living_dexes WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(total)
    }
}
