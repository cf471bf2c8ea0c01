use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String, // "patreon" for every current row
    pub provider_member_id: Option<String>,
    pub tier: String,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public-safe membership projection: tier and status, nothing else.
///
/// This is the only membership shape that leaves the service; row IDs and
/// provider bookkeeping stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMembership {
    pub provider: String,
    pub tier: String,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Membership> for SessionMembership {
    fn from(membership: &Membership) -> Self {
        Self {
            provider: membership.provider.clone(),
            tier: membership.tier.clone(),
            active: membership.active,
            expires_at: membership.expires_at,
        }
    }
}

impl Membership {
    /// Finds a user's current membership: active and not yet expired,
    /// most recent one wins
    pub async fn find_active_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM memberships
            WHERE user_id = $1
              AND active = TRUE
              AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Finds a user's earliest membership record, active or not
    pub async fn find_first_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM memberships
            WHERE user_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }
}
