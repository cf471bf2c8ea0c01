use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Non-sensitive projection of an OAuth account linkage.
///
/// The accounts table also stores OAuth token material (access_token,
/// refresh_token, id_token, session_state); those columns stay out of every
/// read path in this type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub provider: String, // "google", "twitter", ...
    #[serde(rename = "type")]
    pub account_type: String, // "oauth" or "email"
    pub provider_account_id: String,
}

impl AccountSummary {
    /// Lists a user's linked accounts, token columns excluded
    pub async fn for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let accounts = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, provider, account_type, provider_account_id
            FROM accounts
            WHERE user_id = $1
            ORDER BY provider ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(accounts)
    }
}
