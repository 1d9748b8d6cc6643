//! Repository for the `invites` table.

use hotdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::invite::Invite;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, token, expires_at, joined_count, created_at, updated_at";

/// Provides operations for company invites.
pub struct InviteRepo;

impl InviteRepo {
    /// Insert a new invite with a pre-generated token.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<Invite, sqlx::Error> {
        let query = format!(
            "INSERT INTO invites (company_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(company_id)
            .bind(token)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an invite by its token.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Invite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invites WHERE token = $1");
        sqlx::query_as::<_, Invite>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List a company's invites, newest first.
    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Invite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invites WHERE company_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invite>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Count one more successful join through this invite.
    pub async fn increment_joined(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE invites SET joined_count = joined_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete invites past their expiry. Returns the number removed.
    pub async fn delete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invites WHERE expires_at < $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
