//! Repository for the `one_time_codes` table.

use hotdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::one_time_code::OneTimeCode;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, code, expires_at, used_count, created_at, updated_at";

/// Provides operations for one-time onboarding codes.
pub struct OneTimeCodeRepo;

impl OneTimeCodeRepo {
    /// Insert a new code.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<OneTimeCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO one_time_codes (company_id, code, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OneTimeCode>(&query)
            .bind(company_id)
            .bind(code)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a code row by the code value itself.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<OneTimeCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM one_time_codes WHERE code = $1");
        sqlx::query_as::<_, OneTimeCode>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Count one more use of this code.
    pub async fn increment_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE one_time_codes SET used_count = used_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete codes past their expiry. Returns the number removed.
    pub async fn delete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM one_time_codes WHERE expires_at < $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
