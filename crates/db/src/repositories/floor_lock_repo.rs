//! Repository for the `floor_locks` table.
//!
//! Acquisition must be a single atomic insert-if-absent: a find-then-insert
//! pair would let two admins both observe "unlocked" and both proceed.
//! `INSERT ... ON CONFLICT DO NOTHING` against `uq_floor_locks_floor`
//! resolves the race inside the database, and the loser gets `None`.

use hotdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::floor_lock::FloorLock;

/// Column list for `floor_locks` queries.
const COLUMNS: &str = "id, floor_id, locked_by, locked_at, created_at, updated_at";

/// Provides operations for the per-floor advisory edit lock.
pub struct FloorLockRepo;

impl FloorLockRepo {
    /// Attempt to acquire the edit lock on a floor.
    ///
    /// If the insert succeeds, the new lock is returned. If a lock row
    /// already exists (whoever owns it), the insert is a no-op and `None`
    /// is returned; callers distinguish "held by me" from "held by
    /// someone else" via [`FloorLockRepo::find_by_floor`].
    pub async fn acquire(
        pool: &PgPool,
        floor_id: DbId,
        user_id: DbId,
    ) -> Result<Option<FloorLock>, sqlx::Error> {
        let query = format!(
            "INSERT INTO floor_locks (floor_id, locked_by)
             VALUES ($1, $2)
             ON CONFLICT (floor_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FloorLock>(&query)
            .bind(floor_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The current lock on a floor, or `None` if unlocked.
    pub async fn find_by_floor(
        pool: &PgPool,
        floor_id: DbId,
    ) -> Result<Option<FloorLock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM floor_locks WHERE floor_id = $1");
        sqlx::query_as::<_, FloorLock>(&query)
            .bind(floor_id)
            .fetch_optional(pool)
            .await
    }

    /// Release a lock. Only the holder (matching `user_id`) can release.
    ///
    /// Returns `true` if a lock was deleted, `false` if no lock owned by
    /// this user exists on the floor.
    pub async fn release(
        pool: &PgPool,
        floor_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM floor_locks WHERE floor_id = $1 AND locked_by = $2")
            .bind(floor_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
