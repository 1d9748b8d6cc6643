//! Repository for the `shares` table.

use hotdesk_core::types::{BookingDate, DbId};
use sqlx::PgPool;

use crate::models::share::{CreateShare, Share};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sender_id, recipient_id, booking_ids, message, max_booking_date, \
                        read_at, created_at, updated_at";

/// Provides operations for booking shares.
pub struct ShareRepo;

impl ShareRepo {
    /// Insert a new share, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateShare) -> Result<Share, sqlx::Error> {
        let query = format!(
            "INSERT INTO shares (sender_id, recipient_id, booking_ids, message, max_booking_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Share>(&query)
            .bind(input.sender_id)
            .bind(input.recipient_id)
            .bind(&input.booking_ids)
            .bind(&input.message)
            .bind(input.max_booking_date)
            .fetch_one(pool)
            .await
    }

    /// Find a share by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Share>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shares WHERE id = $1");
        sqlx::query_as::<_, Share>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List shares addressed to a user, newest first.
    pub async fn list_received(
        pool: &PgPool,
        recipient_id: DbId,
    ) -> Result<Vec<Share>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shares WHERE recipient_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Share>(&query)
            .bind(recipient_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a share as read by its recipient.
    ///
    /// Returns `true` if the share exists, is addressed to `recipient_id`,
    /// and was not already read.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shares SET read_at = NOW()
             WHERE id = $1 AND recipient_id = $2 AND read_at IS NULL",
        )
        .bind(id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear the read marker on a share.
    ///
    /// Returns `true` if the share exists, is addressed to `recipient_id`,
    /// and was previously read.
    pub async fn mark_unread(
        pool: &PgPool,
        id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE shares SET read_at = NULL
             WHERE id = $1 AND recipient_id = $2 AND read_at IS NOT NULL",
        )
        .bind(id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete shares whose latest booking date fell out of the retention
    /// window (strictly before `cutoff`). Shares with no booking dates
    /// are kept. Returns the number removed.
    pub async fn delete_stale(pool: &PgPool, cutoff: BookingDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shares WHERE max_booking_date < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
