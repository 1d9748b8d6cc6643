//! Repository for the `floors` table.
//!
//! Floor deletion is an explicit routine rather than a cascade: it checks
//! for outstanding reservations, then removes bookings, seats, and any
//! lock row inside one transaction.

use hotdesk_core::types::{BookingDate, DbId};
use sqlx::PgPool;

use crate::models::floor::{CreateFloor, Floor, FloorDeletion};
use crate::models::status::BookingStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, name, floor_number, created_at, updated_at";

/// Provides CRUD operations for floors.
pub struct FloorRepo;

impl FloorRepo {
    /// Insert a new floor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFloor) -> Result<Floor, sqlx::Error> {
        let query = format!(
            "INSERT INTO floors (company_id, name, floor_number)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Floor>(&query)
            .bind(input.company_id)
            .bind(&input.name)
            .bind(input.floor_number)
            .fetch_one(pool)
            .await
    }

    /// Find a floor by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Floor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM floors WHERE id = $1");
        sqlx::query_as::<_, Floor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's floors ordered by floor number.
    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Floor>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM floors WHERE company_id = $1 ORDER BY floor_number");
        sqlx::query_as::<_, Floor>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a floor with everything under it: booking history, seats,
    /// and any edit lock. Blocked while any seat on the floor has an
    /// active booking on `today` or later.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        today: BookingDate,
    ) -> Result<FloorDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM floors WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Ok(FloorDeletion::NotFound);
        }

        let blocked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM bookings b
                JOIN seats s ON s.id = b.seat_id
                WHERE s.floor_id = $1 AND b.booking_date >= $2 AND b.status_id = $3
             )",
        )
        .bind(id)
        .bind(today)
        .bind(BookingStatus::Active.id())
        .fetch_one(&mut *tx)
        .await?;
        if blocked {
            return Ok(FloorDeletion::BlockedByFutureBooking);
        }

        sqlx::query(
            "DELETE FROM bookings WHERE seat_id IN (SELECT id FROM seats WHERE floor_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM seats WHERE floor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM floor_locks WHERE floor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM floors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(FloorDeletion::Deleted)
    }
}
