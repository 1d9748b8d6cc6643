//! Repository for the `seats` table.

use hotdesk_core::types::{BookingDate, DbId};
use sqlx::PgPool;

use crate::models::seat::{BulkSeatOutcome, CreateSeat, Seat, SeatDeletion, UpdateSeat};
use crate::models::status::BookingStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, floor_id, seat_number, pos_x, pos_y, angle, status_id, version, created_at, updated_at";

/// Provides CRUD operations for seats.
pub struct SeatRepo;

impl SeatRepo {
    /// Insert a new seat, returning the created row.
    ///
    /// A duplicate seat number on the same floor fails with a
    /// unique-constraint violation on `uq_seats_floor_seat_number`.
    pub async fn create(pool: &PgPool, input: &CreateSeat) -> Result<Seat, sqlx::Error> {
        let query = format!(
            "INSERT INTO seats (floor_id, seat_number, pos_x, pos_y, angle, status_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(input.floor_id)
            .bind(&input.seat_number)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(input.angle)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find a seat by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seats WHERE id = $1");
        sqlx::query_as::<_, Seat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a floor's seats ordered by seat number.
    pub async fn list_by_floor(pool: &PgPool, floor_id: DbId) -> Result<Vec<Seat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seats WHERE floor_id = $1 ORDER BY seat_number");
        sqlx::query_as::<_, Seat>(&query)
            .bind(floor_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a version-guarded layout update. Only non-`None` fields in
    /// `input` are applied, and the update succeeds only if the row still
    /// carries `input.version`; the counter advances by one on success.
    ///
    /// Returns `None` either when the seat does not exist or when the
    /// presented version is stale; callers tell the two apart with a
    /// follow-up [`SeatRepo::find_by_id`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeat,
    ) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!(
            "UPDATE seats SET
                seat_number = COALESCE($3, seat_number),
                pos_x = COALESCE($4, pos_x),
                pos_y = COALESCE($5, pos_y),
                angle = COALESCE($6, angle),
                status_id = COALESCE($7, status_id),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(id)
            .bind(input.version)
            .bind(&input.seat_number)
            .bind(input.pos_x)
            .bind(input.pos_y)
            .bind(input.angle)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a seat along with its booking history, unless it still has
    /// an active booking on `today` or later.
    ///
    /// Runs as one transaction so the check and the deletes observe the
    /// same state; a booking inserted concurrently after the check makes
    /// the final delete fail on its foreign key, which callers surface as
    /// a conflict.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        today: BookingDate,
    ) -> Result<SeatDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM seats WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(SeatDeletion::NotFound);
        }

        let blocked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE seat_id = $1 AND booking_date >= $2 AND status_id = $3
             )",
        )
        .bind(id)
        .bind(today)
        .bind(BookingStatus::Active.id())
        .fetch_one(&mut *tx)
        .await?;
        if blocked {
            return Ok(SeatDeletion::BlockedByFutureBooking);
        }

        sqlx::query("DELETE FROM bookings WHERE seat_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM seats WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SeatDeletion::Deleted)
    }

    /// Apply a batch of layout creates and updates in one transaction.
    ///
    /// Updates go through the same version guard as [`SeatRepo::update`];
    /// the first missing seat or stale version aborts the batch and rolls
    /// back everything already applied. An early return drops the
    /// transaction uncommitted.
    pub async fn bulk_apply(
        pool: &PgPool,
        creates: &[CreateSeat],
        updates: &[(DbId, UpdateSeat)],
    ) -> Result<BulkSeatOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut applied = Vec::with_capacity(creates.len() + updates.len());

        let insert = format!(
            "INSERT INTO seats (floor_id, seat_number, pos_x, pos_y, angle, status_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, 1))
             RETURNING {COLUMNS}"
        );
        for input in creates {
            let seat = sqlx::query_as::<_, Seat>(&insert)
                .bind(input.floor_id)
                .bind(&input.seat_number)
                .bind(input.pos_x)
                .bind(input.pos_y)
                .bind(input.angle)
                .bind(input.status_id)
                .fetch_one(&mut *tx)
                .await?;
            applied.push(seat);
        }

        let update = format!(
            "UPDATE seats SET
                seat_number = COALESCE($3, seat_number),
                pos_x = COALESCE($4, pos_x),
                pos_y = COALESCE($5, pos_y),
                angle = COALESCE($6, angle),
                status_id = COALESCE($7, status_id),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        for (id, input) in updates {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM seats WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists {
                return Ok(BulkSeatOutcome::SeatNotFound(*id));
            }

            let seat = sqlx::query_as::<_, Seat>(&update)
                .bind(id)
                .bind(input.version)
                .bind(&input.seat_number)
                .bind(input.pos_x)
                .bind(input.pos_y)
                .bind(input.angle)
                .bind(input.status_id)
                .fetch_optional(&mut *tx)
                .await?;
            match seat {
                Some(seat) => applied.push(seat),
                None => return Ok(BulkSeatOutcome::StaleVersion(*id)),
            }
        }

        tx.commit().await?;
        Ok(BulkSeatOutcome::Applied(applied))
    }
}
