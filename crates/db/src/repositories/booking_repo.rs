//! Repository for the `bookings` table.
//!
//! Creation races are decided by the partial unique indexes
//! `uq_bookings_seat_date_active` and `uq_bookings_user_date_active`, not
//! by the existence checks here: callers may use the checks as early
//! exits, but the insert itself is the arbiter, and a loser surfaces as a
//! unique-constraint violation.

use hotdesk_core::types::{BookingDate, DbId};
use sqlx::PgPool;

use crate::models::booking::{ActiveClaim, Booking, BookingWithLocation, CreateBooking};
use crate::models::status::BookingStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, seat_id, user_id, booking_date, status_id, created_at, updated_at";

/// Provides CRUD operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new active booking, returning the created row.
    ///
    /// A concurrent claim on the same seat-date or user-date slot makes
    /// this fail with a unique-constraint violation.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (seat_id, user_id, booking_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.seat_id)
            .bind(input.user_id)
            .bind(input.booking_date)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Does the seat already have an active booking on this date?
    pub async fn seat_has_active_on(
        pool: &PgPool,
        seat_id: DbId,
        date: BookingDate,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE seat_id = $1 AND booking_date = $2 AND status_id = $3
             )",
        )
        .bind(seat_id)
        .bind(date)
        .bind(BookingStatus::Active.id())
        .fetch_one(pool)
        .await
    }

    /// Does the user already hold an active booking on this date?
    pub async fn user_has_active_on(
        pool: &PgPool,
        user_id: DbId,
        date: BookingDate,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE user_id = $1 AND booking_date = $2 AND status_id = $3
             )",
        )
        .bind(user_id)
        .bind(date)
        .bind(BookingStatus::Active.id())
        .fetch_one(pool)
        .await
    }

    /// Mark a booking cancelled. The write is idempotent: cancelling an
    /// already-cancelled booking succeeds without changing its status.
    ///
    /// Returns `false` if no booking with the given id exists.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE bookings SET status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(BookingStatus::Cancelled.id())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Page through a user's bookings, newest booking date first, joined
    /// with seat and floor details.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookingWithLocation>, sqlx::Error> {
        sqlx::query_as::<_, BookingWithLocation>(
            "SELECT b.id, b.booking_date, b.status_id, b.user_id, b.seat_id,
                    s.seat_number, f.id AS floor_id, f.floor_number, f.name AS floor_name
             FROM bookings b
             JOIN seats s ON s.id = b.seat_id
             JOIN floors f ON f.id = s.floor_id
             WHERE b.user_id = $1
             ORDER BY b.booking_date DESC, b.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total number of bookings for a user, for pagination metadata.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Active claims on a floor's seats for one date, with each
    /// occupant's display name.
    pub async fn active_claims(
        pool: &PgPool,
        floor_id: DbId,
        date: BookingDate,
    ) -> Result<Vec<ActiveClaim>, sqlx::Error> {
        sqlx::query_as::<_, ActiveClaim>(
            "SELECT b.seat_id, u.name AS occupant_name
             FROM bookings b
             JOIN seats s ON s.id = b.seat_id
             JOIN users u ON u.id = b.user_id
             WHERE s.floor_id = $1 AND b.booking_date = $2 AND b.status_id = $3",
        )
        .bind(floor_id)
        .bind(date)
        .bind(BookingStatus::Active.id())
        .fetch_all(pool)
        .await
    }
}
