//! Booking entity model and DTOs.

use hotdesk_core::types::{BookingDate, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A booking row from the `bookings` table.
///
/// Rows are never physically deleted while their seat exists; a booking
/// transitions once from active to cancelled and then stays as history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub seat_id: DbId,
    pub user_id: DbId,
    pub booking_date: BookingDate,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a booking.
#[derive(Debug)]
pub struct CreateBooking {
    pub seat_id: DbId,
    pub user_id: DbId,
    pub booking_date: BookingDate,
}

/// A booking joined with its seat and floor, for user-facing listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingWithLocation {
    pub id: DbId,
    pub booking_date: BookingDate,
    pub status_id: StatusId,
    pub user_id: DbId,
    pub seat_id: DbId,
    pub seat_number: String,
    pub floor_id: DbId,
    pub floor_number: i32,
    pub floor_name: String,
}

/// One active claim on a seat for a given date, with the occupant's
/// display name. Feeds the availability projection.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveClaim {
    pub seat_id: DbId,
    pub occupant_name: String,
}
