//! Share entity model and DTOs.

use hotdesk_core::types::{BookingDate, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A share row: one user showing a set of their bookings to a colleague.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Share {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub booking_ids: Vec<DbId>,
    pub message: Option<String>,
    /// Latest booking date among the shared bookings; drives retention.
    pub max_booking_date: Option<BookingDate>,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a share.
#[derive(Debug)]
pub struct CreateShare {
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub booking_ids: Vec<DbId>,
    pub message: Option<String>,
    pub max_booking_date: Option<BookingDate>,
}
