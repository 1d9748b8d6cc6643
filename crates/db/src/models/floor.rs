//! Floor entity model and DTOs.

use hotdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A floor row from the `floors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Floor {
    pub id: DbId,
    pub company_id: DbId,
    pub name: String,
    pub floor_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new floor.
#[derive(Debug, Deserialize)]
pub struct CreateFloor {
    pub company_id: DbId,
    pub name: String,
    pub floor_number: i32,
}

/// Outcome of the explicit floor deletion routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorDeletion {
    /// Floor, its seats, bookings, and any lock row were removed.
    Deleted,
    /// A seat on the floor still has an active booking today or later.
    BlockedByFutureBooking,
    /// No floor with the given id.
    NotFound,
}
