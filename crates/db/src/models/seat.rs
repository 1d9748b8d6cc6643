//! Seat entity model and DTOs.

use hotdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;

/// A seat row from the `seats` table.
///
/// `version` is the optimistic-concurrency counter: every successful
/// layout update increments it, and writers must present the version
/// they last read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seat {
    pub id: DbId,
    pub floor_id: DbId,
    pub seat_number: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub angle: i32,
    pub status_id: StatusId,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new seat.
#[derive(Debug, Deserialize)]
pub struct CreateSeat {
    pub floor_id: DbId,
    pub seat_number: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub angle: Option<i32>,
    pub status_id: Option<StatusId>,
}

/// DTO for a version-guarded seat update. `version` must match the row's
/// current counter or the write is rejected as stale.
#[derive(Debug, Deserialize)]
pub struct UpdateSeat {
    pub seat_number: Option<String>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub angle: Option<i32>,
    pub status_id: Option<StatusId>,
    pub version: i32,
}

/// Outcome of the explicit seat deletion routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatDeletion {
    /// Seat and its booking history were removed.
    Deleted,
    /// The seat has an active booking today or later.
    BlockedByFutureBooking,
    /// No seat with the given id.
    NotFound,
}

/// Outcome of the transactional bulk layout write. The batch is all or
/// nothing: any failing item rolls back every other item.
#[derive(Debug)]
pub enum BulkSeatOutcome {
    /// Every create and update landed; rows are returned creates first,
    /// then updates, each group in input order.
    Applied(Vec<Seat>),
    /// An update referenced a seat that does not exist.
    SeatNotFound(DbId),
    /// An update carried a version that no longer matches the row.
    StaleVersion(DbId),
}
