//! Seat availability projection for one floor and one calendar date.
//!
//! The repository layer fetches a floor's seats and that day's active
//! bookings as two independent reads; this module merges them into a
//! seat-id to occupant lookup. The merge is a pure read-side projection:
//! it never mutates anything, so it is safe to run concurrently with
//! booking writes (the result is a consistent-at-read snapshot).

use std::collections::HashMap;

use crate::types::DbId;

/// An active booking claim on one seat for the queried date.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatClaim {
    pub seat_id: DbId,
    pub occupant_name: String,
}

/// Seat-id to occupant-name lookup for one floor and date.
///
/// Built from active bookings only; cancelled rows must be filtered out
/// before construction.
#[derive(Debug, Default)]
pub struct Occupancy {
    by_seat: HashMap<DbId, String>,
}

impl Occupancy {
    pub fn from_claims(claims: Vec<SeatClaim>) -> Self {
        let by_seat = claims
            .into_iter()
            .map(|c| (c.seat_id, c.occupant_name))
            .collect();
        Self { by_seat }
    }

    /// Display name of the user holding the seat, if anyone does.
    pub fn occupant(&self, seat_id: DbId) -> Option<&str> {
        self.by_seat.get(&seat_id).map(String::as_str)
    }

    pub fn is_booked(&self, seat_id: DbId) -> bool {
        self.by_seat.contains_key(&seat_id)
    }

    pub fn booked_count(&self) -> usize {
        self.by_seat.len()
    }
}

/// Ids from `seat_ids` with no active claim, preserving input order.
pub fn available_seat_ids(seat_ids: &[DbId], occupancy: &Occupancy) -> Vec<DbId> {
    seat_ids
        .iter()
        .copied()
        .filter(|id| !occupancy.is_booked(*id))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
