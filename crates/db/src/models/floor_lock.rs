//! Floor lock entity model.

use hotdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A floor lock row: exclusive edit rights over one floor's layout.
///
/// At most one row exists per floor (`uq_floor_locks_floor`). The lock is
/// advisory: layout endpoints check it cooperatively, the row does not
/// itself prevent writes. There is no expiry; a lock persists until its
/// owner releases it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FloorLock {
    pub id: DbId,
    pub floor_id: DbId,
    pub locked_by: DbId,
    pub locked_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
