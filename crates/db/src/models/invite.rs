//! Invite entity model.

use hotdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An invite row: a shareable token that lets employees join a company.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invite {
    pub id: DbId,
    pub company_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub joined_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
