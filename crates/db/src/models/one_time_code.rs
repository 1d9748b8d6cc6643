//! One-time code entity model.

use hotdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A one-time code row: a short typeable code for joining a company.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OneTimeCode {
    pub id: DbId,
    pub company_id: DbId,
    pub code: String,
    pub expires_at: Timestamp,
    pub used_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
