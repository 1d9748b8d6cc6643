//! Password reset token entity model.

use hotdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A password reset token row. The token value is returned to the caller
/// once at creation and otherwise only ever matched, never listed.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
