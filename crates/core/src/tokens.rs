//! Opaque token and one-time code generation for invites, onboarding
//! codes, and password resets.

use rand::Rng;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default lifetime for invite tokens and one-time codes when the caller
/// does not supply one.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Fixed lifetime for password-reset tokens.
pub const RESET_TOKEN_TTL_HOURS: i64 = 24;

/// Upper bound on caller-supplied lifetimes (30 days).
pub const MAX_TOKEN_TTL_HOURS: i64 = 720;

/// Length of a generated one-time onboarding code.
pub const ONE_TIME_CODE_LENGTH: usize = 10;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate an opaque URL-safe token for invites and password resets.
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a short uppercase code that employees can type in by hand.
pub fn generate_one_time_code() -> String {
    let code: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(ONE_TIME_CODE_LENGTH)
        .map(char::from)
        .collect();
    code.to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

/// Absolute expiry for a record created at `now` with the given lifetime.
pub fn expiry_from(now: Timestamp, ttl_hours: i64) -> Timestamp {
    now + chrono::Duration::hours(ttl_hours)
}

/// A record is expired strictly after its expiry instant, not at it.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    now > expires_at
}

/// Validate a caller-supplied lifetime in hours.
pub fn validate_ttl_hours(hours: i64) -> Result<(), String> {
    if hours < 1 {
        return Err(format!(
            "Expiration must be at least 1 hour, got {hours}"
        ));
    }
    if hours > MAX_TOKEN_TTL_HOURS {
        return Err(format!(
            "Expiration must be at most {MAX_TOKEN_TTL_HOURS} hours, got {hours}"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
