//! Periodic cleanup of expired short-lived records.
//!
//! Spawns a background task that sweeps four independent categories on a
//! fixed interval: password-reset tokens, one-time codes, and invites past
//! their expiry, plus shares whose bookings fell out of the retention
//! window. A failure in one category never blocks the others; the next
//! tick retries.

use std::time::Duration;

use chrono::Utc;
use hotdesk_core::retention::share_cutoff;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use hotdesk_db::repositories::{
    InviteRepo, OneTimeCodeRepo, PasswordResetTokenRepo, ShareRepo,
};

use crate::config::RetentionConfig;

/// Run the expiry sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, retention: RetentionConfig, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = retention.sweep_interval_secs,
        share_retention_days = retention.share_retention_days,
        "Expiry reaper started"
    );

    let mut interval =
        tokio::time::interval(Duration::from_secs(retention.sweep_interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Expiry reaper stopping");
                break;
            }
            _ = interval.tick() => {
                sweep(&pool, retention.share_retention_days).await;
            }
        }
    }
}

/// One sweep pass over all four categories. Each category is swept on its
/// own; an error in one is logged and the rest still run.
pub async fn sweep(pool: &PgPool, share_retention_days: i64) {
    let now = Utc::now();

    match PasswordResetTokenRepo::delete_expired(pool, now).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Expiry reaper: purged password reset tokens");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Expiry reaper: password reset token sweep failed");
        }
    }

    match OneTimeCodeRepo::delete_expired(pool, now).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Expiry reaper: purged one-time codes");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Expiry reaper: one-time code sweep failed");
        }
    }

    match InviteRepo::delete_expired(pool, now).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Expiry reaper: purged invites");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Expiry reaper: invite sweep failed");
        }
    }

    // Shares age out by booking date, not wall-clock expiry. The grace
    // period counts from the latest booking date on the share.
    let cutoff = share_cutoff(now.date_naive(), share_retention_days);
    match ShareRepo::delete_stale(pool, cutoff).await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "Expiry reaper: purged stale shares");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Expiry reaper: share sweep failed");
        }
    }
}
