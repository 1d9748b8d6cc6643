//! Retention rules for the hourly expired-record sweep.

use chrono::NaiveDate;

/// How often the background sweep runs (hourly).
pub const SWEEP_INTERVAL_SECS: u64 = 3600;

/// Shares are kept for this many days past their latest booking date.
pub const SHARE_RETENTION_DAYS: i64 = 30;

/// Cutoff date for share deletion: a share whose latest booking date is
/// strictly before this is eligible for removal. Shares with no booking
/// dates at all are kept indefinitely.
pub fn share_cutoff(today: NaiveDate, retention_days: i64) -> NaiveDate {
    today - chrono::Duration::days(retention_days)
}

/// Latest booking date across the shared bookings, used to stamp the
/// share row at creation time so the sweep can filter on one column.
pub fn latest_booking_date(dates: &[NaiveDate]) -> Option<NaiveDate> {
    dates.iter().max().copied()
}
