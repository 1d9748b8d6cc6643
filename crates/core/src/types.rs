/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Reservations are scoped to a calendar date with no time component.
pub type BookingDate = chrono::NaiveDate;
