//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod company_repo;
pub mod floor_lock_repo;
pub mod floor_repo;
pub mod invite_repo;
pub mod one_time_code_repo;
pub mod password_reset_token_repo;
pub mod role_repo;
pub mod seat_repo;
pub mod share_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use company_repo::CompanyRepo;
pub use floor_lock_repo::FloorLockRepo;
pub use floor_repo::FloorRepo;
pub use invite_repo::InviteRepo;
pub use one_time_code_repo::OneTimeCodeRepo;
pub use password_reset_token_repo::PasswordResetTokenRepo;
pub use role_repo::RoleRepo;
pub use seat_repo::SeatRepo;
pub use share_repo::ShareRepo;
pub use user_repo::UserRepo;
