//! Database row models and DTOs.

pub mod booking;
pub mod company;
pub mod floor;
pub mod floor_lock;
pub mod invite;
pub mod one_time_code;
pub mod password_reset_token;
pub mod role;
pub mod seat;
pub mod share;
pub mod status;
pub mod user;
