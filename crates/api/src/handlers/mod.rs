//! Request handlers, one module per resource.

pub mod auth;
pub mod bookings;
pub mod companies;
pub mod floors;
pub mod invites;
pub mod seats;
pub mod shares;
pub mod users;
