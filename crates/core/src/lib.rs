//! Domain rules and pure helpers shared by the repository and API layers.
//!
//! This crate has no internal dependencies so that availability projection,
//! token generation, and retention rules can be unit tested without a
//! database.

pub mod availability;
pub mod error;
pub mod retention;
pub mod roles;
pub mod tokens;
pub mod types;
