//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`reset`] -- password-reset token hashing.

pub mod jwt;
pub mod password;
pub mod reset;
