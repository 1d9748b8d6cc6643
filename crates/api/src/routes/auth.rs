//! Route definitions for the `/auth` resource.
//!
//! Everything here is public; these endpoints are how a client obtains a
//! token in the first place.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register                 -> register
/// POST /login                    -> login
/// POST /password-reset/request   -> request_password_reset
/// POST /password-reset/confirm   -> confirm_password_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/password-reset/request", post(auth::request_password_reset))
        .route("/password-reset/confirm", post(auth::confirm_password_reset))
}
