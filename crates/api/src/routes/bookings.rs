//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST /               -> create_booking
/// GET  /               -> list_bookings (?page, ?size, ?user_id admin)
/// GET  /{id}           -> get_booking (owner or admin)
/// POST /{id}/cancel    -> cancel_booking (owner or admin, idempotent)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/cancel", post(bookings::cancel_booking))
}
