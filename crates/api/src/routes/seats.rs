//! Route definitions for the `/seats` resource: layout management plus
//! the availability projections.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::seats;
use crate::state::AppState;

/// Routes mounted at `/seats`.
///
/// ```text
/// POST   /                     -> create_seat (admin)
/// POST   /bulk                 -> bulk_apply_seats (admin)
/// GET    /available            -> list_available_seats (?floor_id, ?date)
/// GET    /floor/{floor_id}     -> list_floor_seats (?date adds occupancy)
/// GET    /{id}                 -> get_seat
/// PUT    /{id}                 -> update_seat (admin)
/// DELETE /{id}                 -> delete_seat (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(seats::create_seat))
        .route("/bulk", post(seats::bulk_apply_seats))
        .route("/available", get(seats::list_available_seats))
        .route("/floor/{floor_id}", get(seats::list_floor_seats))
        .route(
            "/{id}",
            get(seats::get_seat)
                .put(seats::update_seat)
                .delete(seats::delete_seat),
        )
}
