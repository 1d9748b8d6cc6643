//! Route definitions for the `/floors` resource, including the floor
//! edit lock.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::floors;
use crate::state::AppState;

/// Routes mounted at `/floors`.
///
/// ```text
/// POST   /                        -> create_floor (admin)
/// GET    /{id}                    -> get_floor
/// DELETE /{id}                    -> delete_floor (admin)
/// GET    /company/{company_id}    -> list_company_floors
/// POST   /{id}/lock               -> lock_floor (admin)
/// DELETE /{id}/lock               -> unlock_floor (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(floors::create_floor))
        .route("/{id}", get(floors::get_floor).delete(floors::delete_floor))
        .route("/company/{company_id}", get(floors::list_company_floors))
        .route(
            "/{id}/lock",
            post(floors::lock_floor).delete(floors::unlock_floor),
        )
}
