//! Route definitions for the `/shares` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shares;
use crate::state::AppState;

/// Routes mounted at `/shares`.
///
/// ```text
/// POST /               -> create_share
/// GET  /               -> list_received_shares (?unread)
/// POST /{id}/read      -> mark_share_read (recipient)
/// POST /{id}/unread    -> mark_share_unread (recipient)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(shares::list_received_shares).post(shares::create_share),
        )
        .route("/{id}/read", post(shares::mark_share_read))
        .route("/{id}/unread", post(shares::mark_share_unread))
}
