//! Route definitions for the `/invites` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::invites;
use crate::state::AppState;

/// Routes mounted at `/invites`.
///
/// ```text
/// GET /{token}   -> get_invite_by_token (public preview)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{token}", get(invites::get_invite_by_token))
}
