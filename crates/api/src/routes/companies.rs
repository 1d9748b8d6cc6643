//! Route definitions for the `/companies` resource: onboarding plus the
//! invite and one-time-code lifecycle.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{companies, users};
use crate::state::AppState;

/// Routes mounted at `/companies`.
///
/// ```text
/// POST   /                          -> create_company (company-less caller)
/// GET    /{id}                      -> get_company
/// GET    /{id}/users                -> list_company_users (admin)
/// DELETE /{id}/users/{employee_id}  -> remove_employee (admin)
/// GET    /{id}/invites              -> list_invites (admin)
/// POST   /{id}/invites              -> create_invite (admin)
/// POST   /{id}/codes                -> create_one_time_code (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(companies::create_company))
        .route("/{id}", get(companies::get_company))
        .route("/{id}/users", get(users::list_company_users))
        .route("/{id}/users/{employee_id}", delete(users::remove_employee))
        .route(
            "/{id}/invites",
            get(companies::list_invites).post(companies::create_invite),
        )
        .route("/{id}/codes", post(companies::create_one_time_code))
}
