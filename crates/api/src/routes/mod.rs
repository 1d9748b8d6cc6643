pub mod auth;
pub mod bookings;
pub mod companies;
pub mod floors;
pub mod health;
pub mod invites;
pub mod seats;
pub mod shares;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/password-reset/request       request reset token (public)
/// /auth/password-reset/confirm       confirm reset (public)
///
/// /users/me                          get, update own profile
/// /users/{id}                        get user (admin, same company)
///
/// /companies                         create (authenticated, company-less)
/// /companies/{id}                    get
/// /companies/{id}/users              list members (admin)
/// /companies/{id}/users/{employee_id} detach employee (admin, DELETE)
/// /companies/{id}/invites            list, create invite (admin)
/// /companies/{id}/codes              create one-time code (admin)
///
/// /invites/{token}                   public invite preview
///
/// /floors                            create (admin)
/// /floors/{id}                       get, delete
/// /floors/company/{company_id}       list a company's floors
/// /floors/{id}/lock                  acquire (POST), release (DELETE)
///
/// /seats                             create (admin)
/// /seats/{id}                        get, update, delete
/// /seats/bulk                        batch layout write (admin)
/// /seats/floor/{floor_id}            floor seats (?date= adds occupancy)
/// /seats/available                   free seats for a date
///
/// /bookings                          list own (?page, ?size), create
/// /bookings/{id}                     booking detail (owner or admin)
/// /bookings/{id}/cancel              cancel (POST, idempotent)
///
/// /shares                            inbox (?unread), create
/// /shares/{id}/read                  mark read (recipient)
/// /shares/{id}/unread                mark unread (recipient)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, login, password reset (public).
        .nest("/auth", auth::router())
        // Own profile and company-scoped user lookup.
        .nest("/users", users::router())
        // Company onboarding, invites, one-time codes.
        .nest("/companies", companies::router())
        // Public invite preview by token.
        .nest("/invites", invites::router())
        // Floor layout and the floor edit lock.
        .nest("/floors", floors::router())
        // Seat layout and availability projections.
        .nest("/seats", seats::router())
        // Seat reservations.
        .nest("/bookings", bookings::router())
        // Booking shares between colleagues.
        .nest("/shares", shares::router())
}
