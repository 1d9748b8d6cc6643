//! Handlers for the `/bookings` resource.
//!
//! Creation runs the existence and duplicate pre-checks for friendly
//! errors, then inserts; when two requests race past the pre-checks, the
//! partial unique indexes decide and the loser's 23505 is classified
//! into the same conflict responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hotdesk_core::error::CoreError;
use hotdesk_core::types::{BookingDate, DbId};
use hotdesk_db::models::booking::{Booking, BookingWithLocation, CreateBooking};
use hotdesk_db::repositories::{BookingRepo, SeatRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub seat_id: DbId,
    /// Who the booking is for. Non-admins may only name themselves.
    pub user_id: DbId,
    pub date: BookingDate,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Deserialize)]
pub struct ListBookingsParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// Admins may page through another user's bookings.
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a booking and verify the caller may act on it (owner or admin).
///
/// Absent bookings are a 404; someone else's booking is a 403.
async fn find_and_authorize(state: &AppState, id: DbId, user: &AuthUser) -> AppResult<Booking> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Booking",
                id,
            })
        })?;

    if booking.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only access your own bookings".into(),
        )));
    }
    Ok(booking)
}

// ---------------------------------------------------------------------------
// POST /bookings
// ---------------------------------------------------------------------------

/// Book a seat for one date.
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    if input.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only book for yourself".into(),
        )));
    }
    if input.date < Utc::now().date_naive() {
        return Err(AppError::Core(CoreError::Validation(
            "Booking date cannot be in the past".into(),
        )));
    }

    SeatRepo::find_by_id(&state.pool, input.seat_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Seat",
                id: input.seat_id,
            })
        })?;
    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: input.user_id,
            })
        })?;

    // Early exits; the partial unique indexes remain the arbiter.
    if BookingRepo::user_has_active_on(&state.pool, input.user_id, input.date).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "User already has a booking for this date".into(),
        )));
    }
    if BookingRepo::seat_has_active_on(&state.pool, input.seat_id, input.date).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Seat is already booked for this date".into(),
        )));
    }

    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            seat_id: input.seat_id,
            user_id: input.user_id,
            booking_date: input.date,
        },
    )
    .await?;

    tracing::info!(
        booking_id = booking.id,
        seat_id = booking.seat_id,
        user_id = booking.user_id,
        date = %booking.booking_date,
        "Booking created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

// ---------------------------------------------------------------------------
// POST /bookings/{id}/cancel
// ---------------------------------------------------------------------------

/// Cancel a booking (owner or admin).
///
/// Cancelling is idempotent: a second cancel of the same booking is a
/// no-op success.
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_and_authorize(&state, id, &user).await?;

    if !BookingRepo::cancel(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }));
    }

    tracing::info!(booking_id = id, user_id = user.user_id, "Booking cancelled");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /bookings
// ---------------------------------------------------------------------------

/// Page through bookings, newest booking date first, each row joined
/// with its seat and floor.
pub async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListBookingsParams>,
) -> AppResult<Json<DataResponse<Page<BookingWithLocation>>>> {
    let target = match params.user_id {
        Some(other) if other != user.user_id => {
            if !user.is_admin() {
                return Err(AppError::Core(CoreError::Forbidden(
                    "You may only access your own bookings".into(),
                )));
            }
            other
        }
        _ => user.user_id,
    };

    let page_params = PageParams {
        page: params.page,
        size: params.size,
    };
    let (limit, offset) = page_params.to_limit_offset();

    let items = BookingRepo::list_by_user(&state.pool, target, limit, offset).await?;
    let total = BookingRepo::count_by_user(&state.pool, target).await?;

    Ok(Json(DataResponse {
        data: Page {
            items,
            total,
            page: page_params.page.unwrap_or(1).max(1),
            size: limit,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /bookings/{id}
// ---------------------------------------------------------------------------

/// Booking detail (owner or admin).
pub async fn get_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = find_and_authorize(&state, id, &user).await?;
    Ok(Json(DataResponse { data: booking }))
}
