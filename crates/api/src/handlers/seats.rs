//! Handlers for the `/seats` resource: layout writes and the per-date
//! availability views.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use hotdesk_core::availability::{available_seat_ids, Occupancy, SeatClaim};
use hotdesk_core::error::CoreError;
use hotdesk_core::types::{BookingDate, DbId};
use hotdesk_db::models::seat::{
    BulkSeatOutcome, CreateSeat, Seat, SeatDeletion, UpdateSeat,
};
use hotdesk_db::models::status::StatusId;
use hotdesk_db::repositories::{BookingRepo, SeatRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::companies::ensure_member_admin;
use crate::handlers::floors::find_floor;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the per-floor seat view.
#[derive(Debug, Deserialize)]
pub struct FloorSeatsParams {
    pub date: Option<BookingDate>,
}

/// Query parameters for the free-seat listing.
#[derive(Debug, Deserialize)]
pub struct AvailableSeatsParams {
    pub floor_id: DbId,
    pub date: Option<BookingDate>,
}

/// One item of a bulk layout write: an update when `id` is present
/// (then `version` is required), a create otherwise.
#[derive(Debug, Deserialize)]
pub struct BulkSeatItem {
    pub id: Option<DbId>,
    pub seat_number: String,
    pub pos_x: f64,
    pub pos_y: f64,
    pub angle: Option<i32>,
    pub status_id: Option<StatusId>,
    pub version: Option<i32>,
}

/// Request body for `POST /seats/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkSeatRequest {
    pub floor_id: DbId,
    pub seats: Vec<BulkSeatItem>,
}

/// A seat annotated with its booking state for one date.
#[derive(Debug, Serialize)]
pub struct SeatAvailabilityView {
    #[serde(flatten)]
    pub seat: Seat,
    pub booked: bool,
    pub occupant_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a seat or map the miss to a 404.
async fn find_seat(state: &AppState, id: DbId) -> AppResult<Seat> {
    SeatRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Seat",
            id,
        })
    })
}

/// Admin writes on a seat require membership in the owning company.
async fn authorize_floor_admin(
    state: &AppState,
    admin: &AuthUser,
    floor_id: DbId,
) -> AppResult<()> {
    let floor = find_floor(state, floor_id).await?;
    ensure_member_admin(state, admin, floor.company_id).await
}

/// Fetch the occupant map for one floor and date.
async fn load_occupancy(
    state: &AppState,
    floor_id: DbId,
    date: BookingDate,
) -> AppResult<Occupancy> {
    let claims = BookingRepo::active_claims(&state.pool, floor_id, date)
        .await?
        .into_iter()
        .map(|c| SeatClaim {
            seat_id: c.seat_id,
            occupant_name: c.occupant_name,
        })
        .collect();
    Ok(Occupancy::from_claims(claims))
}

// ---------------------------------------------------------------------------
// POST /seats
// ---------------------------------------------------------------------------

/// Create a seat (admin). A duplicate seat number on the floor is
/// rejected by `uq_seats_floor_seat_number`.
pub async fn create_seat(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateSeat>,
) -> AppResult<(StatusCode, Json<DataResponse<Seat>>)> {
    if input.seat_number.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Seat number is required".into(),
        )));
    }
    authorize_floor_admin(&state, &admin, input.floor_id).await?;

    let seat = SeatRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: seat })))
}

// ---------------------------------------------------------------------------
// GET /seats/{id}
// ---------------------------------------------------------------------------

pub async fn get_seat(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Seat>>> {
    let seat = find_seat(&state, id).await?;
    Ok(Json(DataResponse { data: seat }))
}

// ---------------------------------------------------------------------------
// PUT /seats/{id}
// ---------------------------------------------------------------------------

/// Version-guarded layout update (admin).
///
/// The row is updated only if it still carries the presented version;
/// otherwise the caller learns whether the seat is gone (404) or was
/// modified concurrently (409) and must re-read before retrying.
pub async fn update_seat(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSeat>,
) -> AppResult<Json<DataResponse<Seat>>> {
    let seat = find_seat(&state, id).await?;
    authorize_floor_admin(&state, &admin, seat.floor_id).await?;

    match SeatRepo::update(&state.pool, id, &input).await? {
        Some(seat) => Ok(Json(DataResponse { data: seat })),
        None => match SeatRepo::find_by_id(&state.pool, id).await? {
            Some(_) => Err(AppError::Core(CoreError::StaleWrite {
                entity: "Seat",
                id,
            })),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "Seat",
                id,
            })),
        },
    }
}

// ---------------------------------------------------------------------------
// DELETE /seats/{id}
// ---------------------------------------------------------------------------

/// Delete a seat and its booking history (admin). Refused while the seat
/// has an active booking today or later.
pub async fn delete_seat(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let seat = find_seat(&state, id).await?;
    authorize_floor_admin(&state, &admin, seat.floor_id).await?;

    let today = Utc::now().date_naive();
    match SeatRepo::delete(&state.pool, id, today).await? {
        SeatDeletion::Deleted => {
            tracing::info!(seat_id = id, "Seat deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        SeatDeletion::BlockedByFutureBooking => Err(AppError::Core(CoreError::Conflict(
            "Seat has an active booking today or later".into(),
        ))),
        SeatDeletion::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Seat",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// POST /seats/bulk
// ---------------------------------------------------------------------------

/// Apply a batch of layout creates and updates for one floor in a single
/// transaction (admin). Any missing seat or stale version rolls the whole
/// batch back.
pub async fn bulk_apply_seats(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<BulkSeatRequest>,
) -> AppResult<Json<DataResponse<Vec<Seat>>>> {
    authorize_floor_admin(&state, &admin, input.floor_id).await?;

    let mut creates = Vec::new();
    let mut updates = Vec::new();
    for item in input.seats {
        if item.seat_number.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Seat number is required".into(),
            )));
        }
        match item.id {
            Some(id) => {
                let version = item.version.ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!(
                        "Update of seat {id} requires the version that was read"
                    )))
                })?;
                updates.push((
                    id,
                    UpdateSeat {
                        seat_number: Some(item.seat_number),
                        pos_x: Some(item.pos_x),
                        pos_y: Some(item.pos_y),
                        angle: item.angle,
                        status_id: item.status_id,
                        version,
                    },
                ));
            }
            None => creates.push(CreateSeat {
                floor_id: input.floor_id,
                seat_number: item.seat_number,
                pos_x: item.pos_x,
                pos_y: item.pos_y,
                angle: item.angle,
                status_id: item.status_id,
            }),
        }
    }

    match SeatRepo::bulk_apply(&state.pool, &creates, &updates).await? {
        BulkSeatOutcome::Applied(seats) => Ok(Json(DataResponse { data: seats })),
        BulkSeatOutcome::SeatNotFound(id) => Err(AppError::Core(CoreError::NotFound {
            entity: "Seat",
            id,
        })),
        BulkSeatOutcome::StaleVersion(id) => Err(AppError::Core(CoreError::StaleWrite {
            entity: "Seat",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// GET /seats/floor/{floor_id}
// ---------------------------------------------------------------------------

/// List a floor's seats. With `?date=`, each seat is annotated with its
/// booking state for that date; cancelled bookings never appear.
pub async fn list_floor_seats(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(floor_id): Path<DbId>,
    Query(params): Query<FloorSeatsParams>,
) -> AppResult<Response> {
    find_floor(&state, floor_id).await?;
    let seats = SeatRepo::list_by_floor(&state.pool, floor_id).await?;

    let Some(date) = params.date else {
        return Ok(Json(DataResponse { data: seats }).into_response());
    };

    let occupancy = load_occupancy(&state, floor_id, date).await?;
    let data: Vec<SeatAvailabilityView> = seats
        .into_iter()
        .map(|seat| {
            let occupant_name = occupancy.occupant(seat.id).map(str::to_string);
            SeatAvailabilityView {
                booked: occupant_name.is_some(),
                occupant_name,
                seat,
            }
        })
        .collect();

    Ok(Json(DataResponse { data }).into_response())
}

// ---------------------------------------------------------------------------
// GET /seats/available
// ---------------------------------------------------------------------------

/// List the seats on a floor with no active booking for the date
/// (defaults to today).
pub async fn list_available_seats(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<AvailableSeatsParams>,
) -> AppResult<Json<DataResponse<Vec<Seat>>>> {
    find_floor(&state, params.floor_id).await?;
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());

    let seats = SeatRepo::list_by_floor(&state.pool, params.floor_id).await?;
    let occupancy = load_occupancy(&state, params.floor_id, date).await?;

    let seat_ids: Vec<DbId> = seats.iter().map(|s| s.id).collect();
    let free: HashSet<DbId> = available_seat_ids(&seat_ids, &occupancy)
        .into_iter()
        .collect();
    let data: Vec<Seat> = seats.into_iter().filter(|s| free.contains(&s.id)).collect();

    Ok(Json(DataResponse { data }))
}
