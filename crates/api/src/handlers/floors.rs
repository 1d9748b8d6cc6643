//! Handlers for the `/floors` resource, including the layout edit lock.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use hotdesk_core::error::CoreError;
use hotdesk_core::types::DbId;
use hotdesk_db::models::floor::{CreateFloor, Floor, FloorDeletion};
use hotdesk_db::repositories::{FloorLockRepo, FloorRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::companies::ensure_member_admin;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /floors`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFloorRequest {
    pub company_id: DbId,
    #[validate(length(min = 1, message = "Floor name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Floor number must be at least 1"))]
    pub floor_number: i32,
}

/// Load a floor or map the miss to a 404.
pub(crate) async fn find_floor(state: &AppState, id: DbId) -> AppResult<Floor> {
    FloorRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Floor",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// POST /floors
// ---------------------------------------------------------------------------

/// Create a floor (admin, own company only). A duplicate floor number in
/// the company is rejected by `uq_floors_company_floor_number`.
pub async fn create_floor(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateFloorRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Floor>>)> {
    input.validate()?;
    ensure_member_admin(&state, &admin, input.company_id).await?;

    let floor = FloorRepo::create(
        &state.pool,
        &CreateFloor {
            company_id: input.company_id,
            name: input.name,
            floor_number: input.floor_number,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: floor })))
}

// ---------------------------------------------------------------------------
// GET /floors/{id}
// ---------------------------------------------------------------------------

pub async fn get_floor(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Floor>>> {
    let floor = find_floor(&state, id).await?;
    Ok(Json(DataResponse { data: floor }))
}

// ---------------------------------------------------------------------------
// GET /floors/company/{company_id}
// ---------------------------------------------------------------------------

pub async fn list_company_floors(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(company_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Floor>>>> {
    let data = FloorRepo::list_by_company(&state.pool, company_id).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// DELETE /floors/{id}
// ---------------------------------------------------------------------------

/// Delete a floor with its seats and booking history. Refused while any
/// seat on the floor has an active booking today or later.
pub async fn delete_floor(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let floor = find_floor(&state, id).await?;
    ensure_member_admin(&state, &admin, floor.company_id).await?;

    let today = Utc::now().date_naive();
    match FloorRepo::delete(&state.pool, id, today).await? {
        FloorDeletion::Deleted => {
            tracing::info!(floor_id = id, "Floor deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        FloorDeletion::BlockedByFutureBooking => Err(AppError::Core(CoreError::Conflict(
            "Floor has seats with active bookings today or later".into(),
        ))),
        FloorDeletion::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Floor",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// POST /floors/{id}/lock
// ---------------------------------------------------------------------------

/// Acquire the edit lock on a floor.
///
/// The insert-if-absent against `uq_floor_locks_floor` is the arbiter:
/// whoever lands the row owns the lock. Re-acquiring a lock you already
/// hold is a no-op success.
pub async fn lock_floor(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<axum::response::Response> {
    let floor = find_floor(&state, id).await?;
    ensure_member_admin(&state, &admin, floor.company_id).await?;

    if let Some(lock) = FloorLockRepo::acquire(&state.pool, id, admin.user_id).await? {
        tracing::info!(floor_id = id, user_id = admin.user_id, "Floor lock acquired");
        return Ok((StatusCode::CREATED, Json(DataResponse { data: lock })).into_response());
    }

    // The insert was a no-op, so a lock row existed a moment ago.
    match FloorLockRepo::find_by_floor(&state.pool, id).await? {
        Some(lock) if lock.locked_by == admin.user_id => Ok(StatusCode::NO_CONTENT.into_response()),
        Some(_) => Err(AppError::Core(CoreError::Conflict(
            "Floor is locked by another user".into(),
        ))),
        None => Err(AppError::Core(CoreError::Conflict(
            "Floor lock was just released; retry".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// DELETE /floors/{id}/lock
// ---------------------------------------------------------------------------

/// Release the edit lock on a floor.
///
/// Only the holder's delete matches any row. Releasing a floor that is
/// not locked at all is a no-op success; releasing someone else's lock is
/// a conflict.
pub async fn unlock_floor(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let floor = find_floor(&state, id).await?;
    ensure_member_admin(&state, &admin, floor.company_id).await?;

    if FloorLockRepo::release(&state.pool, id, admin.user_id).await? {
        tracing::info!(floor_id = id, user_id = admin.user_id, "Floor lock released");
        return Ok(StatusCode::NO_CONTENT);
    }

    match FloorLockRepo::find_by_floor(&state.pool, id).await? {
        Some(_) => Err(AppError::Core(CoreError::Conflict(
            "Floor is locked by another user".into(),
        ))),
        None => Ok(StatusCode::NO_CONTENT),
    }
}
