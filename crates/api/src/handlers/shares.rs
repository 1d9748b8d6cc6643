//! Handlers for the `/shares` resource: one user showing a set of their
//! bookings to a colleague.
//!
//! Each share row carries the latest booking date among the shared
//! bookings so the retention sweep can expire whole shares with a single
//! column comparison.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hotdesk_core::error::CoreError;
use hotdesk_core::retention::latest_booking_date;
use hotdesk_core::types::DbId;
use hotdesk_db::models::share::{CreateShare, Share};
use hotdesk_db::repositories::{BookingRepo, ShareRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /shares`.
#[derive(Debug, Deserialize)]
pub struct CreateShareRequest {
    pub recipient_id: DbId,
    #[serde(default)]
    pub booking_ids: Vec<DbId>,
    pub message: Option<String>,
}

/// Query parameters for `GET /shares`.
#[derive(Debug, Deserialize)]
pub struct ListSharesParams {
    /// When true, only shares without a read marker are returned.
    pub unread: Option<bool>,
}

/// Share a set of the caller's bookings with another user.
pub async fn create_share(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateShareRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Share>>)> {
    UserRepo::find_by_id(&state.pool, input.recipient_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: input.recipient_id,
            })
        })?;

    // Every shared booking must exist and belong to the sender.
    let mut dates = Vec::with_capacity(input.booking_ids.len());
    for &booking_id in &input.booking_ids {
        let booking = BookingRepo::find_by_id(&state.pool, booking_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Booking",
                    id: booking_id,
                })
            })?;
        if booking.user_id != user.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "You may only share your own bookings".into(),
            )));
        }
        dates.push(booking.booking_date);
    }

    // Empty shares are stamped with today so retention still applies.
    let max_booking_date =
        latest_booking_date(&dates).unwrap_or_else(|| Utc::now().date_naive());

    let share = ShareRepo::create(
        &state.pool,
        &CreateShare {
            sender_id: user.user_id,
            recipient_id: input.recipient_id,
            booking_ids: input.booking_ids,
            message: input.message,
            max_booking_date: Some(max_booking_date),
        },
    )
    .await?;

    tracing::info!(
        share_id = share.id,
        sender_id = share.sender_id,
        recipient_id = share.recipient_id,
        "Share created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: share })))
}

/// Shares addressed to the caller, newest first.
pub async fn list_received_shares(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListSharesParams>,
) -> AppResult<Json<DataResponse<Vec<Share>>>> {
    let mut shares = ShareRepo::list_received(&state.pool, user.user_id).await?;
    if params.unread.unwrap_or(false) {
        shares.retain(|s| s.read_at.is_none());
    }
    Ok(Json(DataResponse { data: shares }))
}

/// Mark a share as read. Recipient only; marking twice is a no-op.
pub async fn mark_share_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Share>>> {
    if !ShareRepo::mark_read(&state.pool, id, user.user_id).await? {
        // Either absent, not addressed to the caller, or already read.
        // Only the last is a success.
        match ShareRepo::find_by_id(&state.pool, id).await? {
            Some(share) if share.recipient_id == user.user_id => {
                return Ok(Json(DataResponse { data: share }));
            }
            _ => {
                return Err(AppError::NotFound("Share not found".into()));
            }
        }
    }
    fetch_updated(&state, id).await
}

/// Clear the read marker on a share. Recipient only; a share that was
/// never read is returned unchanged.
pub async fn mark_share_unread(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Share>>> {
    if !ShareRepo::mark_unread(&state.pool, id, user.user_id).await? {
        match ShareRepo::find_by_id(&state.pool, id).await? {
            Some(share) if share.recipient_id == user.user_id => {
                return Ok(Json(DataResponse { data: share }));
            }
            _ => {
                return Err(AppError::NotFound("Share not found".into()));
            }
        }
    }
    fetch_updated(&state, id).await
}

async fn fetch_updated(state: &AppState, id: DbId) -> AppResult<Json<DataResponse<Share>>> {
    let share = ShareRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Share not found".into()))?;
    Ok(Json(DataResponse { data: share }))
}
