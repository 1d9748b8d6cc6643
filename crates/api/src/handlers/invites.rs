//! Handler for invite-token lookup during onboarding.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use hotdesk_core::tokens;
use hotdesk_core::types::{DbId, Timestamp};
use hotdesk_db::repositories::{CompanyRepo, InviteRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// What a prospective employee sees when they open an invite link.
#[derive(Debug, Serialize)]
pub struct InvitePreview {
    pub company_id: DbId,
    pub company_name: String,
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// GET /invites/{token}
// ---------------------------------------------------------------------------

/// Resolve an invite token to its company. Unknown and expired tokens are
/// both a 404 so the response does not reveal which one it was.
pub async fn get_invite_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<InvitePreview>>> {
    let not_found = || AppError::NotFound("Invalid or expired invite token".into());

    let invite = InviteRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or_else(not_found)?;
    if tokens::is_expired(invite.expires_at, Utc::now()) {
        return Err(not_found());
    }

    let company = CompanyRepo::find_by_id(&state.pool, invite.company_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(DataResponse {
        data: InvitePreview {
            company_id: company.id,
            company_name: company.name,
            expires_at: invite.expires_at,
        },
    }))
}
