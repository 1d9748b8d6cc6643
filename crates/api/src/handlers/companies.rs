//! Handlers for the `/companies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hotdesk_core::error::CoreError;
use hotdesk_core::tokens::{self, DEFAULT_TOKEN_TTL_HOURS};
use hotdesk_core::types::DbId;
use hotdesk_db::models::company::{Company, CreateCompany};
use hotdesk_db::models::invite::Invite;
use hotdesk_db::models::one_time_code::OneTimeCode;
use hotdesk_db::repositories::{CompanyRepo, InviteRepo, OneTimeCodeRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /companies`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,
    pub address: Option<String>,
}

/// Request body for invite and one-time-code creation.
#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    /// Hours until expiry; defaults to 24, capped at 720.
    pub expiration_in_hours: Option<i64>,
}

impl CreateTokenRequest {
    fn ttl_hours(&self) -> AppResult<i64> {
        let hours = self.expiration_in_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        tokens::validate_ttl_hours(hours)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
        Ok(hours)
    }
}

/// Load a company or map the miss to a 404.
async fn find_company(state: &AppState, id: DbId) -> AppResult<Company> {
    CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Company",
                id,
            })
        })
}

/// Admin actions on a company require membership in that company.
pub(crate) async fn ensure_member_admin(
    state: &AppState,
    admin: &AuthUser,
    company_id: DbId,
) -> AppResult<()> {
    let row = UserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: admin.user_id,
            })
        })?;
    if row.company_id != Some(company_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot manage another company".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /companies
// ---------------------------------------------------------------------------

/// Create a company and attach the caller to it. Callers who already
/// belong to a company are rejected. The name pre-check gives the
/// friendly conflict message; `uq_companies_name` still decides races.
pub async fn create_company(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCompanyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Company>>)> {
    input.validate()?;

    let caller = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user.user_id,
            })
        })?;
    if caller.company_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "You already belong to a company".into(),
        )));
    }

    if CompanyRepo::find_by_name(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A company with this name already exists".into(),
        )));
    }

    let company = CompanyRepo::create(
        &state.pool,
        &CreateCompany {
            name: input.name,
            address: input.address,
        },
    )
    .await?;

    UserRepo::set_company(&state.pool, user.user_id, Some(company.id)).await?;
    tracing::info!(company_id = company.id, user_id = user.user_id, "Company created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: company })))
}

// ---------------------------------------------------------------------------
// GET /companies/{id}
// ---------------------------------------------------------------------------

pub async fn get_company(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = find_company(&state, id).await?;
    Ok(Json(DataResponse { data: company }))
}

// ---------------------------------------------------------------------------
// POST /companies/{id}/invites
// ---------------------------------------------------------------------------

/// Issue an invite token for the company (admin, own company only).
pub async fn create_invite(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTokenRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Invite>>)> {
    find_company(&state, id).await?;
    ensure_member_admin(&state, &admin, id).await?;
    let ttl_hours = input.ttl_hours()?;

    let token = tokens::generate_token();
    let expires_at = tokens::expiry_from(Utc::now(), ttl_hours);
    let invite = InviteRepo::create(&state.pool, id, &token, expires_at).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: invite })))
}

// ---------------------------------------------------------------------------
// GET /companies/{id}/invites
// ---------------------------------------------------------------------------

/// List a company's invites (admin, own company only).
pub async fn list_invites(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Invite>>>> {
    find_company(&state, id).await?;
    ensure_member_admin(&state, &admin, id).await?;

    let data = InviteRepo::list_by_company(&state.pool, id).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// POST /companies/{id}/codes
// ---------------------------------------------------------------------------

/// Issue a one-time registration code for the company (admin, own company
/// only).
pub async fn create_one_time_code(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<CreateTokenRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<OneTimeCode>>)> {
    find_company(&state, id).await?;
    ensure_member_admin(&state, &admin, id).await?;
    let ttl_hours = input.ttl_hours()?;

    let code = tokens::generate_one_time_code();
    let expires_at = tokens::expiry_from(Utc::now(), ttl_hours);
    let row = OneTimeCodeRepo::create(&state.pool, id, &code, expires_at).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}
