//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hotdesk_core::error::CoreError;
use hotdesk_core::roles::ROLE_EMPLOYEE;
use hotdesk_core::types::DbId;
use hotdesk_db::models::user::{UpdateUser, User, UserResponse};
use hotdesk_db::repositories::{RoleRepo, UserRepo};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::validate_password_mix;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = validate_password_mix)
    )]
    pub password: Option<String>,
}

/// Map a user row to its API shape, resolving the role name.
pub(crate) async fn to_user_response(pool: &PgPool, user: User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(pool, user.role_id).await?;
    Ok(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role,
        company_id: user.company_id,
        enabled: user.enabled,
        created_at: user.created_at,
    })
}

/// Load a user or map the miss to a 404.
async fn find_user(pool: &PgPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        })
    })
}

/// An admin may only look at users inside their own company.
async fn ensure_same_company(pool: &PgPool, admin: &AuthUser, company_id: DbId) -> AppResult<()> {
    let admin_row = find_user(pool, admin.user_id).await?;
    if admin_row.company_id != Some(company_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot access users of another company".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /users/me
// ---------------------------------------------------------------------------

pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let row = find_user(&state.pool, user.user_id).await?;
    let data = to_user_response(&state.pool, row).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// PUT /users/me
// ---------------------------------------------------------------------------

/// Update the caller's own name and/or password.
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    if let Some(password) = &input.password {
        let password_hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::set_password(&state.pool, user.user_id, &password_hash).await?;
    }

    let row = if input.name.is_some() {
        UserRepo::update(
            &state.pool,
            user.user_id,
            &UpdateUser {
                name: input.name,
                email: None,
                enabled: None,
            },
        )
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: user.user_id,
            })
        })?
    } else {
        find_user(&state.pool, user.user_id).await?
    };

    let data = to_user_response(&state.pool, row).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// GET /companies/{id}/users
// ---------------------------------------------------------------------------

/// List a company's users (admin, own company only).
pub async fn list_company_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(company_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    ensure_same_company(&state.pool, &admin, company_id).await?;

    let rows = UserRepo::list_by_company(&state.pool, company_id).await?;
    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        data.push(to_user_response(&state.pool, row).await?);
    }
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// DELETE /companies/{id}/users/{employee_id}
// ---------------------------------------------------------------------------

/// Detach an employee from a company (admin, own company only). The
/// account itself survives; only the membership is cleared. Admin
/// accounts cannot be removed this way.
pub async fn remove_employee(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((company_id, employee_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_same_company(&state.pool, &admin, company_id).await?;

    let employee = find_user(&state.pool, employee_id).await?;
    let role = RoleRepo::resolve_name(&state.pool, employee.role_id).await?;
    if role != ROLE_EMPLOYEE {
        return Err(AppError::Core(CoreError::Conflict(
            "Only employees can be removed from a company".into(),
        )));
    }
    if employee.company_id != Some(company_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot remove an employee from another company".into(),
        )));
    }

    UserRepo::set_company(&state.pool, employee_id, None).await?;
    tracing::info!(
        user_id = employee_id,
        company_id,
        "Employee removed from company"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /users/{id}
// ---------------------------------------------------------------------------

/// Fetch one user (admin, own company only).
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let row = find_user(&state.pool, id).await?;
    let company_id = row.company_id.ok_or_else(|| {
        AppError::Core(CoreError::Forbidden(
            "You cannot access users of another company".into(),
        ))
    })?;
    ensure_same_company(&state.pool, &admin, company_id).await?;

    let data = to_user_response(&state.pool, row).await?;
    Ok(Json(DataResponse { data }))
}
