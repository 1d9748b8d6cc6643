//! Handlers for registration, login, and password reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hotdesk_core::error::CoreError;
use hotdesk_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use hotdesk_core::tokens::{self, RESET_TOKEN_TTL_HOURS};
use hotdesk_db::models::invite::Invite;
use hotdesk_db::models::one_time_code::OneTimeCode;
use hotdesk_db::models::user::{CreateUser, UserResponse};
use hotdesk_db::repositories::{
    CompanyRepo, InviteRepo, OneTimeCodeRepo, PasswordResetTokenRepo, RoleRepo, UserRepo,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::reset::{generate_reset_token, hash_reset_token};
use crate::error::{AppError, AppResult};
use crate::handlers::users::to_user_response;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// `invite_token` or `one_time_code` joins an existing company as an
/// employee; with neither, the account is created as a company-less admin
/// who completes onboarding by creating a company.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = validate_password_mix)
    )]
    pub password: String,
    pub invite_token: Option<String>,
    pub one_time_code: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/password-reset/request`.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request body for `POST /auth/password-reset/confirm`.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetConfirm {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom(function = validate_password_mix)
    )]
    pub new_password: String,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Passwords must mix upper case, lower case, and digits.
pub(crate) fn validate_password_mix(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_mix");
        err.message = Some(
            "Password must contain at least one uppercase letter, one lowercase letter, and one digit"
                .into(),
        );
        Err(err)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. The email pre-check gives the friendly conflict
/// message; `uq_users_email` still decides races.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;

    if input.invite_token.is_some() && input.one_time_code.is_some() {
        return Err(AppError::BadRequest(
            "Provide an invite token or a one-time code, not both".into(),
        ));
    }

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    // Joining via invite or code makes the account an employee of that
    // company; otherwise it starts as a company-less admin. The counters
    // advance only after the account row lands (see below).
    let mut invite_id = None;
    let mut code_id = None;
    let (role_name, company_id) = if let Some(token) = &input.invite_token {
        let invite = resolve_invite(&state, token).await?;
        invite_id = Some(invite.id);
        (ROLE_EMPLOYEE, Some(invite.company_id))
    } else if let Some(code) = &input.one_time_code {
        let code_row = resolve_one_time_code(&state, code).await?;
        code_id = Some(code_row.id);
        (ROLE_EMPLOYEE, Some(code_row.company_id))
    } else {
        (ROLE_ADMIN, None)
    };

    let role = RoleRepo::find_by_name(&state.pool, role_name)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role {role_name} is not seeded")))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role_id: role.id,
            company_id,
        },
    )
    .await?;

    // Count the join only now: a registration that loses the email race on
    // the insert must not have consumed the invite or code.
    if let Some(id) = invite_id {
        InviteRepo::increment_joined(&state.pool, id).await?;
    } else if let Some(id) = code_id {
        OneTimeCodeRepo::increment_used(&state.pool, id).await?;
    }

    let data = to_user_response(&state.pool, user).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !user.enabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is disabled".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let access_token = generate_access_token(user.id, &role_name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    let user = to_user_response(&state.pool, user).await?;
    Ok(Json(AuthResponse {
        access_token,
        expires_in,
        user,
    }))
}

/// POST /api/v1/auth/password-reset/request
///
/// Issue a reset token for the account, if one exists. Responds 204 either
/// way so the endpoint cannot be used to probe for registered emails. Only
/// the token hash is stored; delivery of the plaintext is external.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let (plaintext, token_hash) = generate_reset_token();
        let expires_at = tokens::expiry_from(Utc::now(), RESET_TOKEN_TTL_HOURS);
        PasswordResetTokenRepo::create(&state.pool, user.id, &token_hash, expires_at).await?;
        tracing::info!(user_id = user.id, "Password reset token issued");
        // TODO: hand the plaintext to the mail sender once one is wired up.
        tracing::debug!(user_id = user.id, token = %plaintext, "Password reset token (no delivery channel configured)");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password-reset/confirm
///
/// Exchange a valid reset token for a new password. The token is single
/// use: it is deleted as soon as the password changes.
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetConfirm>,
) -> AppResult<StatusCode> {
    input.validate()?;

    let token_hash = hash_reset_token(&input.token);
    let reset_token = PasswordResetTokenRepo::find_by_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Invalid or expired password reset token".into())
        })?;

    if tokens::is_expired(reset_token.expires_at, Utc::now()) {
        return Err(AppError::BadRequest(
            "Invalid or expired password reset token".into(),
        ));
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password(&state.pool, reset_token.user_id, &password_hash).await?;
    PasswordResetTokenRepo::delete_by_id(&state.pool, reset_token.id).await?;

    tracing::info!(user_id = reset_token.user_id, "Password reset completed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve an invite token, rejecting unknown and expired ones.
async fn resolve_invite(state: &AppState, token: &str) -> AppResult<Invite> {
    let invite = InviteRepo::find_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired invite token".into()))?;

    if tokens::is_expired(invite.expires_at, Utc::now()) {
        return Err(AppError::BadRequest("Invalid or expired invite token".into()));
    }
    Ok(invite)
}

/// Resolve a one-time code, rejecting unknown and expired ones.
async fn resolve_one_time_code(state: &AppState, code: &str) -> AppResult<OneTimeCode> {
    let code_row = OneTimeCodeRepo::find_by_code(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid one-time code".into()))?;

    if tokens::is_expired(code_row.expires_at, Utc::now()) {
        return Err(AppError::BadRequest("One-time code has expired".into()));
    }

    // The code's company must still exist before we attach a user to it.
    CompanyRepo::find_by_id(&state.pool, code_row.company_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Company",
                id: code_row.company_id,
            })
        })?;

    Ok(code_row)
}
