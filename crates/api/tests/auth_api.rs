//! HTTP-level integration tests for registration, login, and password reset.
//!
//! Covers the three onboarding paths (fresh admin, invite token, one-time
//! code), credential checks, bearer-token enforcement, and the hashed
//! single-use reset token flow.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get, get_auth, login_token, post_json, put_json_auth};
use sqlx::PgPool;

use hotdesk_api::auth::password::hash_password;
use hotdesk_api::auth::reset::generate_reset_token;
use hotdesk_db::models::company::CreateCompany;
use hotdesk_db::models::user::{CreateUser, UpdateUser, User};
use hotdesk_db::repositories::{
    CompanyRepo, InviteRepo, OneTimeCodeRepo, PasswordResetTokenRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ADMIN_ROLE_ID: i64 = 1;
const EMPLOYEE_ROLE_ID: i64 = 2;

/// Plaintext password used for directly seeded users.
const TEST_PASSWORD: &str = "Passw0rd123";

/// Create a user directly in the database, bypassing the register endpoint.
async fn seed_user(pool: &PgPool, email: &str, role_id: i64, company_id: Option<i64>) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Seeded User".to_string(),
            email: email.to_string(),
            password_hash,
            role_id,
            company_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Create a company directly in the database.
async fn seed_company(pool: &PgPool, name: &str) -> i64 {
    CompanyRepo::create(
        pool,
        &CreateCompany {
            name: name.to_string(),
            address: None,
        },
    )
    .await
    .expect("company creation should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Test: registration
// ---------------------------------------------------------------------------

/// Registering without an invite or code creates a company-less admin.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_creates_company_less_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Grace",
        "email": "grace@example.test",
        "password": "Passw0rd123"
    });

    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "grace@example.test");
    assert_eq!(json["data"]["role"], "admin");
    assert!(json["data"]["company_id"].is_null());
    assert_eq!(json["data"]["enabled"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    seed_user(&pool, "taken@example.test", ADMIN_ROLE_ID, None).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Impostor",
        "email": "taken@example.test",
        "password": "Passw0rd123"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Email is already registered");
}

/// Short passwords are rejected with a field-level validation error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Short",
        "email": "short@example.test",
        "password": "Ab1"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed");
    assert!(json["errors"]["password"].is_string());
}

/// Passwords must mix upper case, lower case, and digits.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_requires_password_mix(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Monotone",
        "email": "monotone@example.test",
        "password": "alllowercase"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let message = json["errors"]["password"].as_str().unwrap_or("");
    assert!(
        message.contains("uppercase"),
        "error should name the missing character class, got: {message}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Typo",
        "email": "not-an-email",
        "password": "Passw0rd123"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["email"].is_string());
}

/// A valid invite token turns the registration into an employee joining
/// that company, and the invite's join counter advances.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_with_invite_joins_company(pool: PgPool) {
    let company_id = seed_company(&pool, "Initech").await;
    let invite = InviteRepo::create(
        &pool,
        company_id,
        "welcome-token",
        Utc::now() + Duration::hours(24),
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Newhire",
        "email": "newhire@initech.test",
        "password": "Passw0rd123",
        "invite_token": "welcome-token"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "employee");
    assert_eq!(json["data"]["company_id"], company_id);

    let invite = InviteRepo::find_by_token(&pool, "welcome-token")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(invite.joined_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_with_expired_invite_rejected(pool: PgPool) {
    let company_id = seed_company(&pool, "Initech").await;
    InviteRepo::create(
        &pool,
        company_id,
        "too-late",
        Utc::now() - Duration::hours(1),
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Latecomer",
        "email": "late@initech.test",
        "password": "Passw0rd123",
        "invite_token": "too-late"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired invite token");
}

/// A one-time code is the invite's counterpart for registrations without a
/// personal link; each redemption advances the use counter.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_with_one_time_code_joins_company(pool: PgPool) {
    let company_id = seed_company(&pool, "Initech").await;
    OneTimeCodeRepo::create(&pool, company_id, "ABCDE12345", Utc::now() + Duration::hours(72))
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Walkin",
        "email": "walkin@initech.test",
        "password": "Passw0rd123",
        "one_time_code": "ABCDE12345"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "employee");
    assert_eq!(json["data"]["company_id"], company_id);

    let code = OneTimeCodeRepo::find_by_code(&pool, "ABCDE12345")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(code.used_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_with_invite_and_code_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Greedy",
        "email": "greedy@example.test",
        "password": "Passw0rd123",
        "invite_token": "a",
        "one_time_code": "b"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A registration that fails must not consume the invite: the join counter
/// only advances once the account row lands.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_registration_does_not_consume_invite(pool: PgPool) {
    let company_id = seed_company(&pool, "Initech").await;
    InviteRepo::create(
        &pool,
        company_id,
        "welcome-token",
        Utc::now() + Duration::hours(24),
    )
    .await
    .unwrap();
    seed_user(&pool, "taken@initech.test", EMPLOYEE_ROLE_ID, Some(company_id)).await;

    let body = serde_json::json!({
        "name": "Copycat",
        "email": "taken@initech.test",
        "password": "Passw0rd123",
        "invite_token": "welcome-token"
    });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let invite = InviteRepo::find_by_token(&pool, "welcome-token")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(invite.joined_count, 0);
}

/// Two racing registrations with the same email through one invite: the
/// loser fails on `uq_users_email`, and only the winner counts a join.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_racing_registrations_count_one_join(pool: PgPool) {
    let company_id = seed_company(&pool, "Initech").await;
    InviteRepo::create(
        &pool,
        company_id,
        "welcome-token",
        Utc::now() + Duration::hours(24),
    )
    .await
    .unwrap();

    let body = serde_json::json!({
        "name": "Twin",
        "email": "twin@initech.test",
        "password": "Passw0rd123",
        "invite_token": "welcome-token"
    });
    let (a, b) = tokio::join!(
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/register", body.clone()),
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/register", body),
    );

    let created = [a.status(), b.status()]
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1, "exactly one registration must win the email");

    let invite = InviteRepo::find_by_token(&pool, "welcome-token")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(invite.joined_count, 1);
}

// ---------------------------------------------------------------------------
// Test: login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_returns_token_and_user(pool: PgPool) {
    let user = seed_user(&pool, "login@example.test", ADMIN_ROLE_ID, None).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "login@example.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_unauthorized(pool: PgPool) {
    seed_user(&pool, "victim@example.test", ADMIN_ROLE_ID, None).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "victim@example.test", "password": "Wrong0pass" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email or password");
}

/// Unknown emails get the same message as wrong passwords.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "ghost@example.test", "password": "Whatever1x" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_disabled_account_forbidden(pool: PgPool) {
    let user = seed_user(&pool, "benched@example.test", EMPLOYEE_ROLE_ID, None).await;
    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            name: None,
            email: None,
            enabled: Some(false),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "benched@example.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Account is disabled");
}

// ---------------------------------------------------------------------------
// Test: bearer-token enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Missing Authorization header");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_own_profile(pool: PgPool) {
    let user = seed_user(&pool, "me@example.test", EMPLOYEE_ROLE_ID, None).await;
    let token = login_token(
        common::build_test_app(pool.clone()),
        "me@example.test",
        TEST_PASSWORD,
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["email"], "me@example.test");
    assert!(json["data"].get("password_hash").is_none());
}

/// PUT /users/me can rotate name and password; the new password works on
/// the next login and the old one stops working.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_me_rotates_password(pool: PgPool) {
    seed_user(&pool, "rotate@example.test", EMPLOYEE_ROLE_ID, None).await;
    let token = login_token(
        common::build_test_app(pool.clone()),
        "rotate@example.test",
        TEST_PASSWORD,
    )
    .await;

    let body = serde_json::json!({ "name": "Rotated", "password": "Fresh1word" });
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/users/me",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Rotated");

    let relogin = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "rotate@example.test", "password": "Fresh1word" }),
    )
    .await;
    assert_eq!(relogin.status(), StatusCode::OK);

    let stale = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "rotate@example.test", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: password reset
// ---------------------------------------------------------------------------

/// The request endpoint answers 204 whether or not the email exists, so it
/// cannot be used to probe for accounts. A token row appears only for the
/// real one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_request_does_not_reveal_accounts(pool: PgPool) {
    let user = seed_user(&pool, "real@example.test", EMPLOYEE_ROLE_ID, None).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password-reset/request",
        serde_json::json!({ "email": "real@example.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password-reset/request",
        serde_json::json!({ "email": "nobody@example.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let tokens: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM password_reset_tokens WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(tokens, 1);
}

/// Full reset round trip: the plaintext token (which the database never
/// stores) unlocks exactly one password change.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_confirm_changes_password_once(pool: PgPool) {
    let user = seed_user(&pool, "forgot@example.test", EMPLOYEE_ROLE_ID, None).await;
    let (plaintext, token_hash) = generate_reset_token();
    PasswordResetTokenRepo::create(&pool, user.id, &token_hash, Utc::now() + Duration::hours(24))
        .await
        .unwrap();

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password-reset/confirm",
        serde_json::json!({ "token": plaintext, "new_password": "Restored1pw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let relogin = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "forgot@example.test", "password": "Restored1pw" }),
    )
    .await;
    assert_eq!(relogin.status(), StatusCode::OK);

    // Second redemption of the same token must fail: it was deleted on use.
    let replay = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/password-reset/confirm",
        serde_json::json!({ "token": plaintext, "new_password": "Another1pw" }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_confirm_expired_token_rejected(pool: PgPool) {
    let user = seed_user(&pool, "slow@example.test", EMPLOYEE_ROLE_ID, None).await;
    let (plaintext, token_hash) = generate_reset_token();
    PasswordResetTokenRepo::create(&pool, user.id, &token_hash, Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/auth/password-reset/confirm",
        serde_json::json!({ "token": plaintext, "new_password": "TooLate1pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired password reset token");
}
