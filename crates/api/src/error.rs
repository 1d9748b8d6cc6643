use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use hotdesk_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard JSON error body
/// `{ "message", "status", "timestamp", "errors"? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hotdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request-body validation failures, keyed by field name.
    #[error("Validation failed")]
    FieldValidation(BTreeMap<String, String>),

    /// A missing resource addressed by something other than a numeric id
    /// (e.g. a token).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let message = field_errors
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| format!("{field} is invalid"));
            fields.insert(field.to_string(), message);
        }
        AppError::FieldValidation(fields)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
                CoreError::StaleWrite { entity, id } => (
                    StatusCode::CONFLICT,
                    format!("{entity} with id {id} was modified concurrently"),
                    None,
                ),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Request validation errors ---
            AppError::FieldValidation(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(fields.clone()),
            ),

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "message": message,
            "status": status.as_u16(),
            "timestamp": Utc::now().to_rfc3339(),
        });
        if let Some(fields) = errors {
            body["errors"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, message, and optional field map.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 409. The two partial booking indexes get their business messages so a
///   race loser sees the same 409 as a caller caught by the pre-checks.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(
    err: &sqlx::Error,
) -> (StatusCode, String, Option<BTreeMap<String, String>>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                let message = match constraint {
                    "uq_bookings_seat_date_active" => {
                        "Seat is already booked for this date".to_string()
                    }
                    "uq_bookings_user_date_active" => {
                        "User already has a booking for this date".to_string()
                    }
                    c if c.starts_with("uq_") => {
                        format!("Duplicate value violates unique constraint: {c}")
                    }
                    _ => {
                        tracing::error!(error = %db_err, "Database error");
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "An internal error occurred".to_string(),
                            None,
                        );
                    }
                };
                return (StatusCode::CONFLICT, message, None);
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
                None,
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
                None,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, value)
    }

    #[tokio::test]
    async fn test_not_found_body_shape() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Seat",
            id: 7,
        });
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Seat with id 7 not found");
        assert_eq!(body["status"], 404);
        assert!(body["timestamp"].is_string());
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_stale_write_maps_to_conflict() {
        let err = AppError::Core(CoreError::StaleWrite {
            entity: "Seat",
            id: 3,
        });
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Seat with id 3 was modified concurrently");
    }

    #[tokio::test]
    async fn test_field_validation_includes_errors_map() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "must be a valid email".to_string());
        let (status, body) = body_json(AppError::FieldValidation(fields)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["email"], "must be a valid email");
    }

    #[tokio::test]
    async fn test_row_not_found_maps_to_404() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::RowNotFound)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resource not found");
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden_statuses() {
        let (status, _) =
            body_json(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            body_json(AppError::Core(CoreError::Forbidden("admins only".into()))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_validation_errors_flatten_to_field_map() {
        use assert_matches::assert_matches;
        use validator::Validate;

        #[derive(Validate)]
        struct SignupForm {
            #[validate(email(message = "must be a valid email"))]
            email: String,
        }

        let form = SignupForm {
            email: "not-an-email".to_string(),
        };
        let err: AppError = form.validate().unwrap_err().into();

        assert_matches!(err, AppError::FieldValidation(fields) => {
            assert_eq!(
                fields.get("email").map(String::as_str),
                Some("must be a valid email")
            );
        });
    }
}
