//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Handler -> Result<T, ApiError>                                         │
//! │         │                                                               │
//! │         ├── DbError::NotFound ──────────────► 404 NOT_FOUND             │
//! │         ├── DbError::UniqueViolation ───────► 409 CONFLICT              │
//! │         ├── DbError::QueryFailed (logged) ──► 500 DATABASE_ERROR        │
//! │         ├── CoreError::Validation ──────────► 400 VALIDATION_ERROR      │
//! │         ├── CoreError::ProductNotFound ─────► 404 NOT_FOUND             │
//! │         ├── bad JSON body ──────────────────► 400 BAD_REQUEST           │
//! │         └── missing/invalid admin token ────► 401 UNAUTHORIZED          │
//! │                                                                         │
//! │  Body: { "code": "NOT_FOUND", "message": "Product not found: wd-1" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Database internals are logged, never sent to the client.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sindean_core::cart::CartStoreError;
use sindean_core::{CoreError, ValidationError};
use sindean_db::DbError;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned by every failing request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Body could not be parsed (400)
    BadRequest,

    /// Missing or invalid admin session (401)
    Unauthorized,

    /// Duplicate record (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Cart could not be saved (500)
    CartError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::CartError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{field} '{value}' already exists"),
            ),
            DbError::ConstraintViolation { message } => {
                tracing::warn!(%message, "Constraint violation");
                ApiError::validation("Invalid field value")
            }
            DbError::CorruptData { column, reason } => {
                tracing::error!(%column, %reason, "Corrupt stored data");
                ApiError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::Validation(e) => e.into(),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<CartStoreError> for ApiError {
    fn from(err: CartStoreError) -> Self {
        tracing::error!(error = %err, "Cart storage failed");
        ApiError::new(ErrorCode::CartError, "Cart could not be saved")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::BadRequest, rejection.body_text())
    }
}

/// `Json` extractor whose rejection is an [`ApiError`] body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::not_found("Product", "x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::unauthorized("no").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(DbError::QueryFailed("syntax error near SELECT".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_internals_not_leaked() {
        let err = ApiError::from(DbError::QueryFailed("no such table: orders".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("orders"));
    }

    #[test]
    fn test_core_errors() {
        let err = ApiError::from(CoreError::ProductNotFound("wd-1".into()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: wd-1");

        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::validation("name is required")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }
}
