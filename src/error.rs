use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists. Please choose another.")]
    DuplicateUsername,

    #[error("Password must be at least {min} characters.", min = crate::service::account_store::MIN_PASSWORD_LEN)]
    InvalidPassword,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Please log in to access the Clothing Sales Tracker.")]
    Unauthenticated,

    #[error("Request body is too large.")]
    PayloadTooLarge,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl LedgerError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        LedgerError::InvalidInput(reason.into())
    }

    /// Stable machine-readable code carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidInput(_) => "INVALID_INPUT",
            LedgerError::DuplicateUsername => "DUPLICATE_USERNAME",
            LedgerError::InvalidPassword => "INVALID_PASSWORD",
            LedgerError::InvalidCredentials => "INVALID_CREDENTIALS",
            LedgerError::Unauthenticated => "UNAUTHENTICATED",
            LedgerError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            LedgerError::DatabaseError(_)
            | LedgerError::PasswordHash(_)
            | LedgerError::TaskJoin(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<argon2::password_hash::Error> for LedgerError {
    fn from(e: argon2::password_hash::Error) -> Self {
        LedgerError::PasswordHash(e.to_string())
    }
}

/// Malformed, mistyped or non-JSON bodies are input errors; only the body
/// limit keeps its own status.
impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return LedgerError::PayloadTooLarge;
        }
        LedgerError::InvalidInput(format!(
            "Request body is not valid JSON for this form ({}).",
            rejection.body_text()
        ))
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            LedgerError::InvalidInput(_) | LedgerError::InvalidPassword => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            LedgerError::DuplicateUsername => StatusCode::CONFLICT,
            LedgerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            LedgerError::InvalidCredentials | LedgerError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            LedgerError::DatabaseError(_)
            | LedgerError::PasswordHash(_)
            | LedgerError::TaskJoin(_) => {
                error!(error = %self, "request failed with internal error");
                let body = ApiErrorBody {
                    code: self.code().to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse { error: body }),
                )
                    .into_response();
            }
        };

        let body = ApiErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
