//! HTTP error responses.
//!
//! Every failed request answers with `{"error": <code>, "message": <text>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use fintrack_core::account::AccountValidationError;
use fintrack_core::auth::{PasswordError, RegistrationError};
use fintrack_core::category::CategoryValidationError;
use fintrack_core::reports::ReportError;
use fintrack_core::transaction::TransactionValidationError;
use fintrack_db::repositories::{AccountError, CategoryError, TransactionError, UserError};
use fintrack_shared::{AppError, JwtError};
use sea_orm::DbErr;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidPeriod { .. } => Self::validation(err.to_string()),
            ReportError::Source(msg) => Self(AppError::Database(msg)),
        }
    }
}

impl From<TransactionValidationError> for ApiError {
    fn from(err: TransactionValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<AccountValidationError> for ApiError {
    fn from(err: AccountValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<CategoryValidationError> for ApiError {
    fn from(err: CategoryValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingError(msg) => Self(AppError::Internal(msg)),
            JwtError::Expired => Self::unauthorized("Token has expired"),
            JwtError::DecodingError(_) | JwtError::WrongKind => {
                Self::unauthorized("Invalid or malformed token")
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => Self(AppError::Conflict(
                "An account with this email already exists".to_string(),
            )),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => Self::not_found(err.to_string()),
            AccountError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::not_found(err.to_string()),
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_)
            | TransactionError::AccountNotFound(_)
            | TransactionError::CategoryNotFound(_) => Self::not_found(err.to_string()),
            TransactionError::Database(e) => e.into(),
        }
    }
}
