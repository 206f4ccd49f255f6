//! HTTP error envelope.
//!
//! Every failure leaves the API as `{"success": false, "error": "..."}` with
//! a short Russian message. Internal details are logged, never returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::db::DbError;

pub const MSG_UNAUTHORIZED: &str = "Требуется авторизация";
pub const MSG_INVALID_CREDENTIALS: &str = "Неверный email или пароль";
pub const MSG_NOT_FOUND: &str = "Запись не найдена";
pub const MSG_CONFLICT: &str = "Такая запись уже существует";
pub const MSG_CONSTRAINT: &str = "Связанная запись не найдена";
pub const MSG_INTERNAL: &str = "Произошла ошибка. Попробуйте позже";

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    #[schema(example = false)]
    pub success: bool,
    /// Human readable message
    #[schema(example = "Запись не найдена")]
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// 400 with a message safe to show to the user.
    Validation(String),
    /// 400 for a broken reference (unknown service, contact...).
    Constraint,
    /// 401 without a valid session.
    Unauthorized,
    /// 401 on a failed login or password check.
    InvalidCredentials,
    NotFound,
    Conflict,
    /// 500; the detail is logged only.
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Constraint => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(message) => message,
            ApiError::Constraint => MSG_CONSTRAINT,
            ApiError::Unauthorized => MSG_UNAUTHORIZED,
            ApiError::InvalidCredentials => MSG_INVALID_CREDENTIALS,
            ApiError::NotFound => MSG_NOT_FOUND,
            ApiError::Conflict => MSG_CONFLICT,
            ApiError::Internal(_) => MSG_INTERNAL,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => ApiError::NotFound,
            DbError::AlreadyExists { .. } => ApiError::Conflict,
            DbError::Validation { message } => ApiError::Validation(message),
            DbError::Constraint { .. } => ApiError::Constraint,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::WeakPassword { min } => ApiError::Validation(format!(
                "Пароль должен содержать не менее {} символов",
                min
            )),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(detail) => error!("Request failed: {}", detail),
            other => warn!(status = status.as_u16(), "Request rejected: {:?}", other),
        }

        let body = ErrorResponse {
            success: false,
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
