use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Login with an unknown email or a wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already exists.
    #[error("Email already registered")]
    DuplicateEmail,

    /// The session token's expiry has passed.
    #[error("Session expired")]
    SessionExpired,

    /// The session token could not be decoded or names an unknown user.
    #[error("Invalid session")]
    SessionInvalid,

    /// A persisted entry exists but does not parse.
    #[error("Failed to read stored entry: {0}")]
    StoreReadFailure(String),

    /// The caller's role does not allow the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The applicant already applied to this job.
    #[error("Already applied to job {0}")]
    AlreadyApplied(u64),

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::SessionExpired
            | AppError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AppError::DuplicateEmail | AppError::AlreadyApplied(_) => StatusCode::CONFLICT,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StoreReadFailure(_) | AppError::Redis(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::InvalidCredentials => {
                tracing::warn!("Login rejected: invalid credentials");
                self.to_string()
            }

            AppError::DuplicateEmail => {
                tracing::warn!("Registration rejected: duplicate email");
                self.to_string()
            }

            AppError::SessionExpired | AppError::SessionInvalid => {
                tracing::debug!("Session rejected: {}", self);
                self.to_string()
            }

            AppError::StoreReadFailure(ref key) => {
                tracing::error!("Corrupted stored entry: {}", key);
                "Failed to read stored data".to_string()
            }

            AppError::Forbidden(ref msg) => {
                tracing::warn!("Forbidden: {}", msg);
                msg.clone()
            }

            AppError::AlreadyApplied(job_id) => {
                tracing::debug!("Duplicate application for job {}", job_id);
                self.to_string()
            }

            AppError::NotFound => {
                tracing::debug!("Resource not found");
                self.to_string()
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }

            AppError::Redis(ref e) => {
                tracing::error!("Redis error: {}", e);
                "Storage error".to_string()
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        (
            status,
            [(http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
