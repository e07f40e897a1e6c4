//! Unified application error model and mapping helpers.
//! One enum shared by the guard chain, the route handlers, and the storage
//! layer, with the fixed wire bodies the frontend expects on auth failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    UserInput { message: String },
    Auth { message: String },
    Forbidden { message: String },
    Io { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message }
            | AppError::Auth { message }
            | AppError::Forbidden { message }
            | AppError::Io { message }
            | AppError::Internal { message } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(msg: S) -> Self { AppError::UserInput { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { AppError::Io { message: msg.into() } }
    pub fn internal<S: Into<String>>(msg: S) -> Self { AppError::Internal { message: msg.into() } }

    /// Missing or invalid credential. The message is a fixed wire string.
    pub fn unauthorized() -> Self { AppError::Auth { message: "unauthorized access".into() } }

    /// Valid credential presented for another identity's data. Fixed wire string.
    pub fn forbidden() -> Self { AppError::Forbidden { message: "forbidden access".into() } }

    /// Map to the HTTP status code carried on the wire.
    pub fn http_status(&self) -> StatusCode {
        match self {
            AppError::UserInput { .. } => StatusCode::BAD_REQUEST,
            AppError::Auth { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Io { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.http_status(), Json(json!({ "message": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(AppError::user("bad id").http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden().http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::io("timed out").http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::internal("boom").http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_failures_use_fixed_wire_messages() {
        assert_eq!(AppError::unauthorized().message(), "unauthorized access");
        assert_eq!(AppError::forbidden().message(), "forbidden access");
    }
}
