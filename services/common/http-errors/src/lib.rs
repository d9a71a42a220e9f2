use axum::{http::{HeaderValue, StatusCode}, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

/// Inner `error` object of a callable response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Errors surfaced through the callable protocol. Only the kind and the
/// message ever reach the caller.
#[derive(Debug, Error)]
pub enum CallableError {
    #[error("internal: {message}")]
    Internal { message: String },
    #[error("invalid-argument: {message}")]
    InvalidArgument { message: String },
}

impl CallableError {
    pub fn internal(message: impl Into<String>) -> Self { Self::Internal { message: message.into() } }
    pub fn invalid_argument(message: impl Into<String>) -> Self { Self::InvalidArgument { message: message.into() } }

    /// Client-facing kind, as the mobile SDK reports it.
    pub fn kind(&self) -> &'static str {
        match self {
            CallableError::Internal { .. } => "internal",
            CallableError::InvalidArgument { .. } => "invalid-argument",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CallableError::Internal { message } | CallableError::InvalidArgument { message } => message,
        }
    }

    fn wire_status(&self) -> &'static str {
        match self {
            CallableError::Internal { .. } => "INTERNAL",
            CallableError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            CallableError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CallableError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let error_code = self.kind();
        let body = ErrorEnvelope {
            error: ErrorBody { status: self.wire_status(), message: self.message().to_string() },
        };
        let mut resp = (status, Json(body)).into_response();
        resp.headers_mut().insert("X-Error-Code", HeaderValue::from_static(error_code));
        resp
    }
}

pub type CallableResult<T> = Result<T, CallableError>;
