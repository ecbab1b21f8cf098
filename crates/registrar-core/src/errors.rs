use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::envelope::Envelope;

const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Error returned by handlers and services.
///
/// `message` is what the client sees; `error` keeps the underlying cause for
/// logging. Internal failures never leak their cause to the client.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        let error = err.into();
        let message = if status.is_server_error() {
            INTERNAL_MESSAGE.to_string()
        } else {
            error.to_string()
        };
        Self {
            status,
            message,
            error,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    /// A business-rule rejection reported as 500 with its own message, which
    /// is how existing clients of the enrollment endpoint detect it.
    pub fn domain(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: anyhow::anyhow!(message.clone()),
            message,
        }
    }

    /// Logs the failure with the component and operation it came from, then
    /// passes it on unchanged.
    pub fn tagged(self, component: &str, operation: &str) -> Self {
        if self.status.is_server_error() {
            tracing::error!(
                component,
                operation,
                status = self.status.as_u16(),
                error = %self.error,
                "request failed"
            );
        } else {
            tracing::warn!(
                component,
                operation,
                status = self.status.as_u16(),
                error = %self.error,
                "request rejected"
            );
        }
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::error(self.message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
