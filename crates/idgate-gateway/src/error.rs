//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.
//! Verification failures are collapsed to a generic outcome here; why a
//! credential was rejected is logged, never returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use idgate_auth::AuthError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The identity token could not be verified.
    #[error("unauthorized")]
    Unauthorized,

    /// The widget payload failed its signature check.
    #[error("forbidden")]
    Forbidden,

    /// Internal server error.
    #[error("internal error")]
    Internal,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::IdentityVerification(_) => {
                tracing::debug!(error = %err, "token verification failed");
                Self::Unauthorized
            }
            AuthError::InvalidWidgetSignature => {
                tracing::debug!("widget signature check failed");
                Self::Forbidden
            }
            AuthError::Configuration(_) | AuthError::Internal(_) => {
                tracing::error!(error = %err, "auth internal error");
                Self::Internal
            }
        }
    }
}
