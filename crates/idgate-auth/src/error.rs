//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during verification, issuance, or startup.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The delegated verifier rejected the identity token.
    ///
    /// Covers invalid signature, expiry, malformed tokens, and wrong
    /// audience; sub-reasons are not distinguished to callers.
    #[error("identity verification failed: {0}")]
    IdentityVerification(String),

    /// The login-widget payload failed its HMAC check or was missing a
    /// required field.
    #[error("invalid widget signature")]
    InvalidWidgetSignature,

    /// A required secret was missing at startup. Fatal; never
    /// recoverable per-request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A transport or serialization fault talking to the delegated
    /// verifier, or a signing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::IdentityVerification(_) => 401,
            Self::InvalidWidgetSignature => 403,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }
}
