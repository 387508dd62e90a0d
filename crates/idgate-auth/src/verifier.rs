//! Delegated identity-token verification.
//!
//! Federated and anonymous identity tokens are validated by an external
//! authority; this module only defines the contract the core consumes
//! (`TokenVerifier`) and an HTTP client implementation of it. The core
//! never re-implements that trust check locally.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};
use crate::VerifierConfig;

/// The verified contents of an identity token, as reported by the
/// delegated verifier.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedToken {
    /// The verified subject identifier.
    pub uid: String,
    /// The provider the authority recorded at sign-in (for example
    /// `"google.com"`). Distinct from whatever provider the caller
    /// *claims* to have used.
    pub sign_in_provider: String,
    /// Provider-specific profile sections, keyed by provider name.
    #[serde(default)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

/// Trait for verifying delegated identity tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify an opaque identity token and return its verified contents.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::IdentityVerification` for any invalid,
    /// expired, or malformed token.
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedToken>;
}

/// Request payload sent to the delegated verifier.
#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

/// HTTP client for the delegated token verifier.
pub struct HttpTokenVerifier {
    config: VerifierConfig,
    client: reqwest::Client,
}

impl HttpTokenVerifier {
    /// Create a new verifier client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen
    /// with default TLS).
    #[must_use]
    pub fn new(config: VerifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedToken> {
        let url = self.config.verify_url();

        let response = self
            .client
            .post(&url)
            .json(&VerifyRequest { id_token })
            .send()
            .await
            .map_err(|e| AuthError::Internal(format!("request failed: {e}")))?;

        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AuthError::Internal(format!("invalid response: {e}")));
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            tracing::debug!(status = %status, "delegated verifier rejected token");
            return Err(AuthError::IdentityVerification(format!("HTTP {status}")));
        }

        Err(AuthError::Internal(format!("verifier error: HTTP {status}")))
    }
}

/// A mock token verifier for testing.
///
/// Accepts tokens in the format `test-token:<uid>` and returns the
/// configured sign-in provider and claims sections for them.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTokenVerifier {
    /// The `sign_in_provider` reported for every accepted token.
    pub sign_in_provider: String,
    /// The claims sections reported for every accepted token.
    pub claims: serde_json::Map<String, serde_json::Value>,
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MockTokenVerifier {
    fn default() -> Self {
        Self {
            sign_in_provider: "anonymous".to_string(),
            claims: serde_json::Map::new(),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedToken> {
        let uid = id_token
            .strip_prefix("test-token:")
            .ok_or_else(|| AuthError::IdentityVerification("unknown token".to_string()))?;

        if uid.is_empty() {
            return Err(AuthError::IdentityVerification("empty subject".to_string()));
        }

        Ok(VerifiedToken {
            uid: uid.to_string(),
            sign_in_provider: self.sign_in_provider.clone(),
            claims: self.claims.clone(),
        })
    }
}
