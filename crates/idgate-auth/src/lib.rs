//! Identity verification and session issuance for idgate.
//!
//! This crate accepts proofs of identity from several independent
//! sources, validates each according to its own trust protocol, and
//! mints one internally-defined session credential for all of them:
//!
//! - Federated and anonymous tokens are validated by a delegated,
//!   remote verifier (the root of trust for those flows)
//! - Telegram login-widget payloads are validated locally via an
//!   HMAC-SHA256 check keyed by a secret derived from the bot token
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────────┐
//! │   Gateway        │────▶│   TokenVerifier      │──HTTPS──▶ delegated
//! │   (HTTP)         │     │   (trait)            │           authority
//! └───────┬──────────┘     └──────────┬───────────┘
//!         │                           │ VerifiedToken
//!         │                ┌──────────▼───────────┐
//!         │                │   normalize()        │
//!         │                └──────────┬───────────┘
//!         │                           │ ProviderClaims
//! ┌───────▼──────────┐     ┌──────────▼───────────┐
//! │  WidgetVerifier  │────▶│   SessionSigner      │──▶ session token
//! │  (local HMAC)    │     │   (HS256, 1h expiry) │
//! └──────────────────┘     └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use idgate_auth::{Secrets, SessionSigner};
//! use idgate_core::{ProviderClaims, ProviderTag};
//!
//! let secrets = Secrets::derive("signing-key", "12345:bot-token").unwrap();
//! let signer = SessionSigner::new(&secrets);
//!
//! let token = signer
//!     .issue("user-1", &ProviderTag::Anonymous, &ProviderClaims::anonymous())
//!     .unwrap();
//! assert!(!token.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod normalize;
pub mod secrets;
pub mod session;
pub mod telegram;
pub mod verifier;

pub use error::{AuthError, Result};
pub use normalize::normalize;
pub use secrets::Secrets;
pub use session::SessionSigner;
pub use telegram::WidgetVerifier;
pub use verifier::{HttpTokenVerifier, TokenVerifier, VerifiedToken};

#[cfg(any(test, feature = "test-utils"))]
pub use verifier::MockTokenVerifier;

/// Configuration for the delegated token verifier.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Base URL of the delegated verifier (e.g. `https://id.example.com`).
    pub base_url: String,
}

impl VerifierConfig {
    /// Get the token verification endpoint URL.
    #[must_use]
    pub fn verify_url(&self) -> String {
        format!("{}/v1/tokens/verify", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_url() {
        let config = VerifierConfig {
            base_url: "https://id.example.com".to_string(),
        };
        assert_eq!(config.verify_url(), "https://id.example.com/v1/tokens/verify");
    }
}
