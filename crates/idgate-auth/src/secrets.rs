//! Process-wide secrets, derived once at startup.
//!
//! Both secrets live for the whole process and are shared read-only with
//! every request handler; they are never re-derived per request and never
//! logged or returned to a client.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{AuthError, Result};

/// The two process-wide secrets the verification core depends on.
///
/// - The session signing key signs every issued session credential.
/// - The widget shared secret is the SHA-256 digest of the configured
///   bot token and keys the login-widget HMAC check.
#[derive(Clone)]
pub struct Secrets {
    session_key: Vec<u8>,
    widget_secret: [u8; 32],
}

impl Secrets {
    /// Derive the process secrets from configured values.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if either input is empty.
    pub fn derive(session_secret: &str, bot_token: &str) -> Result<Self> {
        if session_secret.is_empty() {
            return Err(AuthError::Configuration(
                "session secret key is not set".to_string(),
            ));
        }
        if bot_token.is_empty() {
            return Err(AuthError::Configuration(
                "widget bot token is not set".to_string(),
            ));
        }

        let widget_secret: [u8; 32] = Sha256::digest(bot_token.as_bytes()).into();

        Ok(Self {
            session_key: session_secret.as_bytes().to_vec(),
            widget_secret,
        })
    }

    /// The session token signing key.
    #[must_use]
    pub fn session_key(&self) -> &[u8] {
        &self.session_key
    }

    /// The login-widget HMAC key.
    #[must_use]
    pub const fn widget_secret(&self) -> &[u8; 32] {
        &self.widget_secret
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret material must never reach logs.
        f.debug_struct("Secrets")
            .field("session_key", &"<redacted>")
            .field("widget_secret", &"<redacted>")
            .finish()
    }
}
