//! Telegram login-widget verification.
//!
//! The one flow whose trust proof is computed locally. The widget signs
//! the login payload with HMAC-SHA256 keyed by the SHA-256 digest of the
//! bot token; the data-check string is the payload's non-`hash` fields as
//! `key=value` lines, keys sorted lexicographically, joined by `\n`.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use idgate_core::{IdentityAssertion, ProviderClaims, ProviderTag};

use crate::error::{AuthError, Result};
use crate::secrets::Secrets;

/// Type alias for HMAC-SHA256.
type HmacSha256 = Hmac<Sha256>;

/// Verifies Telegram login-widget payloads.
pub struct WidgetVerifier {
    secret: [u8; 32],
}

impl WidgetVerifier {
    /// Create a verifier keyed by the process's widget shared secret.
    #[must_use]
    pub const fn new(secrets: &Secrets) -> Self {
        Self {
            secret: *secrets.widget_secret(),
        }
    }

    /// Verify a widget login payload and return the identity it proves.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidWidgetSignature` if the `hash` or `id`
    /// field is missing, the supplied hash is not valid hex, or the
    /// HMAC does not match. The comparison is constant-time.
    pub fn verify(&self, payload: &HashMap<String, String>) -> Result<IdentityAssertion> {
        // A payload without a hash always fails closed.
        let supplied_hash = payload
            .get("hash")
            .ok_or(AuthError::InvalidWidgetSignature)?;

        let data_check = canonicalize(payload);

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts any key length");
        mac.update(data_check.as_bytes());
        let computed = mac.finalize().into_bytes();

        // Hex is accepted in either case; the comparison happens on the
        // decoded bytes.
        let supplied = hex::decode(supplied_hash).map_err(|_| AuthError::InvalidWidgetSignature)?;

        if supplied.len() != computed.len() || !bool::from(supplied.ct_eq(computed.as_slice())) {
            tracing::debug!("widget payload failed HMAC check");
            return Err(AuthError::InvalidWidgetSignature);
        }

        // The hash covers every remaining field, so they are trusted as a
        // unit from here on.
        let uid = payload
            .get("id")
            .cloned()
            .ok_or(AuthError::InvalidWidgetSignature)?;

        let claims = ProviderClaims {
            username: payload.get("username").cloned(),
            first_name: payload.get("first_name").cloned(),
            last_name: payload.get("last_name").cloned(),
            photo_url: payload.get("photo_url").cloned(),
            auth_date: payload.get("auth_date").cloned(),
            ..ProviderClaims::default()
        };

        Ok(IdentityAssertion {
            uid,
            provider: ProviderTag::Telegram,
            claims,
        })
    }
}

/// Build the data-check string: every non-`hash` field as a `key=value`
/// line, keys in byte order, newline-separated, no trailing separator.
fn canonicalize(payload: &HashMap<String, String>) -> String {
    let mut fields: Vec<(&str, &str)> = payload
        .iter()
        .filter(|(key, _)| key.as_str() != "hash")
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let lines: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    lines.join("\n")
}
