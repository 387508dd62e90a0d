//! Session token issuance.
//!
//! Every successful verification flow ends here: the issuer embeds the
//! normalized claims in a signed, time-bounded session credential that
//! the rest of the application accepts regardless of which provider
//! produced the identity.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{Map, Value};

use idgate_core::{ProviderClaims, ProviderTag};

use crate::error::{AuthError, Result};
use crate::secrets::Secrets;

/// Fixed session lifetime: one hour from issuance.
const SESSION_TTL_SECS: i64 = 3600;

/// Signs session credentials with the process-wide session key.
pub struct SessionSigner {
    key: EncodingKey,
}

impl SessionSigner {
    /// Create a signer keyed by the process's session signing key.
    #[must_use]
    pub fn new(secrets: &Secrets) -> Self {
        Self {
            key: EncodingKey::from_secret(secrets.session_key()),
        }
    }

    /// Issue a signed session credential for a verified identity.
    ///
    /// The payload is the claim fields plus `uid`, `provider`, `iat`,
    /// and `exp`; expiry is fixed at issuance + 1 hour.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if payload serialization or signing
    /// fails, which cannot happen with an in-memory HS256 key under
    /// normal operation.
    pub fn issue(
        &self,
        uid: &str,
        provider: &ProviderTag,
        claims: &ProviderClaims,
    ) -> Result<String> {
        let claim_fields = match serde_json::to_value(claims) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                return Err(AuthError::Internal(
                    "claims did not serialize to an object".to_string(),
                ))
            }
        };

        let payload = finalize_payload(claim_fields, uid, provider, Utc::now());

        encode(&Header::default(), &payload, &self.key)
            .map_err(|e| AuthError::Internal(format!("signing failed: {e}")))
    }
}

/// Write the mandatory session fields into a claims payload.
///
/// `uid` and `provider` are written after the claim fields, so a claims
/// map that smuggles keys with those names cannot shadow the verified
/// values.
fn finalize_payload(
    mut payload: Map<String, Value>,
    uid: &str,
    provider: &ProviderTag,
    issued_at: DateTime<Utc>,
) -> Map<String, Value> {
    let iat = issued_at.timestamp();

    payload.insert("uid".to_string(), Value::from(uid));
    payload.insert("provider".to_string(), Value::from(provider.as_str()));
    payload.insert("iat".to_string(), Value::from(iat));
    payload.insert("exp".to_string(), Value::from(iat + SESSION_TTL_SECS));
    payload
}
