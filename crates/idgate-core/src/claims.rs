//! Normalized profile claims and verified identity assertions.
//!
//! `ProviderClaims` is the single typed shape every provider's profile
//! data is normalized into. Fields a provider did not supply stay `None`
//! and are omitted from serialized output entirely, so absent data can
//! never masquerade as verified-but-empty data.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderTag;

/// Normalized, provider-supplied profile attributes.
///
/// Serialized camelCase with absent fields omitted. Deliberately has no
/// `uid` or `provider` field: the mandatory session fields are written by
/// the issuer alone and cannot be injected through this struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderClaims {
    /// Provider-side handle (Twitter screen name, Telegram username).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Human-readable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Verified email address (Google, Facebook).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name (Telegram widget).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name (Telegram widget).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Widget authentication timestamp, verbatim as supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_date: Option<String>,
    /// Set (to `true`) only for the anonymous guest flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
}

impl ProviderClaims {
    /// The fixed claims for the anonymous guest flow.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            is_anonymous: Some(true),
            ..Self::default()
        }
    }
}

/// A verified statement of who authenticated, via which provider, with
/// what attributes.
///
/// Only constructed as the output of a successful verification step;
/// never built from unverified input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAssertion {
    /// The verified subject identifier.
    pub uid: String,
    /// The provider that authenticated the subject.
    pub provider: ProviderTag,
    /// Profile attributes verified alongside the subject.
    pub claims: ProviderClaims,
}
