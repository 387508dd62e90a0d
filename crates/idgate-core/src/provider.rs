//! Identity provider tags.
//!
//! Every authentication flow is labeled with a `ProviderTag`. The set of
//! providers with provider-specific behavior is closed; anything else is
//! carried as `Other` and normalizes to a subject-only identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity source a subject authenticated through.
///
/// Serialized as a plain string (`"twitter"`, `"google"`, `"facebook"`,
/// `"anonymous"`, `"telegram"`). Unrecognized strings round-trip through
/// `Other` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderTag {
    /// X/Twitter federated sign-in.
    Twitter,
    /// Google federated sign-in.
    Google,
    /// Facebook federated sign-in.
    Facebook,
    /// Anonymous guest sign-in.
    Anonymous,
    /// Telegram login widget.
    Telegram,
    /// A caller-declared provider with no provider-specific handling.
    Other(String),
}

impl ProviderTag {
    /// The wire representation of this tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Twitter => "twitter",
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Anonymous => "anonymous",
            Self::Telegram => "telegram",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ProviderTag {
    fn from(s: &str) -> Self {
        match s {
            "twitter" => Self::Twitter,
            "google" => Self::Google,
            "facebook" => Self::Facebook,
            "anonymous" => Self::Anonymous,
            "telegram" => Self::Telegram,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ProviderTag {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ProviderTag> for String {
    fn from(tag: ProviderTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
