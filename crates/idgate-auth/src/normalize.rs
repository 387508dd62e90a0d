//! Provider claims normalization.
//!
//! Maps a verified token bundle into the typed `ProviderClaims` shape.
//! Provider-specific fields are extracted only when the bundle's own
//! recorded sign-in provider matches the provider being normalized: the
//! caller-declared tag alone is never trusted for field extraction, so a
//! client declaring `provider=google` over a Twitter-issued token gets a
//! subject-only identity, not Google fields.

use serde_json::Value;

use idgate_core::{ProviderClaims, ProviderTag};

use crate::verifier::VerifiedToken;

/// Sign-in provider identifier recorded by the authority for X/Twitter.
const SIGN_IN_TWITTER: &str = "twitter.com";
/// Sign-in provider identifier recorded by the authority for Google.
const SIGN_IN_GOOGLE: &str = "google.com";
/// Sign-in provider identifier recorded by the authority for Facebook.
const SIGN_IN_FACEBOOK: &str = "facebook.com";

/// Normalize a verified token bundle into provider claims.
///
/// Pure; performs no I/O. Fields a provider did not supply stay absent.
#[must_use]
pub fn normalize(declared: &ProviderTag, token: &VerifiedToken) -> ProviderClaims {
    match declared {
        ProviderTag::Twitter => {
            let section = section_for(token, "twitter", SIGN_IN_TWITTER);
            ProviderClaims {
                username: str_field(section, "screen_name"),
                display_name: str_field(section, "name"),
                photo_url: str_field(section, "profile_image_url"),
                ..ProviderClaims::default()
            }
        }
        ProviderTag::Google => {
            let section = section_for(token, "google", SIGN_IN_GOOGLE);
            ProviderClaims {
                email: str_field(section, "email"),
                display_name: str_field(section, "name"),
                photo_url: str_field(section, "picture"),
                ..ProviderClaims::default()
            }
        }
        ProviderTag::Facebook => {
            let section = section_for(token, "facebook", SIGN_IN_FACEBOOK);
            ProviderClaims {
                email: str_field(section, "email"),
                display_name: str_field(section, "name"),
                photo_url: section
                    .and_then(|s| s.get("picture"))
                    .and_then(|p| p.get("data"))
                    .and_then(|d| d.get("url"))
                    .and_then(Value::as_str)
                    .map(ToString::to_string),
                ..ProviderClaims::default()
            }
        }
        ProviderTag::Anonymous => ProviderClaims::anonymous(),
        // The widget flow never reaches the normalizer, and unrecognized
        // providers pass through subject-only.
        ProviderTag::Telegram | ProviderTag::Other(_) => ProviderClaims::default(),
    }
}

/// The bundle's section for `key`, but only when the authority actually
/// recorded `expected_sign_in` as the sign-in provider.
fn section_for<'a>(token: &'a VerifiedToken, key: &str, expected_sign_in: &str) -> Option<&'a Value> {
    if token.sign_in_provider == expected_sign_in {
        token.claims.get(key)
    } else {
        None
    }
}

/// A string field of a claims section, if present.
fn str_field(section: Option<&Value>, key: &str) -> Option<String> {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn token(sign_in_provider: &str, claims: serde_json::Value) -> VerifiedToken {
        VerifiedToken {
            uid: "user-1".to_string(),
            sign_in_provider: sign_in_provider.to_string(),
            claims: claims.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn twitter_fields_extracted_when_recorded_provider_matches() {
        let token = token(
            "twitter.com",
            json!({
                "twitter": {
                    "screen_name": "ann",
                    "name": "Ann A",
                    "profile_image_url": "https://t.example/ann.jpg"
                }
            }),
        );

        let claims = normalize(&ProviderTag::Twitter, &token);
        assert_eq!(claims.username.as_deref(), Some("ann"));
        assert_eq!(claims.display_name.as_deref(), Some("Ann A"));
        assert_eq!(claims.photo_url.as_deref(), Some("https://t.example/ann.jpg"));
        assert_eq!(claims.email, None);
    }

    #[test]
    fn google_fields_extracted_when_recorded_provider_matches() {
        let token = token(
            "google.com",
            json!({
                "google": {
                    "email": "a@b.com",
                    "name": "Ann",
                    "picture": "https://g.example/a.png"
                }
            }),
        );

        let claims = normalize(&ProviderTag::Google, &token);
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.display_name.as_deref(), Some("Ann"));
        assert_eq!(claims.photo_url.as_deref(), Some("https://g.example/a.png"));
    }

    #[test]
    fn facebook_photo_comes_from_nested_picture_data() {
        let token = token(
            "facebook.com",
            json!({
                "facebook": {
                    "email": "f@b.com",
                    "name": "Fran",
                    "picture": { "data": { "url": "https://f.example/p.jpg" } }
                }
            }),
        );

        let claims = normalize(&ProviderTag::Facebook, &token);
        assert_eq!(claims.email.as_deref(), Some("f@b.com"));
        assert_eq!(claims.photo_url.as_deref(), Some("https://f.example/p.jpg"));
    }

    #[test]
    fn declared_provider_mismatch_yields_no_fields() {
        // Token actually signed in via Twitter; caller declares google.
        let token = token(
            "twitter.com",
            json!({
                "google": { "email": "a@b.com", "name": "Ann" },
                "twitter": { "screen_name": "ann" }
            }),
        );

        let claims = normalize(&ProviderTag::Google, &token);
        assert_eq!(claims, ProviderClaims::default());
    }

    #[test]
    fn matching_sign_in_with_missing_section_yields_no_fields() {
        let token = token("google.com", json!({}));
        let claims = normalize(&ProviderTag::Google, &token);
        assert_eq!(claims, ProviderClaims::default());
    }

    #[test]
    fn anonymous_always_sets_the_flag() {
        let token = token("anonymous", json!({}));
        let claims = normalize(&ProviderTag::Anonymous, &token);
        assert_eq!(claims.is_anonymous, Some(true));

        // Even a bundle full of federated sections adds nothing else.
        let token = self::token("google.com", json!({ "google": { "email": "a@b.com" } }));
        let claims = normalize(&ProviderTag::Anonymous, &token);
        assert_eq!(claims, ProviderClaims::anonymous());
    }

    #[test]
    fn unrecognized_provider_passes_through_subject_only() {
        let token = token(
            "google.com",
            json!({ "google": { "email": "a@b.com" } }),
        );

        let claims = normalize(&ProviderTag::Other("github".to_string()), &token);
        assert_eq!(claims, ProviderClaims::default());
    }

    #[test]
    fn non_string_field_values_are_ignored() {
        let token = token(
            "google.com",
            json!({ "google": { "email": 42, "name": "Ann" } }),
        );

        let claims = normalize(&ProviderTag::Google, &token);
        assert_eq!(claims.email, None);
        assert_eq!(claims.display_name.as_deref(), Some("Ann"));
    }
}
