//! Authentication endpoints.
//!
//! Three stateless flows, each a single synchronous pipeline: verify the
//! inbound proof of identity, normalize claims, issue a session token.
//! Normalization happens strictly after verification succeeds.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use idgate_auth::{normalize, TokenVerifier};
use idgate_core::{ProviderClaims, ProviderTag};

use crate::error::ApiError;
use crate::state::GatewayState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Request body for the federated verification flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenRequest {
    /// The opaque identity token to verify.
    pub id_token: String,
    /// The provider the caller claims to have signed in with.
    pub provider: String,
}

/// Request body for the anonymous guest flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousRequest {
    /// The opaque identity token to verify.
    pub id_token: String,
}

/// Response carrying only a session token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenResponse {
    /// The issued session credential.
    pub session_token: String,
}

/// Response for the widget flow: the session token plus a plain echo of
/// the just-verified profile for immediate UI use.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLoginResponse {
    /// The issued session credential.
    pub session_token: String,
    /// The verified widget profile.
    pub user: WidgetUser,
}

/// Profile fields echoed back by the widget flow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUser {
    /// The subject identifier.
    pub id: String,
    /// Telegram username, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Given name, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Avatar URL, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Response for the anonymous guest flow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousLoginResponse {
    /// The issued session credential.
    pub session_token: String,
    /// The guest identity.
    pub user: AnonymousUser,
}

/// Guest identity echoed back by the anonymous flow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousUser {
    /// The subject identifier.
    pub id: String,
    /// Always `true`.
    pub is_anonymous: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Verify a federated (or caller-declared anonymous) identity token and
/// issue a session token.
///
/// # Errors
///
/// Responds `401 unauthorized` on any verification failure, with no
/// detail on the reason.
pub async fn verify_token<V>(
    State(state): State<Arc<GatewayState<V>>>,
    Json(req): Json<VerifyTokenRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    V: TokenVerifier + 'static,
{
    let declared = ProviderTag::from(req.provider.as_str());

    let verified = state.verifier.verify_id_token(&req.id_token).await?;
    let claims = normalize(&declared, &verified);
    let session_token = state.signer.issue(&verified.uid, &declared, &claims)?;

    Ok(Json(SessionTokenResponse { session_token }))
}

/// Verify a Telegram login-widget payload and issue a session token.
///
/// # Errors
///
/// Responds `403 forbidden` if the payload's HMAC check fails or a
/// required field is missing.
pub async fn telegram_auth<V>(
    State(state): State<Arc<GatewayState<V>>>,
    Query(payload): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError>
where
    V: TokenVerifier + 'static,
{
    let assertion = state.widget.verify(&payload)?;
    let session_token = state
        .signer
        .issue(&assertion.uid, &assertion.provider, &assertion.claims)?;

    let user = WidgetUser {
        id: assertion.uid,
        username: assertion.claims.username,
        first_name: assertion.claims.first_name,
        last_name: assertion.claims.last_name,
        photo_url: assertion.claims.photo_url,
    };

    Ok(Json(WidgetLoginResponse {
        session_token,
        user,
    }))
}

/// Verify an anonymous guest token and issue a session token.
///
/// # Errors
///
/// Responds `401 unauthorized` on any verification failure.
pub async fn anonymous_auth<V>(
    State(state): State<Arc<GatewayState<V>>>,
    Json(req): Json<AnonymousRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    V: TokenVerifier + 'static,
{
    let verified = state.verifier.verify_id_token(&req.id_token).await?;

    let claims = ProviderClaims::anonymous();
    let session_token = state
        .signer
        .issue(&verified.uid, &ProviderTag::Anonymous, &claims)?;

    let user = AnonymousUser {
        id: verified.uid,
        is_anonymous: true,
    };

    Ok(Json(AnonymousLoginResponse {
        session_token,
        user,
    }))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use hmac::{Hmac, Mac};
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde_json::{json, Map, Value};
    use sha2::Sha256;

    use idgate_auth::{MockTokenVerifier, Secrets};

    use super::*;
    use crate::config::GatewayConfig;
    use crate::routes::create_router;

    const SESSION_SECRET: &str = "test-session-key";
    const BOT_TOKEN: &str = "12345:test-bot-token";

    fn test_server(mock: MockTokenVerifier) -> TestServer {
        let secrets = Secrets::derive(SESSION_SECRET, BOT_TOKEN).unwrap();
        let state = GatewayState::new(Arc::new(mock), &secrets, GatewayConfig::default());
        TestServer::new(create_router(state)).unwrap()
    }

    fn decode_session(token: &str) -> Map<String, Value> {
        let key = DecodingKey::from_secret(SESSION_SECRET.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        decode::<Value>(token, &key, &validation)
            .unwrap()
            .claims
            .as_object()
            .cloned()
            .unwrap()
    }

    /// The hash the login widget would attach to these fields.
    fn widget_hash(fields: &[(&str, &str)]) -> String {
        let secrets = Secrets::derive(SESSION_SECRET, BOT_TOKEN).unwrap();
        let mut sorted: Vec<_> = fields.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let data: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();

        let mut mac = Hmac::<Sha256>::new_from_slice(secrets.widget_secret()).unwrap();
        mac.update(data.join("\n").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn google_token_yields_session_with_google_claims() {
        let mock = MockTokenVerifier {
            sign_in_provider: "google.com".to_string(),
            claims: json!({ "google": { "email": "a@b.com", "name": "Ann" } })
                .as_object()
                .cloned()
                .unwrap(),
        };
        let server = test_server(mock);

        let response = server
            .post("/auth/verify-token")
            .json(&json!({ "idToken": "test-token:user-1", "provider": "google" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let payload = decode_session(body["sessionToken"].as_str().unwrap());
        assert_eq!(payload["uid"], "user-1");
        assert_eq!(payload["provider"], "google");
        assert_eq!(payload["email"], "a@b.com");
    }

    #[tokio::test]
    async fn declared_provider_mismatch_issues_subject_only_session() {
        // Token actually issued via Twitter; the caller declares google.
        let mock = MockTokenVerifier {
            sign_in_provider: "twitter.com".to_string(),
            claims: json!({ "twitter": { "screen_name": "ann" } })
                .as_object()
                .cloned()
                .unwrap(),
        };
        let server = test_server(mock);

        let response = server
            .post("/auth/verify-token")
            .json(&json!({ "idToken": "test-token:user-1", "provider": "google" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let payload = decode_session(body["sessionToken"].as_str().unwrap());
        assert_eq!(payload["provider"], "google");
        assert!(!payload.contains_key("email"));
        assert!(!payload.contains_key("username"));
    }

    #[tokio::test]
    async fn rejected_token_responds_unauthorized_without_detail() {
        let server = test_server(MockTokenVerifier::default());

        let response = server
            .post("/auth/verify-token")
            .json(&json!({ "idToken": "not-a-valid-token", "provider": "google" }))
            .await;
        response.assert_status_unauthorized();

        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "unauthorized");
        assert_eq!(body["error"]["message"], "unauthorized");
    }

    #[tokio::test]
    async fn widget_login_issues_session_and_echoes_profile() {
        let server = test_server(MockTokenVerifier::default());

        let fields = [("id", "42"), ("first_name", "Ann"), ("auth_date", "100")];
        let response = server
            .get("/auth/telegram")
            .add_query_param("id", "42")
            .add_query_param("first_name", "Ann")
            .add_query_param("auth_date", "100")
            .add_query_param("hash", widget_hash(&fields))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["user"]["id"], "42");
        assert_eq!(body["user"]["firstName"], "Ann");
        assert!(body["user"].get("username").is_none());

        let payload = decode_session(body["sessionToken"].as_str().unwrap());
        assert_eq!(payload["uid"], "42");
        assert_eq!(payload["provider"], "telegram");
        assert_eq!(payload["firstName"], "Ann");
        assert_eq!(payload["authDate"], "100");
    }

    #[tokio::test]
    async fn widget_login_with_altered_hash_responds_forbidden() {
        let server = test_server(MockTokenVerifier::default());

        let fields = [("id", "42"), ("first_name", "Ann"), ("auth_date", "100")];
        let mut hash = widget_hash(&fields);
        let flipped = if hash.starts_with('0') { "1" } else { "0" };
        hash.replace_range(0..1, flipped);

        let response = server
            .get("/auth/telegram")
            .add_query_param("id", "42")
            .add_query_param("first_name", "Ann")
            .add_query_param("auth_date", "100")
            .add_query_param("hash", hash)
            .await;
        response.assert_status_forbidden();

        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "forbidden");
    }

    #[tokio::test]
    async fn widget_login_without_hash_responds_forbidden() {
        let server = test_server(MockTokenVerifier::default());

        let response = server
            .get("/auth/telegram")
            .add_query_param("id", "42")
            .add_query_param("auth_date", "100")
            .await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn anonymous_login_issues_exactly_the_guest_claims() {
        let server = test_server(MockTokenVerifier::default());

        let response = server
            .post("/auth/anonymous")
            .json(&json!({ "idToken": "test-token:guest-7" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["user"]["id"], "guest-7");
        assert_eq!(body["user"]["isAnonymous"], true);

        let payload = decode_session(body["sessionToken"].as_str().unwrap());
        assert_eq!(payload["uid"], "guest-7");
        assert_eq!(payload["provider"], "anonymous");
        assert_eq!(payload["isAnonymous"], true);
        // uid, provider, isAnonymous, iat, exp and nothing else.
        assert_eq!(payload.len(), 5);
    }

    #[tokio::test]
    async fn anonymous_login_with_bad_token_responds_unauthorized() {
        let server = test_server(MockTokenVerifier::default());

        let response = server
            .post("/auth/anonymous")
            .json(&json!({ "idToken": "garbage" }))
            .await;
        response.assert_status_unauthorized();
    }
}
