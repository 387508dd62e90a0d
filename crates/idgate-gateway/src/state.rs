//! Gateway application state.
//!
//! The only process-wide state: the delegated verifier client and the
//! two secret-derived services, built once at startup and shared
//! read-only with every request handler.

use std::sync::Arc;

use idgate_auth::{Secrets, SessionSigner, TokenVerifier, WidgetVerifier};

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
pub struct GatewayState<V>
where
    V: TokenVerifier,
{
    /// The delegated verifier for federated and anonymous tokens.
    pub verifier: Arc<V>,
    /// The local verifier for login-widget payloads.
    pub widget: WidgetVerifier,
    /// The session credential issuer.
    pub signer: SessionSigner,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<V> GatewayState<V>
where
    V: TokenVerifier,
{
    /// Create the gateway state from its startup dependencies.
    #[must_use]
    pub fn new(verifier: Arc<V>, secrets: &Secrets, config: GatewayConfig) -> Self {
        Self {
            verifier,
            widget: WidgetVerifier::new(secrets),
            signer: SessionSigner::new(secrets),
            config,
        }
    }
}
