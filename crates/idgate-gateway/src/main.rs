//! Idgate Gateway - multi-provider authentication over HTTP.
//!
//! This is the main entry point for the gateway service. It verifies
//! identity proofs from federated providers, the anonymous guest flow,
//! and the Telegram login widget, and issues signed session tokens.
//!
//! # Configuration
//!
//! - `LISTEN_ADDR` - listen address (default `0.0.0.0:3001`)
//! - `ALLOWED_ORIGINS` - comma-separated CORS origins (default `*`)
//! - `VERIFIER_BASE_URL` - base URL of the delegated token verifier
//! - `SESSION_SECRET_KEY` - session signing key (required)
//! - `TELEGRAM_BOT_TOKEN` - widget bot token (required)
//!
//! A missing required secret fails startup before the listener binds.
//!
//! # Dev Mode
//!
//! Build with `--features dev-mode` to use a mock token verifier that
//! doesn't require network access to the delegated authority. Use tokens
//! in format: `test-token:<uid>`

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "dev-mode")]
use idgate_auth::MockTokenVerifier;
#[cfg(not(feature = "dev-mode"))]
use idgate_auth::{HttpTokenVerifier, VerifierConfig};
use idgate_auth::{AuthError, Secrets};
use idgate_gateway::{create_router, GatewayConfig, GatewayState};

/// Read a required environment variable, failing startup when absent.
fn required_env(name: &str) -> Result<String, AuthError> {
    std::env::var(name).map_err(|_| AuthError::Configuration(format!("{name} is not set")))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,idgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Idgate Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());
    let cors_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
        .map(|v| v.split(',').map(str::to_string).collect())
        .unwrap_or_else(|_| vec!["*".to_string()]);
    let verifier_base_url =
        std::env::var("VERIFIER_BASE_URL").unwrap_or_else(|_| "https://id.example.com".into());

    // Both secrets are required; a missing one aborts startup.
    let session_secret = required_env("SESSION_SECRET_KEY")?;
    let bot_token = required_env("TELEGRAM_BOT_TOKEN")?;
    let secrets = Secrets::derive(&session_secret, &bot_token)?;

    tracing::info!(
        listen_addr = %listen_addr,
        cors_origins = ?cors_origins,
        verifier_base_url = %verifier_base_url,
        "Gateway configuration loaded"
    );

    // Initialize the delegated token verifier
    #[cfg(feature = "dev-mode")]
    let verifier = {
        tracing::warn!("DEV MODE ENABLED - using mock token verifier");
        tracing::warn!("Use tokens in format: test-token:<uid>");
        Arc::new(MockTokenVerifier::default())
    };

    #[cfg(not(feature = "dev-mode"))]
    let verifier = Arc::new(HttpTokenVerifier::new(VerifierConfig {
        base_url: verifier_base_url,
    }));
    tracing::info!("Token verifier initialized");

    // Build gateway state and router
    let config = GatewayConfig {
        listen_addr: listen_addr.clone(),
        cors_origins,
        ..GatewayConfig::default()
    };
    let state = GatewayState::new(verifier, &secrets, config);
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
