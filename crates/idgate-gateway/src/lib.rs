//! HTTP authentication gateway for idgate.
//!
//! This crate exposes the three verification flows over HTTP and maps
//! verification outcomes to responses:
//!
//! - `POST /auth/verify-token` — federated identity tokens, verified by
//!   the delegated authority; failures respond `401`
//! - `GET /auth/telegram` — Telegram login-widget payloads, verified
//!   locally via HMAC; failures respond `403`
//! - `POST /auth/anonymous` — anonymous guest tokens; failures respond
//!   `401`
//!
//! Every successful flow ends in the session issuer; the response always
//! carries the issued session token.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use idgate_auth::{HttpTokenVerifier, Secrets, VerifierConfig};
//! use idgate_gateway::{create_router, GatewayConfig, GatewayState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secrets = Secrets::derive("signing-key", "12345:bot-token")?;
//! let verifier = Arc::new(HttpTokenVerifier::new(VerifierConfig {
//!     base_url: "https://id.example.com".to_string(),
//! }));
//!
//! let state = GatewayState::new(verifier, &secrets, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;
