//! Core identity types for idgate.
//!
//! This crate provides the foundational types shared by the verification
//! core and the HTTP gateway:
//!
//! - **`ProviderTag`**: the closed set of supported identity providers
//! - **`ProviderClaims`**: the normalized, typed profile claims extracted
//!   from a verified identity
//! - **`IdentityAssertion`**: a verified "who authenticated, via which
//!   provider, with what attributes" statement
//!
//! # Example
//!
//! ```
//! use idgate_core::{IdentityAssertion, ProviderClaims, ProviderTag};
//!
//! let claims = ProviderClaims {
//!     email: Some("a@b.com".to_string()),
//!     display_name: Some("Ann".to_string()),
//!     ..ProviderClaims::default()
//! };
//!
//! let assertion = IdentityAssertion {
//!     uid: "user-123".to_string(),
//!     provider: ProviderTag::Google,
//!     claims,
//! };
//!
//! assert_eq!(assertion.provider.as_str(), "google");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod claims;
pub mod provider;

pub use claims::{IdentityAssertion, ProviderClaims};
pub use provider::ProviderTag;
