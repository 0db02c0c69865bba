//! # API Load Pro
//!
//! A command-line REST API data creator. This crate holds its credential
//! lifecycle manager: a client-credentials token is obtained from an
//! authorization endpoint, cached, checked for expiry locally, and
//! re-acquired when it is no longer usable.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use api_load_pro::{ApiConfig, Authenticator};
//!
//! #[tokio::main]
//! async fn main() -> api_load_pro::Result<()> {
//!     let config = ApiConfig::load("config.ini")?;
//!     let mut auth = Authenticator::new(config);
//!
//!     if auth.authenticate().await {
//!         let token = auth.get_access_token().await;
//!         // Use the bearer token...
//!     }
//!
//!     // After a 401 from the API, force a new credential
//!     auth.refresh_token().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   get_access_token()   ┌─────────────────────────┐
//! │  CLI Runner  │ ─────────────────────▶ │      Authenticator      │
//! └──────────────┘                        │  in-memory TokenRecord  │
//!        │ ApiConfig::load()              │  evaluate_token() (exp) │
//!        ▼                                └──────┬───────────┬──────┘
//! ┌──────────────┐                   POST form   │           │ save / delete
//! │  config.ini  │           client_credentials  ▼           ▼
//! └──────────────┘                      ┌──────────────┐ ┌───────────────────┐
//!                                       │ auth endpoint│ │ access_token.json │
//!                                       └──────────────┘ └───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// API configuration loading
pub mod config;

/// Token acquisition, expiry evaluation and persistence
pub mod auth;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{Authenticator, TokenRecord, TokenStore, TokenValidity};
pub use config::ApiConfig;
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
