//! Error types for API Load Pro
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! The Authenticator's boolean surface (`authenticate`, `refresh_token`)
//! is built on top of these variants: each failure is logged with its
//! own variant and then collapsed to `false` for the caller.

use thiserror::Error;

/// The main error type for API Load Pro
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid URL for '{field}': {source}")]
    InvalidUrl {
        field: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration file '{path}' not found")]
    FileNotFound { path: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Cannot reach auth endpoint {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Auth response does not contain an access_token")]
    MissingAccessToken,

    #[error("OAuth2 error: {message}")]
    OAuth2 { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Token Store Errors
    // ============================================================================
    #[error("Token store error: {message}")]
    TokenStore { message: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a token store error
    pub fn token_store(message: impl Into<String>) -> Self {
        Self::TokenStore {
            message: message.into(),
        }
    }

    /// Create a file-not-found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether the provider answered but refused the credentials
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::HttpStatus { status, .. } if is_rejection_status(*status))
    }
}

/// Statuses an authorization server uses to reject a client
fn is_rejection_status(status: u16) -> bool {
    matches!(status, 400 | 401 | 403)
}

/// Result type alias for API Load Pro
pub type Result<T> = std::result::Result<T, Error>;
