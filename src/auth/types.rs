//! Token types
//!
//! The cached token record and the outcome of evaluating a token's expiry.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// A token obtained from a successful client-credentials exchange
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    /// The bearer token (JWT-style `header.payload.signature`)
    pub access_token: String,
    /// Full response object from the auth endpoint (token type, expiry hints, scope, ...)
    pub raw_response: Map<String, Value>,
}

impl TokenRecord {
    /// Build a record from an auth endpoint response body.
    ///
    /// The body must be a JSON object with a non-empty string `access_token`.
    pub fn from_response_body(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let Value::Object(raw_response) = value else {
            return Err(Error::OAuth2 {
                message: "Auth response is not a JSON object".to_string(),
            });
        };

        let access_token = match raw_response.get("access_token") {
            Some(Value::String(token)) if !token.is_empty() => token.clone(),
            _ => return Err(Error::MissingAccessToken),
        };

        Ok(Self {
            access_token,
            raw_response,
        })
    }

    /// Token type reported by the provider, if any
    pub fn token_type(&self) -> Option<&str> {
        self.raw_response.get("token_type").and_then(Value::as_str)
    }

    /// Lifetime hint in seconds reported by the provider, if any
    pub fn expires_in(&self) -> Option<i64> {
        self.raw_response.get("expires_in").and_then(Value::as_i64)
    }
}

/// Result of evaluating whether a cached token can still be used
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValidity {
    /// Usable; `expires_at` is `None` when the payload carries no `exp`
    Valid { expires_at: Option<i64> },
    /// Past (or within the buffer of) its `exp` claim
    Expired { expires_at: i64 },
    /// Could not be decoded; treated as expired
    Malformed { reason: String },
}

impl TokenValidity {
    /// Whether the token may be handed to a caller without re-authenticating
    pub fn is_usable(&self) -> bool {
        matches!(self, TokenValidity::Valid { .. })
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
