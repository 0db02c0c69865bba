//! Local token expiry evaluation
//!
//! Only the payload segment of a JWT-style token is inspected. Nothing
//! here verifies signatures; the provider does that when the token is used.

use super::types::TokenValidity;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use chrono::Utc;
use serde_json::{Map, Value};

/// Seconds before `exp` at which a token is already considered expired
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 300;

/// Evaluate a token against `now` (Unix seconds).
///
/// Expired when `now >= exp - TOKEN_EXPIRY_BUFFER_SECS`. A payload without
/// `exp` never expires. Anything that cannot be decoded is `Malformed`.
pub fn evaluate_token(token: &str, now: i64) -> TokenValidity {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return TokenValidity::malformed(format!(
            "expected 3 dot-separated segments, found {}",
            segments.len()
        ));
    }

    let claims = match decode_payload(segments[1]) {
        Ok(claims) => claims,
        Err(reason) => return TokenValidity::Malformed { reason },
    };

    let Some(exp) = claims.get("exp") else {
        return TokenValidity::Valid { expires_at: None };
    };

    let Some(exp) = exp.as_f64() else {
        return TokenValidity::malformed(format!("non-numeric exp claim: {exp}"));
    };

    let expires_at = exp as i64;
    if now as f64 >= exp - TOKEN_EXPIRY_BUFFER_SECS as f64 {
        TokenValidity::Expired { expires_at }
    } else {
        TokenValidity::Valid {
            expires_at: Some(expires_at),
        }
    }
}

/// Whether the token must be replaced before use, judged against the system clock
pub fn is_token_expired(token: &str) -> bool {
    let now = Utc::now().timestamp();
    match evaluate_token(token, now) {
        TokenValidity::Valid { expires_at: None } => {
            tracing::debug!("No expiration time found in token");
            false
        }
        TokenValidity::Valid {
            expires_at: Some(exp),
        } => {
            tracing::debug!(expires_at = exp, "Token is valid");
            false
        }
        TokenValidity::Expired { expires_at } => {
            tracing::debug!(expires_at, now, "Token expired or within refresh buffer");
            true
        }
        TokenValidity::Malformed { reason } => {
            tracing::debug!(%reason, "Could not decode token, treating as expired");
            true
        }
    }
}

/// Decode a base64url payload segment (padding optional) into a JSON object
fn decode_payload(segment: &str) -> Result<Map<String, Value>, String> {
    let mut padded = segment.to_string();
    padded.extend(std::iter::repeat('=').take((4 - segment.len() % 4) % 4));

    let bytes = URL_SAFE
        .decode(&padded)
        .or_else(|_| STANDARD.decode(&padded))
        .map_err(|e| format!("invalid base64 payload: {e}"))?;

    let text = String::from_utf8(bytes).map_err(|e| format!("payload is not UTF-8: {e}"))?;

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(_) => Err("payload is not a JSON object".to_string()),
        Err(e) => Err(format!("payload is not valid JSON: {e}")),
    }
}
