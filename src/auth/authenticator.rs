//! Authenticator implementation
//!
//! Obtains tokens through the client-credentials flow, caches the current
//! one in memory, and re-authenticates once when it is found expired.

use super::expiry::is_token_expired;
use super::store::TokenStore;
use super::types::TokenRecord;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::Client;

/// Owns the client-credentials token lifecycle for one configuration.
///
/// State lives in the value itself, so lifecycle methods take `&mut self`.
/// Callers sharing an instance across tasks must serialize access.
pub struct Authenticator {
    /// API configuration (endpoint and client credentials)
    config: ApiConfig,
    /// Current token, only ever set from a successful exchange or a valid stored token
    token: Option<TokenRecord>,
    /// On-disk copy of the last successful response
    store: TokenStore,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create an authenticator with the default token store
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: ApiConfig, http_client: Client) -> Self {
        Self {
            config,
            token: None,
            store: TokenStore::default(),
            http_client,
        }
    }

    /// Use a different token store location
    #[must_use]
    pub fn with_token_store(mut self, store: TokenStore) -> Self {
        self.store = store;
        self
    }

    /// Authenticate with the API, reporting only success or failure.
    ///
    /// Failures are logged with their cause and leave any existing token untouched.
    pub async fn authenticate(&mut self) -> bool {
        match self.try_authenticate().await {
            Ok(()) => true,
            Err(e @ Error::Connection { .. }) => {
                tracing::warn!("Authentication connection error: {e}");
                false
            }
            Err(e) if e.is_rejection() => {
                tracing::warn!("Authentication rejected by provider: {e}");
                false
            }
            Err(e) => {
                tracing::warn!("Authentication failed: {e}");
                false
            }
        }
    }

    /// Authenticate with the API, returning the cause of any failure
    pub async fn try_authenticate(&mut self) -> Result<()> {
        let (record, body) = self.request_token().await?;

        if let Err(e) = self.store.save(&body).await {
            tracing::warn!(
                path = %self.store.path().display(),
                "Error saving token: {e}"
            );
        }

        tracing::info!(
            token_type = record.token_type().unwrap_or("unknown"),
            expires_in = record.expires_in(),
            "Authentication successful"
        );
        self.token = Some(record);
        Ok(())
    }

    /// Get a usable access token.
    ///
    /// Returns `None` when nothing has been obtained yet. An expired or
    /// undecodable token triggers exactly one re-authentication.
    pub async fn get_access_token(&mut self) -> Option<String> {
        let token = self.token.as_ref()?.access_token.clone();
        if !is_token_expired(&token) {
            return Some(token);
        }

        tracing::info!("Current access token expired, re-authenticating");
        if self.authenticate().await {
            self.access_token().map(ToString::to_string)
        } else {
            None
        }
    }

    /// Discard the current token and authenticate again, regardless of validity
    pub async fn refresh_token(&mut self) -> bool {
        tracing::info!("Refreshing access token");
        self.discard().await;
        self.authenticate().await
    }

    /// Discard the in-memory token and delete the token file
    pub async fn clear_token(&mut self) {
        self.discard().await;
        tracing::info!(path = %self.store.path().display(), "Cleared stored token");
    }

    /// Adopt the token from the token file if it is still valid.
    ///
    /// Leaves the current state untouched when the file is missing,
    /// unreadable, or holds an expired token.
    pub async fn restore_cached_token(&mut self) -> bool {
        match self.store.load().await {
            Ok(Some(record)) if !is_token_expired(&record.access_token) => {
                tracing::info!(path = %self.store.path().display(), "Restored stored token");
                self.token = Some(record);
                true
            }
            Ok(Some(_)) => {
                tracing::info!("Stored token expired, ignoring it");
                false
            }
            Ok(None) => {
                tracing::debug!(path = %self.store.path().display(), "No stored token");
                false
            }
            Err(e) => {
                tracing::warn!("Could not restore stored token: {e}");
                false
            }
        }
    }

    /// The current token without checking expiry
    pub fn access_token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.access_token.as_str())
    }

    /// The current token record, including the raw auth response
    pub fn token(&self) -> Option<&TokenRecord> {
        self.token.as_ref()
    }

    /// Get the API configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Get the token store
    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    async fn discard(&mut self) {
        self.token = None;
        if let Err(e) = self.store.delete().await {
            tracing::warn!(path = %self.store.path().display(), "{e}");
        }
    }

    /// Perform the client-credentials exchange, returning the record and raw body
    async fn request_token(&self) -> Result<(TokenRecord, String)> {
        let auth_url = self.config.auth_url.as_str();
        tracing::info!(auth_url, "Authenticating");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(auth_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::Connection {
                        url: auth_url.to_string(),
                        source: e,
                    }
                } else {
                    Error::Http(e)
                }
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "Auth response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let record = TokenRecord::from_response_body(&body)?;
        Ok((record, body))
    }
}
