//! CLI runner - loads configuration and establishes an authenticated session

use crate::auth::{Authenticator, TokenStore};
use crate::cli::commands::Cli;
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI, returning the authenticator holding a usable token
    pub async fn run(&self) -> Result<Authenticator> {
        tracing::info!("API Load Pro - Universal REST API Data Creator");

        let config = ApiConfig::load(&self.cli.config)?;
        config.validate()?;
        tracing::info!("Configuration loaded from {}", self.cli.config.display());
        tracing::debug!(base_url = %config.base_url, "Target API");

        if !self.cli.data_file.is_file() {
            return Err(Error::file_not_found(
                self.cli.data_file.display().to_string(),
            ));
        }

        let mut authenticator = Authenticator::new(config)
            .with_token_store(TokenStore::new(&self.cli.token_file));

        if self.cli.reuse_token {
            authenticator.restore_cached_token().await;
        }

        let token = match authenticator.get_access_token().await {
            Some(token) => token,
            None => {
                if !authenticator.authenticate().await {
                    return Err(Error::auth(format!(
                        "could not obtain an access token from {}",
                        authenticator.config().auth_url
                    )));
                }
                authenticator
                    .access_token()
                    .map(ToString::to_string)
                    .ok_or_else(|| Error::auth("no access token after authentication"))?
            }
        };

        tracing::info!("Access token ready ({})", token_preview(&token));
        tracing::debug!(
            data_file = %self.cli.data_file.display(),
            result_dir = %self.cli.result_dir.display(),
            save_results = !self.cli.no_save,
            "Run options"
        );

        Ok(authenticator)
    }
}

/// Leading characters of a token, safe to put in logs
fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}
