//! Token store
//!
//! A single JSON file holding the last successful auth response exactly as
//! the endpoint returned it. Writes go through a temp file and a rename.

use super::types::TokenRecord;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Well-known token file, relative to the working directory
pub const DEFAULT_TOKEN_FILE: &str = "access_token.json";

/// File-backed store for the most recent token response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    /// Path to the token file
    path: PathBuf,
}

impl TokenStore {
    /// Create a store at the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a token file is currently present
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Overwrite the token file with a response body
    pub async fn save(&self, body: &str) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, body)
            .await
            .map_err(|e| Error::token_store(format!("Failed to write token file: {e}")))?;

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::token_store(format!(
                "Failed to rename token file: {e}"
            )));
        }

        Ok(())
    }

    /// Read the stored response back, `None` if no file exists
    pub async fn load(&self) -> Result<Option<TokenRecord>> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::token_store(format!(
                    "Failed to read token file: {e}"
                )))
            }
        };

        TokenRecord::from_response_body(&body)
            .map(Some)
            .map_err(|e| Error::token_store(format!("Failed to parse token file: {e}")))
    }

    /// Remove the token file; a missing file is not an error
    pub async fn delete(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::token_store(format!(
                "Failed to delete token file: {e}"
            ))),
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_path() {
        let store = TokenStore::default();
        assert_eq!(store.path(), Path::new("access_token.json"));
    }

    #[tokio::test]
    async fn test_save_writes_body_verbatim() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("access_token.json"));

        let body = r#"{"access_token": "a.b.c", "expires_in": 3600}"#;
        store.save(body).await.unwrap();

        assert!(store.exists());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), body);
        assert!(!dir.path().join("access_token.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("access_token.json"));

        store.save(r#"{"access_token": "first"}"#).await.unwrap();
        store.save(r#"{"access_token": "second"}"#).await.unwrap();

        let record = store.load().await.unwrap().unwrap();
        assert_eq!(record.access_token, "second");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("access_token.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("access_token.json"));
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, Error::TokenStore { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("access_token.json"));

        store.save(r#"{"access_token": "a.b.c"}"#).await.unwrap();
        store.delete().await.unwrap();
        assert!(!store.exists());

        store.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("missing").join("access_token.json"));

        let err = store.save(r#"{"access_token": "a.b.c"}"#).await.unwrap_err();
        assert!(matches!(err, Error::TokenStore { .. }));
    }
}
