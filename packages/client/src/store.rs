//! Persisted session credential.
//!
//! The terminal analog of the web client's single local-storage key: one
//! token file under the user's data directory. Created on successful auth,
//! removed on logout or credential expiry.

use std::path::{Path, PathBuf};

use crate::error::ClientError;

const TOKEN_FILE: &str = "token";

/// Resolve the arcterm data directory based on priority:
/// 1. Explicit path
/// 2. ARCTERM_PATH environment variable
/// 3. System data directory
/// 4. ~/.arcterm (fallback for systems without a standard data directory)
pub fn resolve_data_path(explicit_path: Option<&str>) -> Result<PathBuf, ClientError> {
    if let Some(path) = explicit_path {
        return Ok(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var("ARCTERM_PATH") {
        return Ok(PathBuf::from(env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("arcterm"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".arcterm"));
    }

    Err(ClientError::Store(
        "could not determine data path: no HOME directory or system data directory found"
            .to_string(),
    ))
}

/// On-disk store for the bearer token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(TOKEN_FILE),
        }
    }

    /// Create a store at the resolved default location.
    pub fn resolve(explicit_path: Option<&str>) -> Result<Self, ClientError> {
        Ok(Self::new(resolve_data_path(explicit_path)?))
    }

    /// Load the persisted token, if any. A missing file is not an error.
    pub fn load(&self) -> Result<Option<String>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Store(e.to_string()))?;
        let token = content.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    /// Persist the token, replacing any previous one.
    pub fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Store(e.to_string()))?;
        }
        std::fs::write(&self.path, token).map_err(|e| ClientError::Store(e.to_string()))
    }

    /// Remove the persisted token. Removing an absent token is a no-op.
    pub fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Store(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_returns_none_for_missing_file() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        // when:
        let token = store.load().unwrap();

        // then:
        assert!(token.is_none());
    }

    #[test]
    fn test_save_then_load_round_trips_the_token() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());

        // when:
        store.save("T1").unwrap();

        // then: a fresh store over the same directory sees the token,
        // mirroring a page reload
        let reopened = TokenStore::new(dir.path());
        assert_eq!(reopened.load().unwrap().as_deref(), Some("T1"));
    }

    #[test]
    fn test_save_overwrites_previous_token() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        store.save("T1").unwrap();

        // when:
        store.save("T2").unwrap();

        // then: the most recent successful auth wins
        assert_eq!(store.load().unwrap().as_deref(), Some("T2"));
    }

    #[test]
    fn test_clear_removes_the_token_and_is_idempotent() {
        // given:
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        store.save("T1").unwrap();

        // when:
        store.clear().unwrap();
        store.clear().unwrap();

        // then:
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_load_trims_trailing_newline() {
        // given: a token file edited by hand
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        std::fs::write(dir.path().join("token"), "T1\n").unwrap();

        // when:
        let token = store.load().unwrap();

        // then:
        assert_eq!(token.as_deref(), Some("T1"));
    }
}
