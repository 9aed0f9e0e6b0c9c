//! Credential storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

/// Access and refresh token pair issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: String,
}

/// Where the session keeps its tokens.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<LoginToken>;
    fn set(&self, token: LoginToken);
    fn clear(&self);
}

/// Process-local store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    current: ArcSwapOption<LoginToken>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: LoginToken) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(token),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<LoginToken> {
        self.current.load_full().map(|t| (*t).clone())
    }

    fn set(&self, token: LoginToken) {
        self.current.store(Some(Arc::new(token)));
    }

    fn clear(&self) {
        self.current.store(None);
    }
}

/// Store persisted as JSON on disk, with an in-memory copy.
///
/// Disk failures are logged; the in-memory copy stays authoritative for the
/// running process.
pub struct FileCredentialStore {
    path: PathBuf,
    current: ArcSwapOption<LoginToken>,
}

impl FileCredentialStore {
    /// Open the store, loading an existing token file if present.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let current = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<LoginToken>(&content) {
                Ok(token) => Some(Arc::new(token)),
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "Ignoring unreadable credential file");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            path,
            current: ArcSwapOption::new(current),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: &LoginToken) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string(token)?;
        fs::write(&self.path, text)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<LoginToken> {
        self.current.load_full().map(|t| (*t).clone())
    }

    fn set(&self, token: LoginToken) {
        if let Err(e) = self.persist(&token) {
            tracing::warn!(path = ?self.path, error = %e, "Failed to persist credentials");
        }
        self.current.store(Some(Arc::new(token)));
    }

    fn clear(&self) {
        self.current.store(None);
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!(path = ?self.path, error = %e, "Failed to remove credential file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> LoginToken {
        LoginToken {
            token: value.to_string(),
            refresh_token: format!("{}-refresh", value),
        }
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().is_none());

        store.set(token("a"));
        assert_eq!(store.get().unwrap().token, "a");

        store.set(token("b"));
        assert_eq!(store.get().unwrap().refresh_token, "b-refresh");

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session").join("token.json");

        let store = FileCredentialStore::open(&path).unwrap();
        assert!(store.get().is_none());
        store.set(token("persisted"));
        assert!(path.exists());

        let reopened = FileCredentialStore::open(&path).unwrap();
        assert_eq!(reopened.get(), Some(token("persisted")));

        reopened.clear();
        assert!(!path.exists());
        assert!(reopened.get().is_none());
    }

    #[test]
    fn test_token_wire_format() {
        let parsed: LoginToken =
            serde_json::from_str(r#"{"token":"t","refreshToken":"r"}"#).unwrap();
        assert_eq!(parsed, LoginToken { token: "t".into(), refresh_token: "r".into() });
    }
}
