use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::Token;

const CACHE_FILE_PREFIX: &str = "spotify_token";

/// Single-slot storage for the current bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Option<Token>;
    async fn save(&self, token: &Token) -> Result<()>;
}

/// Keeps the token in a JSON file so it survives restarts.
///
/// The file name is derived from the session credential, so two deployments
/// sharing a directory with different cookies never read each other's token.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: &Path, credential: &str) -> Result<Self> {
        // Create cache directory if it doesn't exist
        fs::create_dir_all(dir)
            .with_context(|| format!("create token cache dir {}", dir.display()))?;

        let key = Self::generate_cache_key(credential);
        let path = dir.join(format!("{CACHE_FILE_PREFIX}_{key}.json"));

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn generate_cache_key(credential: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(credential.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<Token> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read token cache file: {e}");
                return None;
            }
        };

        match serde_json::from_str::<Token>(&contents) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Discarding unreadable token cache: {e}");
                let _ = tokio::fs::remove_file(&self.path).await;
                None
            }
        }
    }

    async fn save(&self, token: &Token) -> Result<()> {
        let json = serde_json::to_string(token)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("write token cache {}", self.path.display()))?;
        debug!("Token cache written to {}", self.path.display());
        Ok(())
    }
}

/// In-process store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<Token> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn save(&self, token: &Token) -> Result<()> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "spotify-lyrics-api-cache-test-{}-{n}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_file_store_starts_empty() {
        let dir = scratch_dir();
        let store = FileTokenStore::new(&dir, "cookie").unwrap();

        assert!(dir.exists());
        assert!(store.load().await.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = scratch_dir();
        let token = Token::new("abc", 1_700_000_000_000);

        FileTokenStore::new(&dir, "cookie")
            .unwrap()
            .save(&token)
            .await
            .unwrap();

        // A fresh store over the same directory plays the part of a restarted process
        let reopened = FileTokenStore::new(&dir, "cookie").unwrap();
        assert_eq!(reopened.load().await, Some(token));

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_file_store_overwrites_single_record() {
        let dir = scratch_dir();
        let store = FileTokenStore::new(&dir, "cookie").unwrap();

        store.save(&Token::new("first", 1)).await.unwrap();
        store.save(&Token::new("second", 2)).await.unwrap();

        assert_eq!(store.load().await, Some(Token::new("second", 2)));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_file_store_is_scoped_to_credential() {
        let dir = scratch_dir();
        let alice = FileTokenStore::new(&dir, "alice-cookie").unwrap();
        let bob = FileTokenStore::new(&dir, "bob-cookie").unwrap();

        assert_ne!(alice.path(), bob.path());

        alice.save(&Token::new("alice-token", 10)).await.unwrap();
        assert!(bob.load().await.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_name_does_not_contain_credential() {
        let dir = scratch_dir();
        let store = FileTokenStore::new(&dir, "very-secret-cookie").unwrap();

        let name = store.path().file_name().unwrap().to_string_lossy();
        assert!(!name.contains("very-secret-cookie"));
        assert!(name.starts_with("spotify_token_"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_discarded() {
        let dir = scratch_dir();
        let store = FileTokenStore::new(&dir, "cookie").unwrap();
        fs::write(store.path(), "{ definitely not a token").unwrap();

        assert!(store.load().await.is_none());
        assert!(!store.path().exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_save_into_missing_dir_fails() {
        let dir = scratch_dir();
        let store = FileTokenStore::new(&dir, "cookie").unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(store.save(&Token::new("abc", 1)).await.is_err());
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let key1 = FileTokenStore::generate_cache_key("cookie");
        let key2 = FileTokenStore::generate_cache_key("cookie");
        let key3 = FileTokenStore::generate_cache_key("other");

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
        assert_eq!(key1.len(), 64);
        assert!(key1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.is_none());

        store.save(&Token::new("abc", 5)).await.unwrap();
        assert_eq!(store.load().await, Some(Token::new("abc", 5)));

        let seeded = MemoryTokenStore::with_token(Token::new("seed", 7));
        assert_eq!(seeded.load().await, Some(Token::new("seed", 7)));
    }
}
