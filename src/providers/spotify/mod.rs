pub mod api;
pub mod auth;
pub mod links;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use std::sync::Arc;

use self::api::{LyricsClient, SpLyricsLine};
use self::auth::TokenManager;
use self::transport::{HttpTransport, SpotifyTransport};
use crate::cache::{FileTokenStore, TokenStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::SyncedLyrics;
use crate::providers::LyricsProvider;

pub use self::links::extract_track_id;

pub struct SpotifyProvider {
    client: LyricsClient,
}

impl SpotifyProvider {
    /// Wires the real HTTP transport and the on-disk token cache.
    ///
    /// Fails with `MissingCredential` when `SP_DC` is not configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let sp_dc = config.session_credential()?;
        let transport: Arc<dyn SpotifyTransport> =
            Arc::new(HttpTransport::new(config.request_timeout)?);
        let store: Arc<dyn TokenStore> =
            Arc::new(FileTokenStore::new(&config.token_cache_dir, sp_dc)?);

        Self::new(sp_dc, store, transport)
    }

    pub fn new(
        sp_dc: &str,
        store: Arc<dyn TokenStore>,
        transport: Arc<dyn SpotifyTransport>,
    ) -> Result<Self> {
        let tokens = TokenManager::new(sp_dc, store, Arc::clone(&transport))?;
        Ok(Self {
            client: LyricsClient::new(tokens, transport),
        })
    }
}

#[async_trait]
impl LyricsProvider for SpotifyProvider {
    async fn synced_lyrics(&self, track_id: &str) -> Result<SyncedLyrics> {
        self.client.get_synced_lyrics(track_id).await
    }

    async fn unformatted_lyrics(&self, track_id: &str) -> Result<Vec<SpLyricsLine>> {
        self.client.get_unformatted_lyrics(track_id).await
    }

    async fn warm_up(&self) -> Result<()> {
        self.client.tokens().ensure_valid_token().await.map(|_| ())
    }
}
