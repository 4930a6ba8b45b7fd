use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::transport::SpotifyTransport;
use crate::cache::TokenStore;
use crate::error::{LyricsError, Result};
use crate::models::{now_ms, Token};

/// Body of the web-player `get_access_token` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpCredentials {
    pub client_id: String,
    pub access_token: String,
    pub access_token_expiration_timestamp_ms: u64,
    pub is_anonymous: bool,
}

/// What the cache holds right now, relative to the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Missing,
    Valid(Token),
    Expired(Token),
}

impl TokenState {
    pub fn observe(cached: Option<Token>, now_ms: u64) -> Self {
        match cached {
            None => TokenState::Missing,
            Some(token) if token.is_expired_at(now_ms) => TokenState::Expired(token),
            Some(token) => TokenState::Valid(token),
        }
    }
}

/// Turns the long-lived `sp_dc` cookie into short-lived bearer tokens.
pub struct TokenManager {
    sp_dc: String,
    store: Arc<dyn TokenStore>,
    transport: Arc<dyn SpotifyTransport>,
    // Held across check-expiry / refresh / persist
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        sp_dc: impl Into<String>,
        store: Arc<dyn TokenStore>,
        transport: Arc<dyn SpotifyTransport>,
    ) -> Result<Self> {
        let sp_dc = sp_dc.into();
        if sp_dc.trim().is_empty() {
            return Err(LyricsError::MissingCredential);
        }

        Ok(Self {
            sp_dc,
            store,
            transport,
            refresh_lock: Mutex::new(()),
        })
    }

    pub async fn state(&self) -> TokenState {
        TokenState::observe(self.store.load().await, now_ms())
    }

    /// Returns the cached token while it is fresh, refreshing it otherwise.
    pub async fn ensure_valid_token(&self) -> Result<Token> {
        let _guard = self.refresh_lock.lock().await;

        match self.state().await {
            TokenState::Valid(token) => {
                debug!("Reusing cached token (expires at {})", token.expires_at_ms);
                Ok(token)
            }
            TokenState::Expired(_) => {
                info!("Cached token expired, refreshing");
                self.refresh().await
            }
            TokenState::Missing => {
                info!("No cached token, requesting one");
                self.refresh().await
            }
        }
    }

    /// Replaces a token that Spotify refused.
    ///
    /// If another request already swapped `stale` for a fresh token, that one is
    /// returned instead of asking Spotify again.
    pub async fn refresh_rejected(&self, stale: &Token) -> Result<Token> {
        let _guard = self.refresh_lock.lock().await;

        match self.state().await {
            TokenState::Valid(current) if current != *stale => Ok(current),
            _ => {
                info!("Spotify rejected the cached token, refreshing");
                self.refresh().await
            }
        }
    }

    async fn refresh(&self) -> Result<Token> {
        let response = self.transport.request_token(&self.sp_dc).await?;

        if response.status == 401 || response.status == 403 {
            return Err(LyricsError::InvalidCredential);
        }
        if !response.is_success() {
            return Err(LyricsError::UpstreamUnavailable(format!(
                "token endpoint answered {}",
                response.status
            )));
        }

        let credentials: SpCredentials = serde_json::from_str(&response.body)?;
        if credentials.access_token.is_empty() {
            return Err(LyricsError::InvalidCredential);
        }
        if credentials.is_anonymous {
            warn!("Spotify issued an anonymous token; lyrics requests will likely fail");
        }

        let token = Token::new(
            credentials.access_token,
            credentials.access_token_expiration_timestamp_ms,
        );
        // The token is still good for this process even if it can't be cached
        if let Err(e) = self.store.save(&token).await {
            warn!("Failed to persist refreshed token: {e:#}");
        }
        info!("Token refreshed (expires at {})", token.expires_at_ms);

        Ok(token)
    }
}
