use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::auth::TokenManager;
use super::transport::{SpotifyTransport, UpstreamResponse};
use crate::error::{LyricsError, Result};
use crate::models::SyncedLyrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpLyricsResponse {
    pub colors: SpLyricsColors,
    pub has_vocal_removal: bool,
    pub lyrics: SpLyrics,
}

/// ARGB colors packed into signed integers, as the web player sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpLyricsColors {
    pub background: i64,
    pub highlight_text: i64,
    pub text: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpLyrics {
    pub alternatives: Vec<serde_json::Value>,
    pub cap_status: String,
    pub is_dense_typeface: bool,
    pub is_rtl_language: bool,
    pub is_snippet: bool,
    pub language: String,
    pub lines: Vec<SpLyricsLine>,
    pub provider: String,
    pub provider_display_name: String,
    pub provider_lyrics_id: String,
    pub show_upsell: bool,
    pub sync_lyrics_uri: String,
    pub sync_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpLyricsLine {
    pub start_time_ms: String,
    pub end_time_ms: String,
    pub syllables: Vec<String>,
    pub words: String,
}

pub struct LyricsClient {
    tokens: TokenManager,
    transport: Arc<dyn SpotifyTransport>,
}

impl LyricsClient {
    pub fn new(tokens: TokenManager, transport: Arc<dyn SpotifyTransport>) -> Self {
        Self { tokens, transport }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub async fn fetch_raw_lyrics(&self, track_id: &str) -> Result<SpLyricsResponse> {
        let token = self.tokens.ensure_valid_token().await?;
        let mut response = self
            .transport
            .request_lyrics(track_id, &token.access_token)
            .await?;

        // A token can be revoked before its advertised expiry; swap it once and retry
        if response.status == 401 {
            info!("Lyrics request for {track_id} was unauthorized");
            let token = self.tokens.refresh_rejected(&token).await?;
            response = self
                .transport
                .request_lyrics(track_id, &token.access_token)
                .await?;
        }

        Self::decode(track_id, response)
    }

    fn decode(track_id: &str, response: UpstreamResponse) -> Result<SpLyricsResponse> {
        if response.status == 404 {
            debug!("No lyrics for {track_id}");
            return Err(LyricsError::LyricsNotFound);
        }
        if !response.is_success() {
            return Err(LyricsError::UpstreamUnavailable(format!(
                "lyrics endpoint answered {}",
                response.status
            )));
        }
        if response.body.trim().is_empty() {
            debug!("Empty lyrics body for {track_id}");
            return Err(LyricsError::LyricsNotFound);
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn get_synced_lyrics(&self, track_id: &str) -> Result<SyncedLyrics> {
        self.fetch_raw_lyrics(track_id).await?.to_synced_lyrics()
    }

    pub async fn get_unformatted_lyrics(&self, track_id: &str) -> Result<Vec<SpLyricsLine>> {
        Ok(self.fetch_raw_lyrics(track_id).await?.lyrics.lines)
    }
}
