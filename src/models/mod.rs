use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::providers::spotify::api::SpLyricsLine;

/// A Spotify web-player bearer token plus the moment it stops working.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "accessTokenExpirationTimestampMs")]
    pub expires_at_ms: u64,
}

impl Token {
    pub fn new(access_token: impl Into<String>, expires_at_ms: u64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at_ms,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_ms())
    }

    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at_ms
    }
}

// Tokens end up in log lines through `{:?}`; keep the secret out of them
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("expires_at_ms", &self.expires_at_ms)
            .finish()
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongLine {
    pub timestamp: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedLyrics {
    pub sync_type: String,
    pub lines: Vec<SongLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrcLyricsResponse {
    pub error: bool,
    pub sync_type: String,
    pub lines: Vec<SongLine>,
}

impl From<SyncedLyrics> for LrcLyricsResponse {
    fn from(lyrics: SyncedLyrics) -> Self {
        Self {
            error: false,
            sync_type: lyrics.sync_type,
            lines: lyrics.lines,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnformattedLyricsResponse {
    pub error: bool,
    pub sync_type: String,
    pub lines: Vec<SpLyricsLine>,
}

impl UnformattedLyricsResponse {
    pub const SYNC_TYPE: &'static str = "LINE_SYNCED";

    pub fn new(lines: Vec<SpLyricsLine>) -> Self {
        Self {
            error: false,
            sync_type: Self::SYNC_TYPE.to_string(),
            lines,
        }
    }
}

/// Plain `{error, message}` body used for every non-lyrics response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub error: bool,
    pub message: String,
}

impl ServerMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}
