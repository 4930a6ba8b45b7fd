//! Scripted stand-in for the Spotify endpoints, shared by the unit and route tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::transport::{SpotifyTransport, UpstreamResponse};
use crate::error::{LyricsError, Result};
use crate::models::now_ms;

pub const SAMPLE_LYRICS: &str = r#"{
  "lyrics": {
    "syncType": "LINE_SYNCED",
    "lines": [
      {"startTimeMs": "960", "words": "Bleeding through the floor in waves of color", "syllables": [], "endTimeMs": "0"},
      {"startTimeMs": "4520", "words": "Chromatic currents pull me under", "syllables": [], "endTimeMs": "0"},
      {"startTimeMs": "62430", "words": "Like a memory from worlds away", "syllables": [], "endTimeMs": "0"},
      {"startTimeMs": "65000", "words": "♪", "syllables": [], "endTimeMs": "0"}
    ],
    "provider": "MusixMatch",
    "providerLyricsId": "12345",
    "providerDisplayName": "Musixmatch",
    "syncLyricsUri": "",
    "isDenseTypeface": false,
    "alternatives": [],
    "language": "en",
    "isRtlLanguage": false,
    "capStatus": "NONE",
    "isSnippet": false,
    "showUpsell": false
  },
  "colors": {"background": -9423837, "text": -16777216, "highlightText": -1},
  "hasVocalRemoval": false
}"#;

pub fn token_body(access_token: &str, expires_at_ms: u64) -> String {
    serde_json::json!({
        "clientId": "d8a5ed958d274c2e8ee717e6a4b0971d",
        "accessToken": access_token,
        "accessTokenExpirationTimestampMs": expires_at_ms,
        "isAnonymous": false
    })
    .to_string()
}

pub struct FakeTransport {
    token: Option<UpstreamResponse>,
    // Played in order; the last one repeats
    lyrics: Mutex<VecDeque<UpstreamResponse>>,
    token_calls: AtomicUsize,
    lyrics_calls: AtomicUsize,
    bearers: Mutex<Vec<String>>,
    track_ids: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            token: Some(UpstreamResponse::new(
                200,
                token_body("fresh-token", now_ms() + 3_600_000),
            )),
            lyrics: Mutex::new(VecDeque::from([UpstreamResponse::new(200, SAMPLE_LYRICS)])),
            token_calls: AtomicUsize::new(0),
            lyrics_calls: AtomicUsize::new(0),
            bearers: Mutex::new(Vec::new()),
            track_ids: Mutex::new(Vec::new()),
        }
    }

    pub fn with_token(mut self, response: UpstreamResponse) -> Self {
        self.token = Some(response);
        self
    }

    pub fn failing_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn with_lyrics(self, responses: Vec<UpstreamResponse>) -> Self {
        *self.lyrics.lock().unwrap() = responses.into();
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn lyrics_calls(&self) -> usize {
        self.lyrics_calls.load(Ordering::SeqCst)
    }

    pub fn bearers(&self) -> Vec<String> {
        self.bearers.lock().unwrap().clone()
    }

    pub fn track_ids(&self) -> Vec<String> {
        self.track_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotifyTransport for FakeTransport {
    async fn request_token(&self, _sp_dc: &str) -> Result<UpstreamResponse> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.token
            .clone()
            .ok_or_else(|| LyricsError::UpstreamUnavailable("connection refused".to_string()))
    }

    async fn request_lyrics(&self, track_id: &str, access_token: &str) -> Result<UpstreamResponse> {
        self.lyrics_calls.fetch_add(1, Ordering::SeqCst);
        self.bearers.lock().unwrap().push(access_token.to_string());
        self.track_ids.lock().unwrap().push(track_id.to_string());

        let mut queue = self.lyrics.lock().unwrap();
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| LyricsError::UpstreamUnavailable("no scripted response".to_string()))
    }
}
