use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, COOKIE};
use std::time::Duration;

use crate::error::Result;

const TOKEN_URL: &str =
    "https://open.spotify.com/get_access_token?reason=transport&productType=web_player";
const LYRICS_URL: &str = "https://spclient.wg.spotify.com/color-lyrics/v2/track";

// The web-player endpoints only answer requests that look like a browser
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.0.0 Safari/537.36";
const APP_PLATFORM: &str = "WebPlayer";

/// Status and body of an upstream response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two Spotify endpoints this service talks to.
#[async_trait]
pub trait SpotifyTransport: Send + Sync {
    async fn request_token(&self, sp_dc: &str) -> Result<UpstreamResponse>;
    async fn request_lyrics(&self, track_id: &str, access_token: &str) -> Result<UpstreamResponse>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SpotifyTransport for HttpTransport {
    async fn request_token(&self, sp_dc: &str) -> Result<UpstreamResponse> {
        let response = self
            .client
            .get(TOKEN_URL)
            .header("App-platform", APP_PLATFORM)
            .header(COOKIE, format!("sp_dc={sp_dc}"))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }

    async fn request_lyrics(&self, track_id: &str, access_token: &str) -> Result<UpstreamResponse> {
        let url = format!("{LYRICS_URL}/{}", urlencoding::encode(track_id));

        let response = self
            .client
            .get(url)
            .header("App-platform", APP_PLATFORM)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .query(&[("format", "json"), ("market", "from_token")])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}
