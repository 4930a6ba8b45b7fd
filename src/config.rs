use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LyricsError, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub sp_dc: Option<String>,
    pub host: String,
    pub port: u16,
    pub token_cache_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        // Deployments written for the old service export the lowercase name
        let sp_dc = std::env::var("SP_DC")
            .or_else(|_| std::env::var("sp_dc"))
            .ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let token_cache_dir = std::env::var("TOKEN_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        let timeout_secs = std::env::var("SPOTIFY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            sp_dc,
            host,
            port,
            token_cache_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// The `sp_dc` cookie value, or `MissingCredential` if it is unset or blank.
    pub fn session_credential(&self) -> Result<&str> {
        match self.sp_dc.as_deref() {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(LyricsError::MissingCredential),
        }
    }
}
