use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::str::FromStr;

use crate::error::{LyricsError, Result};
use crate::models::{LrcLyricsResponse, UnformattedLyricsResponse};
use crate::providers::spotify::extract_track_id;
use crate::providers::LyricsProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LyricsFormat {
    #[default]
    Lrc,
    Unformatted,
}

impl FromStr for LyricsFormat {
    type Err = LyricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lrc" => Ok(LyricsFormat::Lrc),
            "unformatted" => Ok(LyricsFormat::Unformatted),
            other => Err(LyricsError::InvalidType(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LyricsBody {
    Lrc(LrcLyricsResponse),
    Unformatted(UnformattedLyricsResponse),
}

/// Resolves the track and builds the payload for the requested `type`.
pub async fn assemble(
    provider: &dyn LyricsProvider,
    spotify_url: &str,
    kind: Option<&str>,
) -> Result<LyricsBody> {
    let track_id = extract_track_id(spotify_url).ok_or(LyricsError::InvalidUrl)?;
    let format = kind.map(LyricsFormat::from_str).transpose()?.unwrap_or_default();

    match format {
        LyricsFormat::Lrc => {
            let lyrics = provider.synced_lyrics(&track_id).await?;
            Ok(LyricsBody::Lrc(lyrics.into()))
        }
        LyricsFormat::Unformatted => {
            let lines = provider.unformatted_lyrics(&track_id).await?;
            Ok(LyricsBody::Unformatted(UnformattedLyricsResponse::new(lines)))
        }
    }
}

pub async fn handle(
    provider: &dyn LyricsProvider,
    spotify_url: &str,
    kind: Option<&str>,
) -> HttpResponse {
    match assemble(provider, spotify_url, kind).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => e.error_response(),
    }
}
