use async_trait::async_trait;

use crate::error::Result;
use crate::models::SyncedLyrics;
use crate::providers::spotify::api::SpLyricsLine;

pub mod spotify;

// The HTTP layer only needs these two shapes of a track's lyrics
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    async fn synced_lyrics(&self, track_id: &str) -> Result<SyncedLyrics>;
    async fn unformatted_lyrics(&self, track_id: &str) -> Result<Vec<SpLyricsLine>>;

    /// Gets credentials ready ahead of the first request.
    async fn warm_up(&self) -> Result<()> {
        Ok(())
    }
}
