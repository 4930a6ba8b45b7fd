pub mod timestamp;

pub use timestamp::format_line_timestamp;

use crate::error::{LyricsError, Result};
use crate::models::{SongLine, SyncedLyrics};
use crate::providers::spotify::api::{SpLyricsLine, SpLyricsResponse};

impl SpLyricsLine {
    pub fn start_ms(&self) -> Result<u64> {
        self.start_time_ms.trim().parse().map_err(|_| {
            LyricsError::Decode(format!("invalid startTimeMs {:?}", self.start_time_ms))
        })
    }

    pub fn to_song_line(&self) -> Result<SongLine> {
        Ok(SongLine {
            timestamp: format_line_timestamp(self.start_ms()?),
            text: self.words.clone(),
        })
    }
}

impl SpLyricsResponse {
    /// Converts the raw payload into display lines, keeping playback order.
    pub fn to_synced_lyrics(&self) -> Result<SyncedLyrics> {
        let lines = self
            .lyrics
            .lines
            .iter()
            .map(SpLyricsLine::to_song_line)
            .collect::<Result<Vec<_>>>()?;

        Ok(SyncedLyrics {
            sync_type: self.lyrics.sync_type.clone(),
            lines,
        })
    }
}
