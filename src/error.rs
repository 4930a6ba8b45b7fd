use thiserror::Error;

/// Everything that can go wrong between an incoming lyrics request and Spotify.
///
/// The HTTP layer turns each variant into a status code and a `ServerMessage`
/// body (see `server::error`).
#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("Please set SP_DC as an environment variable.")]
    MissingCredential,

    #[error("The SP_DC set seems to be invalid, please correct it!")]
    InvalidCredential,

    #[error("Could not reach Spotify: {0}")]
    UpstreamUnavailable(String),

    #[error("Lyrics not found for this track.")]
    LyricsNotFound,

    #[error("Invalid provided Spotify URL")]
    InvalidUrl,

    #[error("Invalid type. Supported types are 'lrc' and 'unformatted'.")]
    InvalidType(String),

    #[error("Unexpected response from Spotify: {0}")]
    Decode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for LyricsError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the request URL; neither endpoint puts secrets there
        LyricsError::UpstreamUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for LyricsError {
    fn from(err: serde_json::Error) -> Self {
        LyricsError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LyricsError>;
