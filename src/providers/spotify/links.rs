use once_cell::sync::Lazy;
use regex::Regex;

static TRACK_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https://)?open\.spotify\.com(/intl-[a-z]{2})?/track/([A-Za-z0-9]+)")
        .expect("track link pattern is valid")
});

/// Pulls the track id out of an `open.spotify.com/track/...` link.
pub fn extract_track_id(url: &str) -> Option<String> {
    TRACK_LINK
        .captures(url)
        .and_then(|captures| captures.get(3))
        .map(|id| id.as_str().to_string())
}
