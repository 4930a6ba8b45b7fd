/// Formats a line offset in milliseconds as `MM:SS.CC`.
///
/// Every field is truncated, never rounded: `999` is `00:00.99`. Minutes keep
/// growing past two digits for offsets of 100 minutes or more.
pub fn format_line_timestamp(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let centiseconds = (ms % 1000) / 10;

    format!("{minutes:02}:{seconds:02}.{centiseconds:02}")
}
