//! Endpoint paths served by the now-playing backend

/// GET, returns JSON [`crate::PlaybackStatus`]
pub const PROGRESS_PATH: &str = "/now-playing/progress";

/// GET, returns a raw HTML fragment describing the current track
pub const TRACK_INFO_PATH: &str = "/now-playing/track-info";

/// Fragment the backend renders when nothing is playing
pub const NO_TRACK_FRAGMENT: &str = "<p>No track playing</p>";
