//! Playback status as reported by the progress endpoint

use serde::{Deserialize, Serialize};

/// Snapshot of the current playback position
///
/// Fetched fresh on every tick and never persisted. A missing `track_id`
/// key decodes as `None`; the two millisecond counters are required.
///
/// The counters are non-negative JSON integers. Fractional (`45000.0`) or
/// negative values are rejected as a parse failure rather than floored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    #[serde(default)]
    pub track_id: Option<String>,
    pub progress_ms: u64,
    pub duration_ms: u64,
}

impl PlaybackStatus {
    /// Status the backend reports when nothing is playing
    pub fn nothing_playing() -> Self {
        Self {
            track_id: None,
            progress_ms: 0,
            duration_ms: 0,
        }
    }

    pub fn playing(track_id: impl Into<String>, progress_ms: u64, duration_ms: u64) -> Self {
        Self {
            track_id: Some(track_id.into()),
            progress_ms,
            duration_ms,
        }
    }

    /// Track identifier, treating an empty string the same as null
    pub fn current_track(&self) -> Option<&str> {
        self.track_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Render progress as whole seconds, e.g. `"45 seconds of 180"`
///
/// Both values are floored to the second.
pub fn format_progress(progress_ms: u64, duration_ms: u64) -> String {
    format!("{} seconds of {}", progress_ms / 1000, duration_ms / 1000)
}
