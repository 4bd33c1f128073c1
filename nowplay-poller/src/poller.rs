//! Now-playing poller
//!
//! Every [`TICK_INTERVAL`] the poller fetches the playback status, rewrites
//! the progress text and, when the track identifier changes, replaces the
//! track-info fragment.
//!
//! Failures never leave a tick: they are logged at `error` level and the
//! next tick starts from unchanged state. Ticks are serialized; a tick that
//! overruns the interval causes the missed ticks to be skipped rather than
//! run concurrently.

use std::sync::Arc;
use std::time::Duration;

use nowplay_common::format_progress;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::client::StatusSource;
use crate::render::RenderTarget;

/// Fixed polling cadence
pub const TICK_INTERVAL: Duration = Duration::from_millis(3000);

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress displayed; track unchanged or absent
    Progress,
    /// Progress displayed and a new track identifier stored
    TrackChanged {
        track_id: String,
        /// Whether the fragment fetch succeeded
        refreshed: bool,
    },
    /// Progress fetch failed; nothing changed
    Failed,
}

/// Polls a [`StatusSource`] and renders into a [`RenderTarget`]
pub struct Poller {
    source: Arc<dyn StatusSource>,
    target: Arc<dyn RenderTarget>,
    /// Last observed track; only held for compare-and-swap, never across a fetch
    current_track_id: Mutex<Option<String>>,
}

impl Poller {
    pub fn new(source: Arc<dyn StatusSource>, target: Arc<dyn RenderTarget>) -> Self {
        Self {
            source,
            target,
            current_track_id: Mutex::new(None),
        }
    }

    /// Track identifier stored by the last track change
    pub async fn current_track_id(&self) -> Option<String> {
        self.current_track_id.lock().await.clone()
    }

    /// Run one polling cycle
    pub async fn tick(&self) -> TickOutcome {
        let status = match self.source.fetch_progress().await {
            Ok(status) => status,
            Err(e) => {
                error!("Error fetching progress: {}", e);
                return TickOutcome::Failed;
            }
        };

        self.update_progress_display(status.progress_ms, status.duration_ms);

        let Some(track_id) = status.current_track() else {
            debug!("Progress updated, nothing playing");
            return TickOutcome::Progress;
        };

        {
            let mut current = self.current_track_id.lock().await;
            if current.as_deref() == Some(track_id) {
                debug!(track_id, "Progress updated");
                return TickOutcome::Progress;
            }
            info!(
                previous = ?current.as_deref(),
                track_id,
                "Track changed, refreshing track info"
            );
            *current = Some(track_id.to_string());
        }

        let refreshed = self.refresh_fragment().await;

        TickOutcome::TrackChanged {
            track_id: track_id.to_string(),
            refreshed,
        }
    }

    /// Write `"X seconds of Y"` to the progress element
    ///
    /// Returns `false` if the element is absent (silent no-op).
    pub fn update_progress_display(&self, progress_ms: u64, duration_ms: u64) -> bool {
        let text = format_progress(progress_ms, duration_ms);
        let written = self.target.set_progress_text(&text);
        if !written {
            trace!("Progress element absent, skipping update");
        }
        written
    }

    /// Fetch the track-info fragment and swap it into the page
    ///
    /// On failure the previous content stays in place. Returns whether a new
    /// fragment was fetched.
    pub async fn refresh_fragment(&self) -> bool {
        let html = match self.source.fetch_track_info().await {
            Ok(html) => html,
            Err(e) => {
                error!("Error refreshing track info: {}", e);
                return false;
            }
        };

        if !self.target.replace_track_info(&html) {
            trace!("Track-info element absent, skipping update");
        }
        true
    }

    /// Spawn the polling loop on the current tokio runtime
    ///
    /// The first tick fires immediately, then every [`TICK_INTERVAL`].
    pub fn start(self: &Arc<Self>) -> PollerHandle {
        let cancel_token = CancellationToken::new();
        let poller = Arc::clone(self);
        let token = cancel_token.clone();

        let task = tokio::spawn(async move { poller.run(token).await });

        PollerHandle {
            cancel_token,
            task: Some(task),
        }
    }

    async fn run(&self, cancel_token: CancellationToken) {
        let mut interval = time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Poller started ({}ms interval)", TICK_INTERVAL.as_millis());

        loop {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => break,
                _ = self.tick() => {}
            }
        }

        info!("Poller stopped");
    }
}

/// Running polling loop; cancelled by [`PollerHandle::stop`] or on drop
pub struct PollerHandle {
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Cancel the loop and wait for it to exit
    ///
    /// An in-flight tick is abandoned at its next suspension point.
    pub async fn stop(mut self) {
        self.cancel_token.cancel();

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Poller task ended abnormally: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
