//! In-memory status source for timing tests
//!
//! Plays back a script of progress responses (the last entry repeats) and
//! records how many fetches ran and how many overlapped.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nowplay_common::{Error, PlaybackStatus, Result};
use nowplay_poller::StatusSource;

pub struct ScriptedSource {
    script: Mutex<VecDeque<Option<PlaybackStatus>>>,
    fetch_delay: Duration,
    progress_fetches: AtomicUsize,
    track_info_fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    /// `None` entries fail with a network error
    pub fn new(script: Vec<Option<PlaybackStatus>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fetch_delay: Duration::ZERO,
            progress_fetches: AtomicUsize::new(0),
            track_info_fetches: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Make every progress fetch take `delay` of (tokio) time
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn progress_fetches(&self) -> usize {
        self.progress_fetches.load(Ordering::SeqCst)
    }

    pub fn track_info_fetches(&self) -> usize {
        self.track_info_fetches.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_status(&self) -> Option<PlaybackStatus> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().flatten()
        } else {
            script.front().cloned().flatten()
        }
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_progress(&self) -> Result<PlaybackStatus> {
        self.progress_fetches.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.next_status()
            .ok_or_else(|| Error::Network("connection refused".to_string()))
    }

    async fn fetch_track_info(&self) -> Result<String> {
        let n = self.track_info_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("<p>fragment {}</p>", n))
    }
}
