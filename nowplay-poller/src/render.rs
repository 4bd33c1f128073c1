//! Render targets standing in for the page the poller updates
//!
//! A target exposes two elements: `progress-text`, whose text is replaced
//! on every successful tick, and `track-info`, whose inner HTML is replaced
//! with the raw fragment when the track changes. Either may be absent.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

/// Element receiving the `"X seconds of Y"` text
pub const PROGRESS_ELEMENT_ID: &str = "progress-text";

/// Element whose contents are replaced by the track-info fragment
pub const TRACK_INFO_ELEMENT_ID: &str = "track-info";

/// The two page touch points written by the poller
///
/// Both methods return `false` when the element does not exist; nothing is
/// written in that case and the caller treats it as a silent no-op.
pub trait RenderTarget: Send + Sync {
    fn set_progress_text(&self, text: &str) -> bool;

    fn replace_track_info(&self, html: &str) -> bool;
}

/// In-memory page holding a set of elements by id
///
/// Useful for headless runs and tests. Only elements the page was built
/// with can be written.
#[derive(Debug)]
pub struct MemoryPage {
    elements: Mutex<HashMap<String, String>>,
}

impl MemoryPage {
    /// Page containing both poller elements, initially empty
    pub fn new() -> Self {
        Self::with_elements([PROGRESS_ELEMENT_ID, TRACK_INFO_ELEMENT_ID])
    }

    /// Page containing only the given element ids
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let elements = ids
            .into_iter()
            .map(|id| (id.to_string(), String::new()))
            .collect();
        Self {
            elements: Mutex::new(elements),
        }
    }

    /// Pre-fill an existing element, e.g. with server-rendered content
    pub fn set(&self, id: &str, content: &str) -> bool {
        self.write(id, content)
    }

    /// Current content of an element, `None` if the element is absent
    pub fn content(&self, id: &str) -> Option<String> {
        self.lock().get(id).cloned()
    }

    pub fn progress_text(&self) -> Option<String> {
        self.content(PROGRESS_ELEMENT_ID)
    }

    pub fn track_info(&self) -> Option<String> {
        self.content(TRACK_INFO_ELEMENT_ID)
    }

    /// Copy of every element, for before/after comparisons
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    fn write(&self, id: &str, content: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(slot) => {
                slot.clear();
                slot.push_str(content);
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.elements.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for MemoryPage {
    fn set_progress_text(&self, text: &str) -> bool {
        self.write(PROGRESS_ELEMENT_ID, text)
    }

    fn replace_track_info(&self, html: &str) -> bool {
        self.write(TRACK_INFO_ELEMENT_ID, html)
    }
}

/// Writes progress lines and fragments to a terminal (or any writer)
///
/// Both elements always exist. Write errors are logged and reported as a
/// skipped write.
pub struct TerminalTarget<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalTarget<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalTarget<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the target and return the underlying writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, element: &str, content: &str) -> bool {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let result = writeln!(out, "{}", content).and_then(|_| out.flush());
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(element, "Failed to write to terminal: {}", e);
                false
            }
        }
    }
}

impl<W: Write + Send> RenderTarget for TerminalTarget<W> {
    fn set_progress_text(&self, text: &str) -> bool {
        self.emit(PROGRESS_ELEMENT_ID, text)
    }

    fn replace_track_info(&self, html: &str) -> bool {
        self.emit(TRACK_INFO_ELEMENT_ID, html.trim_end())
    }
}
