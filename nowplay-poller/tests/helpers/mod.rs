//! Test Helper Utilities
//!
//! Shared utilities for testing the now-playing poller

#![allow(dead_code)]

pub mod log_capture;
pub mod scripted_source;

// Re-export commonly used items
pub use log_capture::LogCapture;
pub use mock_backend::MockBackend;
pub use scripted_source::ScriptedSource;
