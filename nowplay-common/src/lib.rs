//! # Now-Playing Common Library
//!
//! Shared code for the now-playing poller:
//! - Playback status wire type and progress text formatting
//! - Endpoint paths consumed by the poller
//! - Error taxonomy
//! - Layered configuration resolution

pub mod api;
pub mod config;
pub mod error;
pub mod status;

pub use error::{Error, Result};
pub use status::{format_progress, PlaybackStatus};
