//! # Now-Playing Poller Library
//!
//! Polls a now-playing backend on a fixed interval, keeps a progress line up
//! to date and swaps in a fresh track-info fragment whenever the playing
//! track changes.
//!
//! The two fetches sit behind [`StatusSource`] and the two page elements
//! behind [`RenderTarget`], so [`Poller`] can run against a real backend
//! and terminal or against in-memory doubles.

pub mod client;
pub mod poller;
pub mod render;
pub mod startup;

pub use client::{HttpStatusSource, StatusSource};
pub use poller::{Poller, PollerHandle, TickOutcome, TICK_INTERVAL};
pub use render::{MemoryPage, RenderTarget, TerminalTarget};
