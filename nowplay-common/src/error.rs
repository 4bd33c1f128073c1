//! Common error types for the now-playing poller

use thiserror::Error;

/// Common result type for poller operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the poller crates
///
/// `Network`, `HttpStatus` and `Parse` happen at tick time and are absorbed
/// by the poller. `Config` and `Io` only happen at startup.
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
