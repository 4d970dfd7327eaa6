//! Error types shared by the monitor and its library.
//!
//! The `MonitorError` enum groups the failure cases of a monitoring cycle:
//! transport and payload errors (recovered by skipping the cycle), state file
//! I/O, notification dispatch, and configuration errors that abort startup.
use std::io;

use thiserror::Error;

/// Unified error type for the gold price monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// I/O error while reading or writing the state file or spawning a process.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level failure raised by the HTTP client.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The price endpoint answered with a non-success status code.
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the monitor relies on is absent from the payload.
    #[error("Missing field in price payload: {0}")]
    MissingField(String),

    /// The quoted price cannot be used (zero, negative, NaN or infinite).
    #[error("Invalid price value: {0}")]
    InvalidPrice(f64),

    /// The OS notification could not be delivered; contains a short context string.
    #[error("Notification failed: {0}")]
    Notification(String),

    /// The TOML configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The Ctrl+C handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(String),
}
