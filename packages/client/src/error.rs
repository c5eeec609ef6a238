//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL cannot be used at all
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection dropped
    #[error("Connection lost")]
    ConnectionLost,

    /// Reconnection attempts ran out
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
