//! Error handling module for pulltime
//!
//! Only orchestration failures live here. A single image that fails to pull is
//! recorded on its [`PullResult`](crate::pull::PullResult) instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PullTimeError {
    /// Invalid runner or mode configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pull failure escalated to the process exit code (`image` mode)
    #[error("failed to pull {image}: {reason}")]
    PullFailed { image: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A worker task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for PullTimeError {
    fn from(err: tokio::task::JoinError) -> Self {
        PullTimeError::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PullTimeError>;
