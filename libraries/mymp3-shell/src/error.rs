//! Error types for the shell coordinator

use mymp3_queue::QueueError;
use thiserror::Error;

/// Shell errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// Queue rejected the operation
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Menu page index out of range
    #[error("Invalid menu page: {0}")]
    InvalidPage(usize),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
