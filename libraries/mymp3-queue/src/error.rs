//! Error types for queue management

use crate::TrackRef;
use thiserror::Error;

/// Queue errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The reference does not name a live node of this queue
    ///
    /// Returned for references minted by another queue and for nodes that
    /// were already removed. The queue is left unmodified.
    #[error("Invalid track reference: {0}")]
    InvalidReference(TrackRef),
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
