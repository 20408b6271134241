//! Core types for queue management

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Track metadata held by a queue node
///
/// Owned exclusively by the node that holds it. Removing the node hands
/// ownership back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Identifier generated when the track was enqueued
    pub id: Uuid,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,
}

impl TrackEntry {
    /// Create an entry with a fresh identifier
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }
}

/// Stable handle to a node of a [`PlaybackQueue`](crate::PlaybackQueue)
///
/// A reference names the owning queue, the arena slot and the generation of
/// that slot. Slots are reused after removal with a bumped generation, so a
/// stale reference never resolves to a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackRef {
    pub(crate) queue: u64,
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl TrackRef {
    /// Identifier of the queue that minted this reference
    pub fn queue_id(&self) -> u64 {
        self.queue
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "queue {} slot {} (generation {})",
            self.queue, self.slot, self.generation
        )
    }
}
