//! MyMP3 - Playback Queue
//!
//! Ordered, circularly linked playback queue for the MyMP3 shell.
//!
//! This crate provides:
//! - O(1) append after the insertion cursor
//! - O(1) removal of any track given the reference returned at insertion
//! - Checked references: stale or foreign references fail with
//!   [`QueueError::InvalidReference`] instead of corrupting the cycle
//! - Restartable playback-order iteration starting at the oldest track
//!
//! # Example
//!
//! ```rust
//! use mymp3_queue::PlaybackQueue;
//!
//! let mut queue = PlaybackQueue::new();
//! let _a = queue.enqueue("Song A", "Artist", "Album");
//! let b = queue.enqueue("Song B", "Artist", "Album");
//! let _c = queue.enqueue("Song C", "Artist", "Album");
//!
//! queue.dequeue_node(b).unwrap();
//!
//! let titles: Vec<_> = queue.entries().map(|t| t.title.as_str()).collect();
//! assert_eq!(titles, ["Song A", "Song C"]);
//! assert!(queue.dequeue_node(b).is_err());
//! ```

mod error;
mod queue;
mod types;

// Public exports
pub use error::{QueueError, Result};
pub use queue::{Iter, PlaybackQueue};
pub use types::{TrackEntry, TrackRef};
