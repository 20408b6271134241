//! MyMP3 - Shell
//!
//! Toolkit-independent core of the MyMP3 desktop shell.
//!
//! This crate provides:
//! - [`ShellCoordinator`]: routes toggles, resizes and ticks to the menu and
//!   queue drawers, and queue, volume, seek and page input to their models
//! - [`RenderSink`]: the outbound interface a widget toolkit implements
//! - [`EffectLog`]: a recording sink with serializable [`RenderEffect`]s
//! - [`ShellConfig`]: layered configuration (defaults, TOML file, environment)
//!
//! # Architecture
//!
//! `mymp3-shell` draws nothing and owns no clock:
//! - The host calls [`ShellCoordinator::tick`] once per frame while the sink
//!   has received `request_tick()`
//! - Video frames, decoding and widget layout stay in the toolkit
//!
//! # Example
//!
//! ```rust
//! use mymp3_shell::{EffectLog, PanelId, ShellConfig, ShellCoordinator};
//! use std::time::Duration;
//!
//! let mut shell = ShellCoordinator::new(&ShellConfig::default(), EffectLog::new());
//!
//! let song = shell.enqueue_track("Song A", "Artist", "Album");
//! shell.toggle_queue_drawer();
//! while shell.is_animating() {
//!     shell.tick(Duration::from_millis(16));
//! }
//!
//! assert!(shell.queue_drawer().is_visible());
//! assert_eq!(shell.remove_track(song).unwrap().title, "Song A");
//! assert!(shell.remove_track(song).is_err());
//! assert!(!shell.sink().positions(PanelId::Queue).is_empty());
//! ```

mod config;
mod coordinator;
mod effects;
mod error;
mod pages;
mod transport;

// Public exports
pub use config::{
    ShellConfig, TransportSettings, WindowSettings, DEFAULT_CONFIG_FILE, ENV_PREFIX,
};
pub use coordinator::{SharedShell, ShellCoordinator};
pub use effects::{EffectLog, PanelId, RenderEffect, RenderSink};
pub use error::{Result, ShellError};
pub use pages::{MenuPages, DEFAULT_PAGES};
pub use transport::{Transport, Volume};

// Re-exported so hosts need only this crate
pub use mymp3_motion::{DrawerPhase, DrawerSettings, Easing, Point, Size};
pub use mymp3_queue::{QueueError, TrackEntry, TrackRef};
