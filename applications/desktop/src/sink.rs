//! Terminal render sink
//!
//! Stands in for the widget toolkit: every effect is either logged through
//! `tracing` or written to stdout as one JSON object per line.

use mymp3_shell::{PanelId, RenderEffect, RenderSink, TrackEntry};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How effects are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable log lines
    Log,
    /// JSON lines on stdout
    Json,
}

/// Sink used by the host loop
#[derive(Debug)]
pub struct HostSink {
    mode: OutputMode,

    /// Set by `request_tick()`, cleared when the loop ticks
    tick_requested: bool,

    /// Effects reported so far
    emitted: u64,
}

impl HostSink {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            tick_requested: false,
            emitted: 0,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Consume a pending tick request
    pub fn take_tick_request(&mut self) -> bool {
        std::mem::take(&mut self.tick_requested)
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn emit(&mut self, effect: RenderEffect) {
        self.emitted += 1;
        match self.mode {
            OutputMode::Json => print_json(&effect),
            OutputMode::Log => match effect {
                RenderEffect::PanelPosition { panel, x, y } => {
                    debug!(panel = panel.name(), x, y, "Panel moved");
                }
                other => info!(effect = ?other, "Render"),
            },
        }
    }
}

impl RenderSink for HostSink {
    fn set_panel_position(&mut self, panel: PanelId, x: f32, y: f32) {
        self.emit(RenderEffect::PanelPosition { panel, x, y });
    }

    fn set_panel_visible(&mut self, panel: PanelId, visible: bool) {
        self.emit(RenderEffect::PanelVisible { panel, visible });
    }

    fn request_tick(&mut self) {
        self.tick_requested = true;
    }

    fn queue_changed(&mut self, len: usize) {
        self.emit(RenderEffect::QueueChanged { length: len });
    }

    fn volume_changed(&mut self, level: u8, muted: bool) {
        self.emit(RenderEffect::VolumeChanged {
            level,
            is_muted: muted,
        });
    }

    fn seek_requested(&mut self, position: Duration) {
        self.emit(RenderEffect::SeekRequested {
            position_ms: position.as_millis() as u64,
        });
    }

    fn menu_page_changed(&mut self, index: usize) {
        self.emit(RenderEffect::MenuPageChanged { index });
    }
}

/// One row of the queue drawer
#[derive(Debug, Serialize)]
pub struct QueueRow<'a> {
    pub index: usize,
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
}

/// Print the queue in playback order
pub fn print_queue<'a>(mode: OutputMode, entries: impl Iterator<Item = &'a TrackEntry>) {
    let rows: Vec<QueueRow<'a>> = entries
        .enumerate()
        .map(|(index, entry)| QueueRow {
            index,
            title: &entry.title,
            artist: &entry.artist,
            album: &entry.album,
        })
        .collect();

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({ "queue": rows })),
        OutputMode::Log => {
            info!(len = rows.len(), "Queue");
            for row in &rows {
                info!("  {}. {} - {} ({})", row.index, row.title, row.artist, row.album);
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!(error = %e, "Failed to encode output"),
    }
}
