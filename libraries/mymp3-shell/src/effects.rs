//! Render effects
//!
//! Outbound side of the shell. The coordinator never draws anything; it
//! tells a [`RenderSink`] what changed:
//! - Panel positions and visibility (per drawer)
//! - Tick requests while any drawer animates
//! - Queue length, volume and page-selection changes
//! - Seek requests for the multimedia collaborator

use mymp3_motion::DrawerLayout;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one of the two sliding panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// Side menu drawer
    Menu,
    /// Bottom queue drawer
    Queue,
}

impl PanelId {
    pub fn name(&self) -> &'static str {
        match self {
            PanelId::Menu => "menu",
            PanelId::Queue => "queue",
        }
    }
}

impl From<DrawerLayout> for PanelId {
    fn from(layout: DrawerLayout) -> Self {
        match layout {
            DrawerLayout::Menu => PanelId::Menu,
            DrawerLayout::Queue => PanelId::Queue,
        }
    }
}

/// Rendering collaborator
///
/// Implemented by whatever owns the widgets. Calls arrive on the thread that
/// drives the coordinator.
pub trait RenderSink {
    /// Move a panel to `(x, y)` in container coordinates
    fn set_panel_position(&mut self, panel: PanelId, x: f32, y: f32);

    /// Show or hide a panel
    fn set_panel_visible(&mut self, panel: PanelId, visible: bool);

    /// Ask for another `tick()` on the next frame
    ///
    /// Issued after every operation that leaves a drawer animating.
    fn request_tick(&mut self);

    /// Queue length changed
    fn queue_changed(&mut self, _len: usize) {}

    /// Volume level or mute state changed
    fn volume_changed(&mut self, _level: u8, _muted: bool) {}

    /// Ask the multimedia collaborator to seek
    fn seek_requested(&mut self, _position: Duration) {}

    /// Menu page selection changed
    fn menu_page_changed(&mut self, _index: usize) {}
}

/// Serializable record of one [`RenderSink`] call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum RenderEffect {
    PanelPosition {
        panel: PanelId,
        x: f32,
        y: f32,
    },
    PanelVisible {
        panel: PanelId,
        visible: bool,
    },
    TickRequested,
    QueueChanged {
        length: usize,
    },
    VolumeChanged {
        level: u8,
        is_muted: bool,
    },
    SeekRequested {
        position_ms: u64,
    },
    MenuPageChanged {
        index: usize,
    },
}

/// [`RenderSink`] that records every call
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    effects: Vec<RenderEffect>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded effects, oldest first
    pub fn effects(&self) -> &[RenderEffect] {
        &self.effects
    }

    /// Take all recorded effects, leaving the log empty
    pub fn drain(&mut self) -> Vec<RenderEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Recorded positions of one panel, oldest first
    pub fn positions(&self, panel: PanelId) -> Vec<(f32, f32)> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                RenderEffect::PanelPosition { panel: p, x, y } if *p == panel => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Last recorded visibility of one panel
    pub fn last_visibility(&self, panel: PanelId) -> Option<bool> {
        self.effects.iter().rev().find_map(|effect| match effect {
            RenderEffect::PanelVisible { panel: p, visible } if *p == panel => Some(*visible),
            _ => None,
        })
    }

    /// Number of tick requests recorded
    pub fn tick_requests(&self) -> usize {
        self.effects
            .iter()
            .filter(|effect| matches!(effect, RenderEffect::TickRequested))
            .count()
    }
}

impl RenderSink for EffectLog {
    fn set_panel_position(&mut self, panel: PanelId, x: f32, y: f32) {
        self.effects.push(RenderEffect::PanelPosition { panel, x, y });
    }

    fn set_panel_visible(&mut self, panel: PanelId, visible: bool) {
        self.effects.push(RenderEffect::PanelVisible { panel, visible });
    }

    fn request_tick(&mut self) {
        self.effects.push(RenderEffect::TickRequested);
    }

    fn queue_changed(&mut self, len: usize) {
        self.effects.push(RenderEffect::QueueChanged { length: len });
    }

    fn volume_changed(&mut self, level: u8, muted: bool) {
        self.effects.push(RenderEffect::VolumeChanged {
            level,
            is_muted: muted,
        });
    }

    fn seek_requested(&mut self, position: Duration) {
        self.effects.push(RenderEffect::SeekRequested {
            position_ms: position.as_millis() as u64,
        });
    }

    fn menu_page_changed(&mut self, index: usize) {
        self.effects.push(RenderEffect::MenuPageChanged { index });
    }
}
