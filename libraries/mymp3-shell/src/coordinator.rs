//! Shell coordinator - core orchestration
//!
//! Routes user input to the two drawers, the playback queue, the transport
//! model and the menu pages, and forwards every resulting change to the
//! rendering collaborator.

use crate::{
    config::ShellConfig,
    effects::{PanelId, RenderSink},
    error::{Result, ShellError},
    pages::MenuPages,
    transport::{Transport, Volume},
};
use mymp3_motion::{DrawerController, DrawerLayout, DrawerUpdate, Size};
use mymp3_queue::{PlaybackQueue, TrackEntry, TrackRef};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Coordinator shared between threads
///
/// All queue mutations and drawer transitions are serialised behind the one
/// mutex.
pub type SharedShell<S> = Arc<Mutex<ShellCoordinator<S>>>;

/// Owns the shell state and talks to one [`RenderSink`]
///
/// Single-threaded: every method runs to completion before the next one, so
/// a tick always sees the latest toggle, resize or cancel.
#[derive(Debug)]
pub struct ShellCoordinator<S: RenderSink> {
    menu: DrawerController,
    queue_drawer: DrawerController,
    queue: PlaybackQueue,
    volume: Volume,
    transport: Transport,
    pages: MenuPages,
    sink: S,
}

impl<S: RenderSink> ShellCoordinator<S> {
    /// Create a coordinator with both drawers closed and an empty queue
    pub fn new(config: &ShellConfig, sink: S) -> Self {
        let container = config.window.size();
        info!(
            width = container.width,
            height = container.height,
            "Shell coordinator created"
        );

        Self {
            menu: DrawerController::new(
                DrawerLayout::Menu,
                config.menu_drawer.clone(),
                container,
            ),
            queue_drawer: DrawerController::new(
                DrawerLayout::Queue,
                config.queue_drawer.clone(),
                container,
            ),
            queue: PlaybackQueue::new(),
            volume: Volume::new(config.transport.volume),
            transport: Transport::new(),
            pages: MenuPages::with_defaults(),
            sink,
        }
    }

    /// Wrap in [`SharedShell`] for multi-threaded hosts
    pub fn into_shared(self) -> SharedShell<S> {
        Arc::new(Mutex::new(self))
    }

    /// Push the complete current state to the sink
    ///
    /// Hosts call this once after creating their widgets.
    pub fn sync(&mut self) {
        let panels = [&self.menu, &self.queue_drawer]
            .map(|drawer| (drawer.layout(), drawer.position(), drawer.is_visible()));
        for (layout, position, visible) in panels {
            let panel = PanelId::from(layout);
            self.sink.set_panel_position(panel, position.x, position.y);
            self.sink.set_panel_visible(panel, visible);
        }
        self.sink.queue_changed(self.queue.len());
        self.sink
            .volume_changed(self.volume.level(), self.volume.is_muted());
        if let Some(index) = self.pages.current_index() {
            self.sink.menu_page_changed(index);
        }
        self.request_tick_if_animating();
    }

    // ===== Drawers =====

    /// Open or close the side menu, reversing a running animation
    pub fn toggle_menu_drawer(&mut self) {
        let update = self.menu.toggle();
        debug!(phase = ?self.menu.phase(), "Menu drawer toggled");
        self.apply(PanelId::Menu, update);
        self.request_tick_if_animating();
    }

    /// Open or close the queue panel, reversing a running animation
    pub fn toggle_queue_drawer(&mut self) {
        let update = self.queue_drawer.toggle();
        debug!(phase = ?self.queue_drawer.phase(), "Queue drawer toggled");
        self.apply(PanelId::Queue, update);
        self.request_tick_if_animating();
    }

    /// Stop both drawers where they are
    pub fn cancel_animations(&mut self) {
        let update = self.menu.cancel();
        self.apply(PanelId::Menu, update);
        let update = self.queue_drawer.cancel();
        self.apply(PanelId::Queue, update);
    }

    /// Recompute drawer targets for a new container size
    pub fn on_container_resized(&mut self, width: f32, height: f32) {
        let size = Size::new(width.max(0.0), height.max(0.0));
        debug!(width = size.width, height = size.height, "Container resized");

        let update = self.menu.on_container_resize(size);
        self.apply(PanelId::Menu, update);
        let update = self.queue_drawer.on_container_resize(size);
        self.apply(PanelId::Queue, update);
        self.request_tick_if_animating();
    }

    /// Update the transport controls' height
    ///
    /// The queue panel's closed position sits on top of the controls.
    pub fn set_control_bar_height(&mut self, height: f32) {
        let update = self.queue_drawer.set_control_bar_offset(height);
        self.apply(PanelId::Queue, update);
        self.request_tick_if_animating();
    }

    /// Advance all running animations by `elapsed`
    ///
    /// Produces at most one position per drawer. Another tick is requested
    /// while any drawer is still moving.
    pub fn tick(&mut self, elapsed: Duration) {
        let update = self.menu.on_animation_tick(elapsed);
        self.apply(PanelId::Menu, update);
        let update = self.queue_drawer.on_animation_tick(elapsed);
        self.apply(PanelId::Queue, update);
        self.request_tick_if_animating();
    }

    /// Check if any drawer is moving
    pub fn is_animating(&self) -> bool {
        self.menu.is_animating() || self.queue_drawer.is_animating()
    }

    // ===== Queue =====

    /// Append a track and return its reference
    pub fn enqueue_track(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> TrackRef {
        let track = self.queue.enqueue(title, artist, album);
        debug!(%track, len = self.queue.len(), "Track enqueued");
        self.sink.queue_changed(self.queue.len());
        track
    }

    /// Remove a track by the reference returned from [`enqueue_track`](Self::enqueue_track)
    ///
    /// A stale or foreign reference fails and leaves the queue unchanged.
    pub fn remove_track(&mut self, track: TrackRef) -> Result<TrackEntry> {
        let entry = self.queue.dequeue_node(track)?;
        debug!(%track, len = self.queue.len(), "Track removed");
        self.sink.queue_changed(self.queue.len());
        Ok(entry)
    }

    /// Remove every track
    pub fn clear_queue(&mut self) {
        if !self.queue.is_empty() {
            self.queue.clear();
            self.sink.queue_changed(0);
        }
    }

    /// Read-only queue for display
    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    // ===== Transport =====

    /// Record a position/duration report from the multimedia collaborator
    pub fn on_transport_report(&mut self, position: Duration, duration: Duration) {
        self.transport.report(position, duration);
    }

    /// Seek, clamped to the loaded media
    ///
    /// Returns the position actually requested.
    pub fn seek(&mut self, position: Duration) -> Duration {
        let target = self.transport.seek(position);
        debug!(
            requested_ms = position.as_millis() as u64,
            target_ms = target.as_millis() as u64,
            "Seek"
        );
        self.sink.seek_requested(target);
        target
    }

    /// Set volume level (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.sink
            .volume_changed(self.volume.level(), self.volume.is_muted());
    }

    /// Toggle mute, keeping the level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.sink
            .volume_changed(self.volume.level(), self.volume.is_muted());
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    // ===== Menu pages =====

    /// Select a menu page
    pub fn select_menu_page(&mut self, index: usize) -> Result<()> {
        if !self.pages.set_current(index) {
            return Err(ShellError::InvalidPage(index));
        }
        self.sink.menu_page_changed(index);
        Ok(())
    }

    pub fn pages(&self) -> &MenuPages {
        &self.pages
    }

    /// Mutable page stack, for hosts that build their own tabs
    pub fn pages_mut(&mut self) -> &mut MenuPages {
        &mut self.pages
    }

    // ===== Accessors =====

    pub fn menu_drawer(&self) -> &DrawerController {
        &self.menu
    }

    pub fn queue_drawer(&self) -> &DrawerController {
        &self.queue_drawer
    }

    /// Drawer behind `panel`
    pub fn drawer(&self, panel: PanelId) -> &DrawerController {
        match panel {
            PanelId::Menu => &self.menu,
            PanelId::Queue => &self.queue_drawer,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the coordinator and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn apply(&mut self, panel: PanelId, update: DrawerUpdate) {
        // Shown before it moves, hidden after it lands
        if update.visibility == Some(true) {
            self.sink.set_panel_visible(panel, true);
        }
        if let Some(position) = update.position {
            self.sink.set_panel_position(panel, position.x, position.y);
        }
        if update.visibility == Some(false) {
            self.sink.set_panel_visible(panel, false);
        }
        if let Some(phase) = update.phase {
            debug!(panel = panel.name(), ?phase, "Panel phase");
        }
    }

    fn request_tick_if_animating(&mut self) {
        if self.is_animating() {
            self.sink.request_tick();
        }
    }
}
