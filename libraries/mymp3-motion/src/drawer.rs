//! Sliding drawer state machine
//!
//! A drawer is a panel that slides between a closed position (at or past a
//! container edge) and an open position inside the container. Toggling is
//! always reversible mid-flight: a toggle redirects the running tween from
//! the panel's current interpolated position instead of queueing a second
//! animation.
//!
//! ```text
//!            toggle                 tick (done)
//!   Closed ──────────▶ Opening ─────────────────▶ Open
//!     ▲                 │   ▲                      │
//!     │          toggle │   │ toggle        toggle │
//!     │                 ▼   │                      │
//!     └───────────────  Closing ◀──────────────────┘
//!        tick (done)
//! ```
//!
//! Two layouts exist: the menu drawer slides horizontally in from the right
//! edge, the queue drawer slides vertically up from above the control bar.

use crate::easing::Easing;
use crate::geometry::{Point, Size};
use crate::tween::{scaled_duration, TweenController};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Drawer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawerPhase {
    /// At rest on the closed target, hidden
    #[default]
    Closed,

    /// Tweening toward the open target
    Opening,

    /// At rest on the open target
    Open,

    /// Tweening toward the closed target
    Closing,
}

impl DrawerPhase {
    /// Check if a tween is expected to be in flight
    pub fn is_moving(&self) -> bool {
        matches!(self, DrawerPhase::Opening | DrawerPhase::Closing)
    }

    /// Phase the drawer comes to rest in from this phase
    pub fn settled(&self) -> DrawerPhase {
        match self {
            DrawerPhase::Closed | DrawerPhase::Closing => DrawerPhase::Closed,
            DrawerPhase::Open | DrawerPhase::Opening => DrawerPhase::Open,
        }
    }
}

/// Which edge a drawer slides from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerLayout {
    /// Side panel sliding along x, closed just past the right edge
    ///
    /// Open at `width - extent`, closed at `width`; the margin only offsets y.
    Menu,

    /// Bottom panel sliding along y, stacked above the transport controls
    Queue,
}

impl DrawerLayout {
    /// Open and closed targets for `container`
    ///
    /// Coordinates below zero are clamped to zero when the container is too
    /// small for the drawer; the third value reports whether that happened.
    pub fn targets(
        &self,
        settings: &DrawerSettings,
        container: Size,
        control_bar: f32,
    ) -> (Point, Point, bool) {
        let extent = settings.travel_extent;
        let margin = settings.margin;

        let (open, closed) = match self {
            DrawerLayout::Menu => {
                let y = margin;
                (
                    Point::new(container.width - extent, y),
                    Point::new(container.width, y),
                )
            }
            DrawerLayout::Queue => {
                let x = margin;
                let closed_y = container.height - control_bar.max(0.0);
                (Point::new(x, closed_y - extent), Point::new(x, closed_y))
            }
        };

        let clamped = open.x < 0.0 || open.y < 0.0 || closed.x < 0.0 || closed.y < 0.0;
        (clamp_to_origin(open), clamp_to_origin(closed), clamped)
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            DrawerLayout::Menu => "menu",
            DrawerLayout::Queue => "queue",
        }
    }
}

fn clamp_to_origin(point: Point) -> Point {
    Point::new(point.x.max(0.0), point.y.max(0.0))
}

/// Drawer geometry and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerSettings {
    /// Distance of a full open/close traversal
    pub travel_extent: f32,

    /// Gap kept between the panel and the container edge it does not slide from
    #[serde(default = "default_margin")]
    pub margin: f32,

    /// Duration of a full traversal in milliseconds
    #[serde(default = "default_base_duration_ms")]
    pub base_duration_ms: u32,

    /// Floor for any scaled duration in milliseconds
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u32,

    /// Curve used for every tween of this drawer
    #[serde(default)]
    pub easing: Easing,
}

fn default_margin() -> f32 {
    10.0
}

fn default_base_duration_ms() -> u32 {
    1000
}

fn default_min_duration_ms() -> u32 {
    60
}

impl DrawerSettings {
    /// Settings for a drawer with the given travel extent and shared defaults
    pub fn with_extent(travel_extent: f32) -> Self {
        Self {
            travel_extent,
            margin: default_margin(),
            base_duration_ms: default_base_duration_ms(),
            min_duration_ms: default_min_duration_ms(),
            easing: Easing::default(),
        }
    }

    /// Side menu defaults: 350 wide
    pub fn menu() -> Self {
        Self::with_extent(350.0)
    }

    /// Queue panel defaults: 240 tall, quicker full traversal
    pub fn queue() -> Self {
        Self {
            base_duration_ms: 750,
            ..Self::with_extent(240.0)
        }
    }

    /// Full traversal duration
    pub fn base_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.base_duration_ms))
    }

    /// Minimum tween duration
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.min_duration_ms))
    }

    /// Duration for travelling `remaining` units
    pub fn duration_for(&self, remaining: f32) -> Duration {
        scaled_duration(
            remaining,
            self.travel_extent,
            self.base_duration(),
            self.min_duration(),
        )
    }
}

/// Changes produced by one drawer operation
///
/// The coordinator forwards each present field to the rendering
/// collaborator. At most one position is reported per operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawerUpdate {
    /// New panel position
    pub position: Option<Point>,

    /// New panel visibility
    pub visibility: Option<bool>,

    /// New phase
    pub phase: Option<DrawerPhase>,
}

impl DrawerUpdate {
    /// Check if nothing changed
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.visibility.is_none() && self.phase.is_none()
    }
}

/// One sliding drawer
#[derive(Debug, Clone)]
pub struct DrawerController {
    layout: DrawerLayout,
    settings: DrawerSettings,

    /// Last known container size
    container: Size,

    /// Height of the transport controls (queue drawer only)
    control_bar: f32,

    phase: DrawerPhase,

    /// Whether the panel is shown; closed panels stay mounted but hidden
    visible: bool,

    open_target: Point,
    closed_target: Point,

    tween: TweenController,
}

impl DrawerController {
    /// Create a closed, hidden drawer resting on its closed target
    pub fn new(layout: DrawerLayout, settings: DrawerSettings, container: Size) -> Self {
        let (open_target, closed_target, _) = layout.targets(&settings, container, 0.0);

        Self {
            layout,
            settings,
            container,
            control_bar: 0.0,
            phase: DrawerPhase::Closed,
            visible: false,
            open_target,
            closed_target,
            tween: TweenController::new(closed_target),
        }
    }

    /// Reverse the drawer's direction
    ///
    /// Closed/Closing → Opening, Open/Opening → Closing. The tween restarts
    /// from the current interpolated position with a duration scaled to the
    /// distance left.
    pub fn toggle(&mut self) -> DrawerUpdate {
        let (next, target) = match self.phase {
            DrawerPhase::Closed | DrawerPhase::Closing => (DrawerPhase::Opening, self.open_target),
            DrawerPhase::Open | DrawerPhase::Opening => (DrawerPhase::Closing, self.closed_target),
        };

        let mut update = DrawerUpdate::default();
        let from = self.tween.position();

        if next == DrawerPhase::Opening && !self.visible {
            self.visible = true;
            update.visibility = Some(true);
            update.position = Some(from);
        }

        let duration = self.settings.duration_for(from.distance(target));
        self.set_phase(next, &mut update);

        if !self.tween.start(from, target, duration, self.settings.easing) {
            self.tween.jump_to(target);
            update.position = Some(target);
            self.settle(&mut update);
        }

        update
    }

    /// Advance the running tween by `elapsed`
    ///
    /// On completion the phase collapses to Open or Closed; a closed drawer
    /// is hidden.
    pub fn on_animation_tick(&mut self, elapsed: Duration) -> DrawerUpdate {
        let mut update = DrawerUpdate::default();
        if !self.tween.is_running() {
            return update;
        }

        let step = self.tween.advance(elapsed);
        update.position = Some(step.position);
        trace!(
            drawer = self.layout.name(),
            x = step.position.x,
            y = step.position.y,
            "Drawer tick"
        );

        if step.finished {
            self.settle(&mut update);
        }
        update
    }

    /// Recompute targets for a new container size
    ///
    /// A drawer at rest snaps to the target of its phase. A moving drawer
    /// keeps its phase and continues from its current position toward the
    /// relocated target.
    pub fn on_container_resize(&mut self, container: Size) -> DrawerUpdate {
        self.container = container;
        self.retarget()
    }

    /// Update the transport controls' height
    ///
    /// Only the queue drawer's targets depend on it.
    pub fn set_control_bar_offset(&mut self, offset: f32) -> DrawerUpdate {
        let offset = offset.max(0.0);
        if (offset - self.control_bar).abs() < f32::EPSILON {
            return DrawerUpdate::default();
        }
        self.control_bar = offset;
        self.retarget()
    }

    /// Stop a moving drawer where it is
    ///
    /// The phase settles on the side the drawer was heading to. No-op when
    /// the drawer is at rest.
    pub fn cancel(&mut self) -> DrawerUpdate {
        let mut update = DrawerUpdate::default();
        if !self.tween.is_running() {
            return update;
        }

        self.tween.cancel();
        self.settle(&mut update);
        update
    }

    /// Current phase
    pub fn phase(&self) -> DrawerPhase {
        self.phase
    }

    /// Current (interpolated) position
    pub fn position(&self) -> Point {
        self.tween.position()
    }

    /// Where the drawer is heading, or resting
    pub fn target(&self) -> Point {
        match self.phase {
            DrawerPhase::Open | DrawerPhase::Opening => self.open_target,
            DrawerPhase::Closed | DrawerPhase::Closing => self.closed_target,
        }
    }

    /// Check if a tween is in flight
    pub fn is_animating(&self) -> bool {
        self.tween.is_running()
    }

    /// Check if the panel is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open_target(&self) -> Point {
        self.open_target
    }

    pub fn closed_target(&self) -> Point {
        self.closed_target
    }

    pub fn layout(&self) -> DrawerLayout {
        self.layout
    }

    pub fn settings(&self) -> &DrawerSettings {
        &self.settings
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn control_bar_offset(&self) -> f32 {
        self.control_bar
    }

    /// Duration of the current (or last) tween
    pub fn tween_duration(&self) -> Duration {
        self.tween.duration()
    }

    fn retarget(&mut self) -> DrawerUpdate {
        let (open, closed, clamped) =
            self.layout
                .targets(&self.settings, self.container, self.control_bar);
        if clamped {
            debug!(
                drawer = self.layout.name(),
                width = self.container.width,
                height = self.container.height,
                "Container smaller than drawer, clamping targets"
            );
        }
        self.open_target = open;
        self.closed_target = closed;

        let mut update = DrawerUpdate::default();
        let target = self.target();

        if self.tween.is_running() {
            let from = self.tween.position();
            let duration = self.settings.duration_for(from.distance(target));
            if !self.tween.start(from, target, duration, self.settings.easing) {
                self.tween.jump_to(target);
                update.position = Some(target);
                self.settle(&mut update);
            }
        } else if self.tween.position() != target {
            self.tween.jump_to(target);
            update.position = Some(target);
        }

        update
    }

    fn settle(&mut self, update: &mut DrawerUpdate) {
        let settled = self.phase.settled();
        self.set_phase(settled, update);

        if settled == DrawerPhase::Closed && self.visible {
            self.visible = false;
            update.visibility = Some(false);
        }
    }

    fn set_phase(&mut self, phase: DrawerPhase, update: &mut DrawerUpdate) {
        if self.phase != phase {
            debug!(
                drawer = self.layout.name(),
                from = ?self.phase,
                to = ?phase,
                "Drawer phase changed"
            );
            self.phase = phase;
            update.phase = Some(phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn linear_menu() -> DrawerController {
        let settings = DrawerSettings {
            travel_extent: 350.0,
            margin: 10.0,
            base_duration_ms: 750,
            min_duration_ms: 60,
            easing: Easing::Linear,
        };
        DrawerController::new(DrawerLayout::Menu, settings, Size::new(1280.0, 720.0))
    }

    #[test]
    fn test_menu_targets() {
        let drawer = linear_menu();
        assert_eq!(drawer.open_target(), Point::new(930.0, 10.0));
        assert_eq!(drawer.closed_target(), Point::new(1280.0, 10.0));
        assert_eq!(drawer.position(), drawer.closed_target());
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert!(!drawer.is_visible());
    }

    #[test]
    fn test_queue_targets_follow_control_bar() {
        let mut drawer = DrawerController::new(
            DrawerLayout::Queue,
            DrawerSettings::queue(),
            Size::new(1280.0, 720.0),
        );
        assert_eq!(drawer.closed_target(), Point::new(10.0, 720.0));
        assert_eq!(drawer.open_target(), Point::new(10.0, 480.0));

        let update = drawer.set_control_bar_offset(60.0);
        assert_eq!(drawer.closed_target(), Point::new(10.0, 660.0));
        assert_eq!(drawer.open_target(), Point::new(10.0, 420.0));
        assert_eq!(update.position, Some(Point::new(10.0, 660.0)));

        // Same offset again changes nothing
        assert!(drawer.set_control_bar_offset(60.0).is_empty());
    }

    #[test]
    fn test_toggle_from_closed_opens_and_shows() {
        let mut drawer = linear_menu();
        let update = drawer.toggle();

        assert_eq!(update.phase, Some(DrawerPhase::Opening));
        assert_eq!(update.visibility, Some(true));
        assert_eq!(update.position, Some(Point::new(1280.0, 10.0)));
        assert!(drawer.is_animating());
        assert_eq!(drawer.tween_duration(), ms(750));
    }

    #[test]
    fn test_full_open_then_close_hides() {
        let mut drawer = linear_menu();
        drawer.toggle();

        let update = drawer.on_animation_tick(ms(750));
        assert_eq!(update.phase, Some(DrawerPhase::Open));
        assert_eq!(update.position, Some(Point::new(930.0, 10.0)));
        assert!(!drawer.is_animating());
        assert!(drawer.is_visible());

        drawer.toggle();
        assert_eq!(drawer.phase(), DrawerPhase::Closing);
        assert!(drawer.is_visible());

        let update = drawer.on_animation_tick(ms(750));
        assert_eq!(update.phase, Some(DrawerPhase::Closed));
        assert_eq!(update.visibility, Some(false));
        assert!(!drawer.is_visible());
    }

    #[test]
    fn test_reverse_midway_uses_current_position() {
        let mut drawer = linear_menu();
        drawer.toggle();
        drawer.on_animation_tick(ms(375));

        let midway = drawer.position();
        assert!((midway.x - 1105.0).abs() < 0.01);

        let update = drawer.toggle();
        assert_eq!(update.phase, Some(DrawerPhase::Closing));
        assert!(update.position.is_none(), "reversal must not jump");
        assert_eq!(drawer.position(), midway);

        let duration = drawer.tween_duration();
        assert!(duration >= ms(374) && duration <= ms(376), "got {duration:?}");

        drawer.on_animation_tick(duration);
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert_eq!(drawer.position(), drawer.closed_target());
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut drawer = linear_menu();
        assert!(drawer.cancel().is_empty());
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
    }

    #[test]
    fn test_cancel_mid_flight_settles() {
        let mut drawer = linear_menu();
        drawer.toggle();
        drawer.on_animation_tick(ms(100));
        let here = drawer.position();

        let update = drawer.cancel();
        assert_eq!(update.phase, Some(DrawerPhase::Open));
        assert_eq!(drawer.position(), here);
        assert!(!drawer.is_animating());
    }

    #[test]
    fn test_resize_at_rest_snaps() {
        let mut drawer = linear_menu();
        drawer.toggle();
        drawer.on_animation_tick(ms(750));

        let update = drawer.on_container_resize(Size::new(1600.0, 900.0));
        assert_eq!(update.position, Some(Point::new(1250.0, 10.0)));
        assert_eq!(drawer.phase(), DrawerPhase::Open);
    }

    #[test]
    fn test_huge_resize_mid_flight_keeps_full_traversal_time() {
        let mut drawer = linear_menu();
        drawer.toggle();
        drawer.on_animation_tick(ms(100));

        drawer.on_container_resize(Size::new(1.0e30, 720.0));
        assert_eq!(drawer.phase(), DrawerPhase::Opening);
        assert_eq!(drawer.tween_duration(), ms(750));

        drawer.on_animation_tick(ms(750));
        assert_eq!(drawer.phase(), DrawerPhase::Open);
        assert_eq!(drawer.position(), drawer.open_target());
    }

    #[test]
    fn test_tiny_container_clamps_to_zero() {
        let mut drawer = linear_menu();
        drawer.on_container_resize(Size::new(200.0, 100.0));
        assert_eq!(drawer.open_target(), Point::new(0.0, 10.0));
        assert_eq!(drawer.closed_target(), Point::new(200.0, 10.0));
    }

    #[test]
    fn test_zero_length_move_jumps() {
        // Open and closed targets coincide and the floor is zero
        let mut drawer = DrawerController::new(
            DrawerLayout::Menu,
            DrawerSettings {
                travel_extent: 0.0,
                min_duration_ms: 0,
                ..DrawerSettings::menu()
            },
            Size::new(1280.0, 720.0),
        );
        let update = drawer.toggle();
        assert_eq!(update.phase, Some(DrawerPhase::Open));
        assert!(!drawer.is_animating());
    }

    #[test]
    fn test_phase_helpers() {
        assert!(DrawerPhase::Opening.is_moving());
        assert!(!DrawerPhase::Open.is_moving());
        assert_eq!(DrawerPhase::Closing.settled(), DrawerPhase::Closed);
        assert_eq!(DrawerPhase::Opening.settled(), DrawerPhase::Open);
    }
}
