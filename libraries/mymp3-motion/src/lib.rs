//! MyMP3 - Motion
//!
//! Toolkit-independent animation state for the MyMP3 shell.
//!
//! This crate provides:
//! - Easing curves (linear, cubic, sine, quadratic)
//! - An interruptible 2-D tween driven by explicit elapsed-time ticks
//! - Distance-proportional durations so a reversed animation keeps its speed
//! - Sliding drawer state machines for the side menu and the queue panel
//!
//! # Architecture
//!
//! `mymp3-motion` owns no clock and no widgets:
//! - The host advances every tween with the time since its last frame
//! - Drawers report position, visibility and phase changes as values
//! - Rendering is left to whoever consumes those values
//!
//! # Example
//!
//! ```rust
//! use mymp3_motion::{DrawerController, DrawerLayout, DrawerPhase, DrawerSettings, Size};
//! use std::time::Duration;
//!
//! let mut menu = DrawerController::new(
//!     DrawerLayout::Menu,
//!     DrawerSettings::menu(),
//!     Size::new(1280.0, 720.0),
//! );
//!
//! let update = menu.toggle();
//! assert_eq!(update.phase, Some(DrawerPhase::Opening));
//! assert_eq!(update.visibility, Some(true));
//!
//! // Run the full traversal
//! menu.on_animation_tick(Duration::from_millis(1000));
//! assert_eq!(menu.phase(), DrawerPhase::Open);
//! assert_eq!(menu.position(), menu.open_target());
//! ```

mod drawer;
mod easing;
mod geometry;
mod tween;

// Public exports
pub use drawer::{DrawerController, DrawerLayout, DrawerPhase, DrawerSettings, DrawerUpdate};
pub use easing::Easing;
pub use geometry::{Point, Size};
pub use tween::{scaled_duration, TweenController, TweenState, TweenStep};
