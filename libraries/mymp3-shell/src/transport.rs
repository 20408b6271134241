//! Transport model: volume and playback position
//!
//! The multimedia collaborator owns decoding and the real clock. The shell
//! only mirrors what it reports and turns control-bar input into requests.

use std::time::Duration;

/// Volume control
///
/// Linear 0-100 slider mapped straight to an output level.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume control, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Output level for the multimedia collaborator
    ///
    /// Returns 0.0 if muted, otherwise level / 100
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Last transport report from the multimedia collaborator
#[derive(Debug, Clone, Default)]
pub struct Transport {
    position: Duration,
    duration: Duration,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position/duration report
    ///
    /// A position past the end is clamped to the duration.
    pub fn report(&mut self, position: Duration, duration: Duration) {
        self.duration = duration;
        self.position = position.min(duration);
    }

    /// Clamp a seek target to the current media
    ///
    /// Returns the position actually requested.
    pub fn seek(&mut self, target: Duration) -> Duration {
        let clamped = target.min(self.duration);
        self.position = clamped;
        clamped
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Playback progress (0.0 to 1.0), 0.0 when nothing is loaded
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }
}
