// SPDX-License-Identifier: MPL-2.0
//! Collapse/expand transition math.
//!
//! Everything here is a pure function of elapsed time, so transitions can be
//! tested without a frame clock. A collapse runs in two phases: until
//! [`MESSAGE_PHASE_END`] the message fades and slides out, after that only
//! the severity icon is rendered and grows to full size. An expand plays the
//! same curve backwards.

use std::time::{Duration, Instant};

/// Progress at which the message is fully hidden and only the icon remains.
pub const MESSAGE_PHASE_END: f32 = 0.7;

/// Linear progress of a transition, clamped to `[0, 1]`.
///
/// A zero-length transition is always complete.
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Cubic ease-out on `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// What the host should draw for an item at a given point of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// The message is (partly) visible.
    Message {
        /// Message opacity, 1.0 fully opaque.
        opacity: f32,
        /// Slide-out offset as a fraction of the item width.
        offset: f32,
    },
    /// The message is hidden; only the severity icon is drawn.
    IconOnly {
        /// Icon scale, 1.0 at rest.
        icon_scale: f32,
    },
}

impl Phase {
    /// Phase of a fully expanded item.
    pub const EXPANDED: Phase = Phase::Message {
        opacity: 1.0,
        offset: 0.0,
    };

    /// Phase of a fully collapsed item.
    pub const COLLAPSED: Phase = Phase::IconOnly { icon_scale: 1.0 };

    /// Phase of a collapse at progress `p`.
    #[must_use]
    pub fn collapse_at(p: f32) -> Self {
        let p = p.clamp(0.0, 1.0);
        if p < MESSAGE_PHASE_END {
            let eased = ease_out_cubic(p / MESSAGE_PHASE_END);
            Phase::Message {
                opacity: 1.0 - eased,
                offset: eased,
            }
        } else {
            Phase::IconOnly {
                icon_scale: ease_out_cubic((p - MESSAGE_PHASE_END) / (1.0 - MESSAGE_PHASE_END)),
            }
        }
    }

    /// Phase of an expand at progress `p` (the collapse curve reversed).
    #[must_use]
    pub fn expand_at(p: f32) -> Self {
        Self::collapse_at(1.0 - p.clamp(0.0, 1.0))
    }

    /// Returns true if any part of the message is drawn.
    #[must_use]
    pub fn shows_message(&self) -> bool {
        matches!(self, Phase::Message { .. })
    }
}

/// Direction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Message to icon.
    Collapse,
    /// Icon to message.
    Expand,
}

/// A running transition, advanced once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    direction: Direction,
    started_at: Instant,
    duration: Duration,
    progress: f32,
}

impl Transition {
    /// Starts a transition at `now`, with zero progress.
    #[must_use]
    pub fn start(direction: Direction, now: Instant, duration: Duration) -> Self {
        Self {
            direction,
            started_at: now,
            duration,
            progress: 0.0,
        }
    }

    /// Recomputes progress for a frame rendered at `now` and returns it.
    ///
    /// Progress never moves backwards, even if frames arrive out of order.
    pub fn update(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.progress = self.progress.max(progress(elapsed, self.duration));
        self.progress
    }

    /// Returns the last computed progress.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Returns the total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the transition direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true once progress has reached 1.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Returns the visual phase for the current progress.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.direction {
            Direction::Collapse => Phase::collapse_at(self.progress),
            Direction::Expand => Phase::expand_at(self.progress),
        }
    }
}
