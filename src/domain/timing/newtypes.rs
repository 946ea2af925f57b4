// SPDX-License-Identifier: MPL-2.0
//! Timing newtypes.
//!
//! This module provides type-safe wrappers for the engine's delays,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Bounds
// =============================================================================

/// Per-item collapse delay bounds (0.5 s to 60 s).
pub mod collapse_bounds {
    /// Minimum delay in milliseconds.
    pub const MIN_MS: u64 = 500;
    /// Maximum delay in milliseconds.
    pub const MAX_MS: u64 = 60_000;
    /// Default delay in milliseconds.
    pub const DEFAULT_MS: u64 = 5_000;
}

/// Hover-suppression window bounds (1 s to 120 s).
pub mod hover_bounds {
    /// Minimum window in milliseconds.
    pub const MIN_MS: u64 = 1_000;
    /// Maximum window in milliseconds.
    pub const MAX_MS: u64 = 120_000;
    /// Default window in milliseconds.
    pub const DEFAULT_MS: u64 = 8_000;
}

/// Success auto-dismiss delay bounds (0.5 s to 60 s).
pub mod dismiss_bounds {
    /// Minimum delay in milliseconds.
    pub const MIN_MS: u64 = 500;
    /// Maximum delay in milliseconds.
    pub const MAX_MS: u64 = 60_000;
    /// Default delay in milliseconds.
    pub const DEFAULT_MS: u64 = 3_000;
}

/// Collapse/expand animation duration bounds (instant to 5 s).
pub mod animation_bounds {
    /// Minimum duration in milliseconds (zero disables the animation).
    pub const MIN_MS: u64 = 0;
    /// Maximum duration in milliseconds.
    pub const MAX_MS: u64 = 5_000;
    /// Default duration in milliseconds.
    pub const DEFAULT_MS: u64 = 400;
}

// =============================================================================
// CollapseDelay
// =============================================================================

/// Time a visible notification stays expanded before collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollapseDelay(u64);

impl CollapseDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(collapse_bounds::MIN_MS, collapse_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for CollapseDelay {
    fn default() -> Self {
        Self(collapse_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// HoverSuppression
// =============================================================================

/// Window during which automatic collapse is disabled after an expand request.
///
/// Always strictly longer than the collapse delay it is paired with, see
/// [`HoverSuppression::longer_than`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HoverSuppression(u64);

impl HoverSuppression {
    /// Creates a new window, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(hover_bounds::MIN_MS, hover_bounds::MAX_MS))
    }

    /// Stretches the window so it outlasts `delay`.
    #[must_use]
    pub fn longer_than(self, delay: CollapseDelay) -> Self {
        if self.0 > delay.as_millis() {
            self
        } else {
            Self(delay.as_millis() + hover_bounds::MIN_MS)
        }
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for HoverSuppression {
    fn default() -> Self {
        Self(hover_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// DismissDelay
// =============================================================================

/// Time after which a success notification removes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DismissDelay(u64);

impl DismissDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(dismiss_bounds::MIN_MS, dismiss_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DismissDelay {
    fn default() -> Self {
        Self(dismiss_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// AnimationDuration
// =============================================================================

/// Length of one collapse or expand transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnimationDuration(u64);

impl AnimationDuration {
    /// Creates a new duration, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(animation_bounds::MIN_MS, animation_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the duration as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if transitions complete on their first frame.
    #[must_use]
    pub fn is_instant(self) -> bool {
        self.0 == 0
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self(animation_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_delay_clamps() {
        assert_eq!(CollapseDelay::from_millis(0).as_millis(), collapse_bounds::MIN_MS);
        assert_eq!(
            CollapseDelay::from_millis(u64::MAX).as_millis(),
            collapse_bounds::MAX_MS
        );
        assert_eq!(CollapseDelay::from_millis(2_000).as_millis(), 2_000);
    }

    #[test]
    fn defaults_match_bounds() {
        assert_eq!(CollapseDelay::default().as_millis(), collapse_bounds::DEFAULT_MS);
        assert_eq!(HoverSuppression::default().as_millis(), hover_bounds::DEFAULT_MS);
        assert_eq!(DismissDelay::default().as_millis(), dismiss_bounds::DEFAULT_MS);
        assert_eq!(
            AnimationDuration::default().as_millis(),
            animation_bounds::DEFAULT_MS
        );
    }

    #[test]
    fn default_hover_window_outlasts_default_collapse_delay() {
        assert!(HoverSuppression::default().as_duration() > CollapseDelay::default().as_duration());
    }

    #[test]
    fn hover_window_is_stretched_past_collapse_delay() {
        let delay = CollapseDelay::from_millis(10_000);
        let hover = HoverSuppression::from_millis(4_000).longer_than(delay);
        assert!(hover.as_millis() > delay.as_millis());

        let already_longer = HoverSuppression::from_millis(20_000);
        assert_eq!(already_longer.longer_than(delay), already_longer);
    }

    #[test]
    fn zero_animation_is_instant() {
        assert!(AnimationDuration::from_millis(0).is_instant());
        assert!(!AnimationDuration::default().is_instant());
        assert_eq!(
            AnimationDuration::from_millis(60_000).as_millis(),
            animation_bounds::MAX_MS
        );
    }
}
