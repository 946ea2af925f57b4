// SPDX-License-Identifier: MPL-2.0
//! Pure layout decision for the host.
//!
//! The engine never measures anything. The host measures its notification
//! area and asks [`decide`] how to arrange what the controller reports.

/// Width below which notifications are shown one at a time.
pub const COMPACT_WIDTH: f32 = 360.0;

/// Height below which notifications are shown one at a time.
pub const COMPACT_HEIGHT: f32 = 120.0;

/// Height reserved for one stacked notification.
pub const ROW_HEIGHT: f32 = 56.0;

/// How the visible set should be arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDecision {
    /// Notifications stacked vertically.
    Stacked {
        /// How many rows fit.
        rows: usize,
    },
    /// Only the most recent notification is shown.
    Compact,
}

impl LayoutDecision {
    /// Returns how many visible notifications the host should render.
    #[must_use]
    pub fn max_visible(self) -> usize {
        match self {
            LayoutDecision::Stacked { rows } => rows.max(1),
            LayoutDecision::Compact => 1,
        }
    }
}

/// Chooses a layout for an area of `width` x `height` logical pixels.
///
/// Non-finite or negative sizes are treated as zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // floored, non-negative
pub fn decide(width: f32, height: f32) -> LayoutDecision {
    let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    let (width, height) = (sanitize(width), sanitize(height));

    if width < COMPACT_WIDTH || height < COMPACT_HEIGHT {
        return LayoutDecision::Compact;
    }
    LayoutDecision::Stacked {
        rows: (height / ROW_HEIGHT).floor() as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_area_is_compact() {
        assert_eq!(decide(200.0, 800.0), LayoutDecision::Compact);
        assert_eq!(decide(800.0, 60.0), LayoutDecision::Compact);
    }

    #[test]
    fn roomy_area_stacks_by_row_height() {
        assert_eq!(decide(800.0, 300.0), LayoutDecision::Stacked { rows: 5 });
        assert_eq!(decide(800.0, 300.0).max_visible(), 5);
    }

    #[test]
    fn garbage_sizes_are_compact() {
        assert_eq!(decide(f32::NAN, 500.0), LayoutDecision::Compact);
        assert_eq!(decide(-10.0, f32::INFINITY), LayoutDecision::Compact);
        assert_eq!(LayoutDecision::Compact.max_visible(), 1);
    }
}
