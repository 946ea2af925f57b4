// SPDX-License-Identifier: MPL-2.0
//! Per-item presentation state.

use crate::animation::{Direction, Phase, Transition};
use crate::domain::notification::{NotificationId, NotificationItem};
use std::rc::Rc;
use std::time::Instant;

/// Display state of a notification handled by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemState {
    /// Fully rendered, possibly waiting for its collapse timer.
    Visible,
    /// Animating from message to icon.
    Collapsing(Transition),
    /// Represented only through the aggregate severity icon.
    CollapsedIcon,
    /// Animating from icon back to message.
    Expanding(Transition),
}

impl ItemState {
    /// Returns the state without its transition data.
    #[must_use]
    pub fn kind(&self) -> StateKind {
        match self {
            ItemState::Visible => StateKind::Visible,
            ItemState::Collapsing(_) => StateKind::Collapsing,
            ItemState::CollapsedIcon => StateKind::CollapsedIcon,
            ItemState::Expanding(_) => StateKind::Expanding,
        }
    }

    /// Returns the visual phase the host should render.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            ItemState::Visible => Phase::EXPANDED,
            ItemState::CollapsedIcon => Phase::COLLAPSED,
            ItemState::Collapsing(transition) | ItemState::Expanding(transition) => {
                transition.phase()
            }
        }
    }

    /// Returns the progress of the running transition, if any.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        match self {
            ItemState::Collapsing(transition) | ItemState::Expanding(transition) => {
                Some(transition.progress())
            }
            ItemState::Visible | ItemState::CollapsedIcon => None,
        }
    }
}

/// Fieldless mirror of [`ItemState`], convenient for assertions and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// See [`ItemState::Visible`].
    Visible,
    /// See [`ItemState::Collapsing`].
    Collapsing,
    /// See [`ItemState::CollapsedIcon`].
    CollapsedIcon,
    /// See [`ItemState::Expanding`].
    Expanding,
}

/// A notification in the visible set together with its display state.
#[derive(Debug, Clone)]
pub struct VisibleEntry {
    pub(crate) item: Rc<NotificationItem>,
    pub(crate) state: ItemState,
}

impl VisibleEntry {
    pub(crate) fn new(item: Rc<NotificationItem>) -> Self {
        Self {
            item,
            state: ItemState::Visible,
        }
    }

    pub(crate) fn expanding(item: Rc<NotificationItem>, transition: Transition) -> Self {
        Self {
            item,
            state: ItemState::Expanding(transition),
        }
    }

    /// Returns the notification.
    #[must_use]
    pub fn item(&self) -> &NotificationItem {
        &self.item
    }

    /// Returns the notification's id.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.item.id()
    }

    /// Returns the display state.
    #[must_use]
    pub fn state(&self) -> ItemState {
        self.state
    }

    /// Returns the visual phase the host should render.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }
}

/// Returns the opposite transition, continuing from the same visual phase.
pub(crate) fn reverse(transition: &Transition, now: Instant) -> Transition {
    let direction = match transition.direction() {
        Direction::Collapse => Direction::Expand,
        Direction::Expand => Direction::Collapse,
    };
    let duration = transition.duration();
    let head_start = duration.mul_f32(1.0 - transition.progress());
    let started = now.checked_sub(head_start).unwrap_or(now);
    let mut reversed = Transition::start(direction, started, duration);
    reversed.update(now);
    reversed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::time::Duration;

    #[test]
    fn rest_states_have_fixed_phases() {
        assert_eq!(ItemState::Visible.phase(), Phase::EXPANDED);
        assert_eq!(ItemState::CollapsedIcon.phase(), Phase::COLLAPSED);
        assert!(ItemState::Visible.progress().is_none());
    }

    #[test]
    fn reversing_keeps_the_visual_phase() {
        let start = Instant::now();
        let duration = Duration::from_millis(400);
        let mut collapse = Transition::start(Direction::Collapse, start, duration);
        let now = start + Duration::from_millis(100);
        collapse.update(now);

        let expand = reverse(&collapse, now);
        assert_eq!(expand.direction(), Direction::Expand);
        assert_abs_diff_eq!(expand.progress(), 0.75, epsilon = 1e-3);
        assert!(expand.phase().shows_message());
    }
}
