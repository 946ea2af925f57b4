// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event types recorded by the event log.
//!
//! Events carry notification ids and severities but never message text, so
//! an exported log can be attached to a bug report as-is.

use std::time::Instant;

use serde::Serialize;

use crate::domain::notification::{NotificationId, Severity};
use crate::presentation::ControllerEvent;

/// Why a notification left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// A newer notification took its correlation slot.
    Replaced,
    /// Removed explicitly by slot, key or id.
    Removed,
    /// Its auto-dismiss timer fired.
    Dismissed,
    /// Removed by `clear` or shutdown.
    Cleared,
}

/// A lifecycle event with its capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleEvent {
    /// When the event occurred, on the engine's clock.
    pub timestamp: Instant,
    /// The type and data of the event.
    pub kind: LifecycleEventKind,
}

impl LifecycleEvent {
    /// Creates an event stamped with `timestamp`.
    #[must_use]
    pub fn new(kind: LifecycleEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// Everything the engine records about a notification's life.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEventKind {
    /// A notification entered the store.
    Added {
        /// Notification id.
        id: u64,
        /// Severity name.
        severity: &'static str,
        /// Correlation slot.
        slot: String,
        /// Whether the notification accumulates instead of replacing.
        unique: bool,
    },
    /// A notification left the store.
    Removed {
        /// Notification id.
        id: u64,
        /// Why it left.
        reason: RemovalReason,
    },
    /// A notification entered the visible set.
    Shown {
        /// Notification id.
        id: u64,
    },
    /// A collapse transition started.
    CollapseStarted {
        /// Notification id.
        id: u64,
    },
    /// Pointer interaction interrupted a collapse.
    CollapseCancelled {
        /// Notification id.
        id: u64,
    },
    /// A notification moved to the collapsed set.
    Collapsed {
        /// Notification id.
        id: u64,
    },
    /// An expand transition started.
    ExpandStarted {
        /// Notification id.
        id: u64,
    },
    /// An expand transition finished.
    Expanded {
        /// Notification id.
        id: u64,
    },
    /// The hover-suppression window opened or restarted.
    SuppressionStarted,
    /// The hover-suppression window elapsed.
    SuppressionEnded,
    /// The pointer entered a notification.
    InteractionStarted,
    /// The pointer left a notification.
    InteractionEnded,
    /// The engine was torn down.
    Shutdown {
        /// Timers cancelled by the teardown.
        timers: usize,
        /// Frame requests cancelled by the teardown.
        frames: usize,
    },
}

impl LifecycleEventKind {
    /// Builds an `Added` event.
    #[must_use]
    pub fn added(id: NotificationId, severity: Severity, slot: &str, unique: bool) -> Self {
        Self::Added {
            id: id.value(),
            severity: severity.as_str(),
            slot: slot.to_string(),
            unique,
        }
    }

    /// Builds a `Removed` event.
    #[must_use]
    pub fn removed(id: NotificationId, reason: RemovalReason) -> Self {
        Self::Removed {
            id: id.value(),
            reason,
        }
    }

    /// Maps a controller event to a log entry.
    ///
    /// Frame ticks and drops are not logged; drops always follow a `Removed`.
    #[must_use]
    pub fn from_controller(event: ControllerEvent) -> Option<Self> {
        let kind = match event {
            ControllerEvent::Shown(id) => Self::Shown { id: id.value() },
            ControllerEvent::CollapseStarted(id) => Self::CollapseStarted { id: id.value() },
            ControllerEvent::CollapseCancelled(id) => Self::CollapseCancelled { id: id.value() },
            ControllerEvent::Collapsed(id) => Self::Collapsed { id: id.value() },
            ControllerEvent::ExpandStarted(id) => Self::ExpandStarted { id: id.value() },
            ControllerEvent::Expanded(id) => Self::Expanded { id: id.value() },
            ControllerEvent::SuppressionStarted => Self::SuppressionStarted,
            ControllerEvent::SuppressionEnded => Self::SuppressionEnded,
            ControllerEvent::InteractionStarted => Self::InteractionStarted,
            ControllerEvent::InteractionEnded => Self::InteractionEnded,
            ControllerEvent::Dropped(_) | ControllerEvent::Frame { .. } => return None,
        };
        Some(kind)
    }

    /// Returns the `type` tag this event serializes with.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Removed { .. } => "removed",
            Self::Shown { .. } => "shown",
            Self::CollapseStarted { .. } => "collapse_started",
            Self::CollapseCancelled { .. } => "collapse_cancelled",
            Self::Collapsed { .. } => "collapsed",
            Self::ExpandStarted { .. } => "expand_started",
            Self::Expanded { .. } => "expanded",
            Self::SuppressionStarted => "suppression_started",
            Self::SuppressionEnded => "suppression_ended",
            Self::InteractionStarted => "interaction_started",
            Self::InteractionEnded => "interaction_ended",
            Self::Shutdown { .. } => "shutdown",
        }
    }
}
