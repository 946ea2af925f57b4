// SPDX-License-Identifier: MPL-2.0
//! Standalone mode for a single externally supplied message.
//!
//! There is no store and no partitioning: the host sets the content and a
//! `show` flag, and the same collapse/expand machinery as multi mode runs
//! on that one item.

use super::controller::PresentationController;
use super::state::ItemState;
use crate::animation::Phase;
use crate::domain::notification::{
    CorrelationKey, NotificationId, NotificationItem, Severity, GLOBAL_SLOT,
};
use crate::domain::timing::EngineConfig;
use std::rc::Rc;
use std::time::Instant;
use tracing::debug;

/// One message with a show/hide flag and auto-collapse.
#[derive(Debug)]
pub struct SingleNotification {
    controller: PresentationController,
    severity: Severity,
    message: String,
    current: Option<Rc<NotificationItem>>,
}

impl SingleNotification {
    /// Creates a hidden notification with empty content.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            controller: PresentationController::new(config),
            severity: Severity::default(),
            message: String::new(),
            current: None,
        }
    }

    fn build(&self, id: NotificationId, now: Instant) -> Rc<NotificationItem> {
        Rc::new(NotificationItem::new(
            id,
            CorrelationKey::slot(GLOBAL_SLOT),
            self.severity,
            self.message.clone(),
            now,
            false,
        ))
    }

    /// Shows or hides the notification.
    ///
    /// Showing a hidden notification always starts over: fully expanded,
    /// with a fresh collapse timer. Setting the flag it already has is a no-op.
    pub fn set_show(&mut self, show: bool, now: Instant) {
        match (show, self.current.is_some()) {
            (true, false) => {
                let item = self.build(NotificationId::new(), now);
                self.controller.reset();
                self.controller.sync(std::slice::from_ref(&item), now);
                debug!(id = %item.id(), "single notification shown");
                self.current = Some(item);
            }
            (false, true) => {
                self.controller.reset();
                self.current = None;
                debug!("single notification hidden");
            }
            _ => {}
        }
    }

    /// Replaces the content without restarting the timer or the transition.
    pub fn set_content(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        self.severity = severity;
        self.message = message.into();
        if let Some(id) = self.current.as_ref().map(|item| item.id()) {
            let item = self.build(id, now);
            self.controller.refresh(&item);
            self.current = Some(item);
        }
    }

    /// Expands the message again if it is collapsed.
    pub fn on_expand_requested(&mut self, now: Instant) -> bool {
        self.controller.on_expand_requested(now)
    }

    /// Fires due timers.
    pub fn advance(&mut self, now: Instant) -> usize {
        self.controller.fire_due(now)
    }

    /// Services pending frame requests.
    pub fn frame(&mut self, now: Instant) -> usize {
        self.controller.frame(now)
    }

    /// Returns the display state, or `None` while hidden.
    #[must_use]
    pub fn state(&self) -> Option<ItemState> {
        let id = self.current.as_ref()?.id();
        self.controller.state_of(id)
    }

    /// Returns the visual phase, or `None` while hidden.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.state().map(|state| state.phase())
    }

    /// Returns true while shown (collapsed counts as shown).
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the current severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the current message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.controller.pending_timers()
    }

    /// Returns the number of outstanding frame requests.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.controller.pending_frames()
    }
}

impl Drop for SingleNotification {
    fn drop(&mut self) {
        self.controller.reset();
    }
}
