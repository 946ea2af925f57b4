// SPDX-License-Identifier: MPL-2.0
//! Canonical collection of active notifications.
//!
//! The `NotificationStore` owns the de-duplicated list of notifications,
//! resolves the most urgent one, and schedules auto-dismiss for success
//! notifications. It knows nothing about how notifications are displayed.
//!
//! Items are shared as `Rc<NotificationItem>` so that presentation code can
//! hold on to the same item without copying it.

use crate::domain::notification::{
    most_severe, AddOptions, CorrelationKey, NotificationId, NotificationItem, Severity,
};
use crate::domain::timing::DismissDelay;
use crate::scheduler::TimerTable;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, trace};

/// What happened to the collection during an `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// Id of the new notification.
    pub id: NotificationId,
    /// Id of the notification it replaced, if the slot was occupied.
    pub replaced: Option<NotificationId>,
}

/// De-duplicated, insertion-ordered notification collection.
#[derive(Debug, Default)]
pub struct NotificationStore {
    items: Vec<Rc<NotificationItem>>,
    dismiss_timers: TimerTable<CorrelationKey, NotificationId>,
    dismiss_delay: DismissDelay,
}

impl NotificationStore {
    /// Creates an empty store with the default dismiss delay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with a custom success dismiss delay.
    #[must_use]
    pub fn with_dismiss_delay(dismiss_delay: DismissDelay) -> Self {
        Self {
            dismiss_delay,
            ..Self::default()
        }
    }

    /// Adds a notification to `slot`, replacing whatever the slot held.
    pub fn add(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        slot: impl Into<String>,
        options: AddOptions,
        now: Instant,
    ) -> Added {
        let id = NotificationId::new();
        let key = CorrelationKey::slot(slot);

        let replaced = self.remove_key(&key);
        if let Some(old) = replaced {
            debug!(%key, old = %old, new = %id, "replacing notification");
        }

        self.insert(id, key, severity, message.into(), options, now);
        Added { id, replaced }
    }

    /// Adds a notification that never replaces, and is never replaced by,
    /// another notification for the same slot.
    pub fn add_unique(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        slot: impl Into<String>,
        options: AddOptions,
        now: Instant,
    ) -> Added {
        let id = NotificationId::new();
        let key = CorrelationKey::unique(slot, id);
        self.insert(id, key, severity, message.into(), options, now);
        Added { id, replaced: None }
    }

    fn insert(
        &mut self,
        id: NotificationId,
        key: CorrelationKey,
        severity: Severity,
        message: String,
        options: AddOptions,
        now: Instant,
    ) {
        if severity == Severity::Success && options.auto_dismiss {
            self.dismiss_timers.schedule_after(
                key.clone(),
                now,
                self.dismiss_delay.as_duration(),
                id,
            );
        } else {
            // A replaced success item may have left a timer on this slot.
            self.dismiss_timers.cancel(&key);
        }

        debug!(%id, %key, %severity, persistent = options.persistent, "notification added");
        self.items.push(Rc::new(NotificationItem::new(
            id,
            key,
            severity,
            message,
            now,
            options.persistent,
        )));
    }

    /// Convenience for `add(Severity::Error, ..)` with default options.
    pub fn error(&mut self, message: impl Into<String>, slot: impl Into<String>, now: Instant) -> Added {
        self.add(Severity::Error, message, slot, AddOptions::default(), now)
    }

    /// Convenience for `add(Severity::Warning, ..)` with default options.
    pub fn warning(&mut self, message: impl Into<String>, slot: impl Into<String>, now: Instant) -> Added {
        self.add(Severity::Warning, message, slot, AddOptions::default(), now)
    }

    /// Convenience for `add(Severity::Info, ..)` with default options.
    pub fn info(&mut self, message: impl Into<String>, slot: impl Into<String>, now: Instant) -> Added {
        self.add(Severity::Info, message, slot, AddOptions::default(), now)
    }

    /// Convenience for `add(Severity::Success, ..)` with default options.
    pub fn success(&mut self, message: impl Into<String>, slot: impl Into<String>, now: Instant) -> Added {
        self.add(Severity::Success, message, slot, AddOptions::default(), now)
    }

    /// Removes the notification occupying `slot` (unique entries are not affected).
    ///
    /// Returns the removed id; unknown slots are a no-op.
    pub fn remove(&mut self, slot: &str) -> Option<NotificationId> {
        self.remove_key(&CorrelationKey::slot(slot))
    }

    /// Removes the notification with exactly this key.
    pub fn remove_key(&mut self, key: &CorrelationKey) -> Option<NotificationId> {
        let position = self.items.iter().position(|item| item.key() == key)?;
        let item = self.items.remove(position);
        self.dismiss_timers.cancel(key);
        trace!(id = %item.id(), %key, "notification removed");
        Some(item.id())
    }

    /// Removes the notification with this id. Unknown ids are a no-op.
    pub fn remove_by_id(&mut self, id: NotificationId) -> bool {
        let Some(position) = self.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        let item = self.items.remove(position);
        // Only cancel the slot's timer if it still belongs to this item.
        if self.dismiss_timers.cancel_where(|key, owner| key == item.key() && *owner == id) > 0 {
            trace!(%id, "auto-dismiss cancelled");
        }
        trace!(%id, key = %item.key(), "notification removed");
        true
    }

    /// Removes every notification and cancels every pending timer.
    ///
    /// Returns the number of notifications removed.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        let timers = self.dismiss_timers.clear();
        self.items.clear();
        if count > 0 || timers > 0 {
            debug!(count, timers, "store cleared");
        }
        count
    }

    /// Fires every auto-dismiss timer due at `now`.
    ///
    /// Returns the ids that were actually removed. A timer whose item has
    /// already gone is dropped silently.
    pub fn expire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        while let Some(id) = self.pop_due_dismissal(now) {
            if self.remove_by_id(id) {
                debug!(%id, "success notification auto-dismissed");
                expired.push(id);
            }
        }
        expired
    }

    /// Pops the next due auto-dismiss timer without acting on it.
    pub(crate) fn pop_due_dismissal(&mut self, now: Instant) -> Option<NotificationId> {
        self.dismiss_timers.pop_due(now).map(|(_, id)| id)
    }

    /// Returns the most urgent notification, or `None` if the store is empty.
    ///
    /// Ties on severity go to the earliest created notification.
    #[must_use]
    pub fn most_severe(&self) -> Option<&NotificationItem> {
        most_severe(&self.items).map(|item| &**item)
    }

    /// Returns true if at least one notification is present.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the notifications in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Rc<NotificationItem>] {
        &self.items
    }

    /// Returns the notification with this id.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Rc<NotificationItem>> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns true if a notification with this id is present.
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the earliest pending auto-dismiss deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dismiss_timers.next_deadline()
    }

    /// Returns the number of pending auto-dismiss timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.dismiss_timers.len()
    }
}
