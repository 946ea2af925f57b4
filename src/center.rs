// SPDX-License-Identifier: MPL-2.0
//! Single entry point tying the store, the presentation controller, the
//! clock and the event log together.
//!
//! The host calls the mutation and interaction methods from its event loop,
//! then [`NotificationCenter::advance`] when [`NotificationCenter::next_deadline`]
//! passes and [`NotificationCenter::frame`] once per rendered frame while
//! [`NotificationCenter::is_animating`] is true. Every store mutation is
//! mirrored into the controller before the call returns.

use crate::config::Config;
use crate::diagnostics::{BufferCapacity, EventLog, LifecycleEventKind, RemovalReason};
use crate::domain::notification::{
    AddOptions, CorrelationKey, NotificationId, NotificationItem, Severity,
};
use crate::domain::timing::EngineConfig;
use crate::presentation::{PresentationController, VisibleEntry};
use crate::scheduler::{Clock, SystemClock};
use crate::store::{Added, NotificationStore};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info};

/// Notification engine façade.
#[derive(Debug)]
pub struct NotificationCenter<C: Clock = SystemClock> {
    clock: C,
    store: NotificationStore,
    controller: PresentationController,
    log: EventLog,
    shut_down: bool,
}

impl NotificationCenter<SystemClock> {
    /// Creates an engine on the system clock.
    #[must_use]
    pub fn system(config: EngineConfig) -> Self {
        Self::new(config, SystemClock)
    }
}

impl<C: Clock> NotificationCenter<C> {
    /// Creates an engine with the default event log size.
    #[must_use]
    pub fn new(config: EngineConfig, clock: C) -> Self {
        Self::with_log_capacity(config, BufferCapacity::default(), clock)
    }

    /// Creates an engine from persisted settings.
    #[must_use]
    pub fn from_config(config: &Config, clock: C) -> Self {
        Self::with_log_capacity(config.engine(), config.event_log_capacity(), clock)
    }

    /// Creates an engine with a custom event log size.
    #[must_use]
    pub fn with_log_capacity(config: EngineConfig, capacity: BufferCapacity, clock: C) -> Self {
        let config = config.normalized();
        let now = clock.now();
        Self {
            clock,
            store: NotificationStore::with_dismiss_delay(config.dismiss_delay),
            controller: PresentationController::new(config).with_events(),
            log: EventLog::new(capacity, now),
            shut_down: false,
        }
    }

    /// Returns the current time on the engine's clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Returns the engine's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn sync(&mut self, now: Instant) {
        self.controller.sync(self.store.items(), now);
        self.flush_controller_events(now);
    }

    fn flush_controller_events(&mut self, now: Instant) {
        for event in self.controller.drain_events() {
            if let Some(kind) = LifecycleEventKind::from_controller(event) {
                self.log.record(kind, now);
            }
        }
    }

    fn record_added(&mut self, added: &Added, now: Instant) {
        if let Some(old) = added.replaced {
            self.log
                .record(LifecycleEventKind::removed(old, RemovalReason::Replaced), now);
        }
        if let Some(item) = self.store.get(added.id) {
            let kind = LifecycleEventKind::added(
                item.id(),
                item.severity(),
                item.key().slot_name(),
                item.key().is_unique(),
            );
            self.log.record(kind, now);
        }
    }

    // =========================================================================
    // Store mutations
    // =========================================================================

    /// Adds a notification to `slot`, replacing whatever the slot held.
    pub fn add(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        slot: impl Into<String>,
        options: AddOptions,
    ) -> Added {
        let now = self.clock.now();
        let added = self.store.add(severity, message, slot, options, now);
        self.record_added(&added, now);
        self.sync(now);
        added
    }

    /// Adds a notification that accumulates alongside others for `slot`.
    pub fn add_unique(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        slot: impl Into<String>,
        options: AddOptions,
    ) -> Added {
        let now = self.clock.now();
        let added = self.store.add_unique(severity, message, slot, options, now);
        self.record_added(&added, now);
        self.sync(now);
        added
    }

    /// Adds an error to `slot`.
    pub fn error(&mut self, message: impl Into<String>, slot: impl Into<String>) -> Added {
        self.add(Severity::Error, message, slot, AddOptions::default())
    }

    /// Adds a warning to `slot`.
    pub fn warning(&mut self, message: impl Into<String>, slot: impl Into<String>) -> Added {
        self.add(Severity::Warning, message, slot, AddOptions::default())
    }

    /// Adds an info message to `slot`.
    pub fn info(&mut self, message: impl Into<String>, slot: impl Into<String>) -> Added {
        self.add(Severity::Info, message, slot, AddOptions::default())
    }

    /// Adds a success message to `slot`; it dismisses itself after the configured delay.
    pub fn success(&mut self, message: impl Into<String>, slot: impl Into<String>) -> Added {
        self.add(Severity::Success, message, slot, AddOptions::default())
    }

    fn after_removal(&mut self, removed: Option<NotificationId>, now: Instant) {
        if let Some(id) = removed {
            self.log
                .record(LifecycleEventKind::removed(id, RemovalReason::Removed), now);
            self.sync(now);
        }
    }

    /// Removes the notification in `slot`. Unknown slots are a no-op.
    pub fn remove(&mut self, slot: &str) -> Option<NotificationId> {
        let now = self.clock.now();
        let removed = self.store.remove(slot);
        self.after_removal(removed, now);
        removed
    }

    /// Removes the notification with exactly this key.
    pub fn remove_key(&mut self, key: &CorrelationKey) -> Option<NotificationId> {
        let now = self.clock.now();
        let removed = self.store.remove_key(key);
        self.after_removal(removed, now);
        removed
    }

    /// Removes the notification with this id. Unknown ids are a no-op.
    pub fn remove_by_id(&mut self, id: NotificationId) -> bool {
        let now = self.clock.now();
        let removed = self.store.remove_by_id(id);
        self.after_removal(removed.then_some(id), now);
        removed
    }

    /// Removes every notification, cancelling all their timers and frames.
    pub fn clear(&mut self) -> usize {
        let now = self.clock.now();
        let ids: Vec<NotificationId> = self.store.items().iter().map(|item| item.id()).collect();
        let count = self.store.clear();
        for id in ids {
            self.log
                .record(LifecycleEventKind::removed(id, RemovalReason::Cleared), now);
        }
        // Suppression window and interaction pause go too, not just per-item state.
        self.controller.reset();
        self.flush_controller_events(now);
        count
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Fires every store and controller timer that is due, earliest first.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        loop {
            let store_due = self.store.next_deadline().filter(|at| *at <= now);
            let controller_due = self.controller.next_deadline().filter(|at| *at <= now);
            match (store_due, controller_due) {
                (None, None) => break,
                (Some(store_at), Some(controller_at)) if controller_at < store_at => {
                    self.controller.fire_next(now);
                    self.flush_controller_events(now);
                }
                (Some(_), _) => {
                    if let Some(id) = self.store.pop_due_dismissal(now) {
                        if self.store.remove_by_id(id) {
                            debug!(%id, "success notification auto-dismissed");
                            self.log.record(
                                LifecycleEventKind::removed(id, RemovalReason::Dismissed),
                                now,
                            );
                            self.sync(now);
                        }
                    }
                }
                (None, Some(_)) => {
                    self.controller.fire_next(now);
                    self.flush_controller_events(now);
                }
            }
            fired += 1;
        }
        fired
    }

    /// Services pending animation frames. Returns the number serviced.
    pub fn frame(&mut self) -> usize {
        let now = self.clock.now();
        let serviced = self.controller.frame(now);
        self.flush_controller_events(now);
        serviced
    }

    /// Fires due timers, then services frames.
    pub fn tick(&mut self) -> (usize, usize) {
        let fired = self.advance();
        let serviced = self.frame();
        (fired, serviced)
    }

    /// Returns the earliest deadline across the store and the controller.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.store.next_deadline(), self.controller.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Returns true if a transition is waiting for its next frame.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Expands every collapsed notification. Returns false if none was collapsed.
    pub fn on_expand_requested(&mut self) -> bool {
        let now = self.clock.now();
        let expanded = self.controller.on_expand_requested(now);
        self.flush_controller_events(now);
        expanded
    }

    /// The pointer left the aggregate icon.
    pub fn on_collapse_icon_hover_end(&mut self) -> bool {
        let now = self.clock.now();
        let restarted = self.controller.on_collapse_icon_hover_end(now);
        self.flush_controller_events(now);
        restarted
    }

    /// The pointer entered a notification.
    pub fn on_notification_hover_start(&mut self) {
        let now = self.clock.now();
        self.controller.on_notification_hover_start();
        self.flush_controller_events(now);
    }

    /// The pointer left a notification.
    pub fn on_notification_hover_end(&mut self) {
        let now = self.clock.now();
        self.controller
            .on_notification_hover_end(self.store.items(), now);
        self.flush_controller_events(now);
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Cancels every timer and frame request and drops every notification.
    ///
    /// Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        let now = self.clock.now();
        let timers = self.pending_timers();
        let frames = self.pending_frames();
        self.store.clear();
        self.controller.reset();
        self.controller.drain_events();
        self.log
            .record(LifecycleEventKind::Shutdown { timers, frames }, now);
        self.shut_down = true;
        info!(timers, frames, "notification engine shut down");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Returns the presentation controller.
    #[must_use]
    pub fn controller(&self) -> &PresentationController {
        &self.controller
    }

    /// Returns all notifications in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Rc<NotificationItem>] {
        self.store.items()
    }

    /// Returns the visible set.
    #[must_use]
    pub fn visible(&self) -> &[VisibleEntry] {
        self.controller.visible()
    }

    /// Returns the collapsed set.
    #[must_use]
    pub fn collapsed(&self) -> &[Rc<NotificationItem>] {
        self.controller.collapsed()
    }

    /// Returns the most urgent notification in the store.
    #[must_use]
    pub fn most_severe(&self) -> Option<&NotificationItem> {
        self.store.most_severe()
    }

    /// Returns the most urgent collapsed notification.
    #[must_use]
    pub fn most_severe_collapsed(&self) -> Option<&NotificationItem> {
        self.controller.most_severe_collapsed()
    }

    /// Returns true if the store holds anything.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.store.has_any()
    }

    /// Returns the number of pending timers across store and controller.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.store.pending_timers() + self.controller.pending_timers()
    }

    /// Returns the number of outstanding frame requests.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.controller.pending_frames()
    }

    /// Returns the lifecycle event log.
    #[must_use]
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }
}

impl<C: Clock> Drop for NotificationCenter<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::LifecycleEventKind as Kind;
    use crate::presentation::StateKind;
    use crate::scheduler::ManualClock;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_secs(5);
    const ANIMATION: Duration = Duration::from_millis(400);

    fn center() -> (NotificationCenter<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (NotificationCenter::new(EngineConfig::default(), clock.clone()), clock)
    }

    #[test]
    fn add_is_mirrored_into_visible_set() {
        let (mut center, _clock) = center();
        let added = center.warning("check email", "email");

        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].id(), added.id);
        assert_eq!(center.pending_timers(), 1);
    }

    #[test]
    fn replacing_drops_old_item_everywhere() {
        let (mut center, _clock) = center();
        let first = center.error("bad", "form");
        let second = center.info("fixed", "form");

        assert_eq!(second.replaced, Some(first.id));
        assert_eq!(center.items().len(), 1);
        assert_eq!(center.visible().len(), 1);
        assert!(center.controller().state_of(first.id).is_none());
    }

    #[test]
    fn success_dismissal_and_collapse_fire_in_deadline_order() {
        let (mut center, clock) = center();
        let ok = center.success("saved", "save");
        let warn = center.warning("slow", "net");

        clock.advance(Duration::from_secs(3));
        assert_eq!(center.advance(), 1);
        assert!(!center.store().contains(ok.id));
        assert!(center.controller().state_of(ok.id).is_none());

        clock.advance(Duration::from_secs(2));
        center.advance();
        assert_eq!(
            center.controller().kind_of(warn.id),
            Some(StateKind::Collapsing)
        );
    }

    #[test]
    fn tick_runs_collapse_to_completion() {
        let (mut center, clock) = center();
        let added = center.info("hello", "greeting");

        clock.advance(DELAY);
        assert_eq!(center.tick(), (1, 1));
        assert!(center.is_animating());

        clock.advance(ANIMATION);
        center.tick();
        assert_eq!(center.collapsed().len(), 1);
        assert_eq!(center.most_severe_collapsed().map(NotificationItem::id), Some(added.id));
        assert!(!center.is_animating());
    }

    #[test]
    fn next_deadline_is_earliest_of_both_tables() {
        let (mut center, clock) = center();
        let start = clock.now();
        center.info("a", "a");
        center.success("b", "b");
        assert_eq!(center.next_deadline(), Some(start + Duration::from_secs(3)));
    }

    #[test]
    fn remove_mid_collapse_leaves_no_frame() {
        let (mut center, clock) = center();
        let added = center.info("going", "slot");
        clock.advance(DELAY);
        center.tick();

        assert_eq!(center.remove("slot"), Some(added.id));
        assert_eq!(center.pending_frames(), 0);
        clock.advance(ANIMATION);
        assert_eq!(center.frame(), 0);
    }

    #[test]
    fn unknown_removals_are_noops() {
        let (mut center, _clock) = center();
        let before = center.event_log().len();
        assert_eq!(center.remove("missing"), None);
        assert!(!center.remove_by_id(NotificationId::new()));
        assert_eq!(center.event_log().len(), before);
    }

    #[test]
    fn clear_cancels_everything() {
        let (mut center, clock) = center();
        center.info("a", "a");
        center.success("b", "b");
        clock.advance(DELAY);
        center.tick();

        assert_eq!(center.clear(), 1);
        assert_eq!(center.pending_timers(), 0);
        assert_eq!(center.pending_frames(), 0);
        assert!(center.visible().is_empty());
    }

    #[test]
    fn shutdown_is_idempotent_and_logged_once() {
        let (mut center, _clock) = center();
        center.warning("w", "w");
        center.shutdown();
        center.shutdown();

        assert_eq!(center.pending_timers(), 0);
        let shutdowns = center
            .event_log()
            .kinds()
            .into_iter()
            .filter(|kind| matches!(kind, Kind::Shutdown { .. }))
            .count();
        assert_eq!(shutdowns, 1);
    }

    #[test]
    fn event_log_tells_the_story() {
        let (mut center, clock) = center();
        let added = center.info("hi", "slot");
        clock.advance(DELAY);
        center.tick();
        clock.advance(ANIMATION);
        center.tick();
        center.on_expand_requested();

        let names: Vec<_> = center
            .event_log()
            .kinds()
            .iter()
            .map(|kind| kind.type_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "added",
                "shown",
                "collapse_started",
                "collapsed",
                "expand_started",
                "suppression_started"
            ]
        );
        assert_eq!(
            center.event_log().kinds()[0],
            &Kind::added(added.id, Severity::Info, "slot", false)
        );
    }

    #[test]
    fn clear_ends_suppression_window() {
        let (mut center, clock) = center();
        center.info("a", "a");
        clock.advance(DELAY);
        center.tick();
        clock.advance(ANIMATION);
        center.tick();
        center.on_expand_requested();
        assert!(center.controller().is_hover_suppressed());

        center.clear();
        assert!(!center.controller().is_hover_suppressed());
        assert_eq!(center.pending_timers(), 0);

        clock.advance(Duration::from_secs(10));
        assert_eq!(center.advance(), 0);
    }

    #[test]
    fn clear_ends_interaction_pause() {
        let (mut center, clock) = center();
        center.info("a", "a");
        center.on_notification_hover_start();

        center.clear();
        assert!(!center.controller().is_interacting());

        let fresh = center.info("b", "b");
        assert!(center.controller().has_collapse_timer(fresh.id));
        clock.advance(DELAY);
        center.tick();
        assert_eq!(
            center.controller().kind_of(fresh.id),
            Some(StateKind::Collapsing)
        );
    }

    #[test]
    fn from_config_applies_settings() {
        let mut config = Config::default();
        config.timing.collapse_delay_ms = Some(1_000);
        config.behavior.event_log_capacity = Some(32);
        let clock = ManualClock::new();
        let start = clock.now();

        let mut center = NotificationCenter::from_config(&config, clock);
        center.info("x", "x");
        assert_eq!(center.next_deadline(), Some(start + Duration::from_secs(1)));
        assert_eq!(center.event_log().capacity(), 32);
    }
}
