// SPDX-License-Identifier: MPL-2.0
//! Visible/collapsed partitioning, per-item collapse timers, hover
//! suppression and frame-driven transitions.
//!
//! The controller never owns notifications. It mirrors the store through
//! [`PresentationController::sync`] and keeps shared references to the same
//! items. Every timer fire and every frame re-checks that its item is still
//! tracked before touching it.

use super::state::{reverse, ItemState, StateKind, VisibleEntry};
use crate::animation::{Direction, Transition};
use crate::domain::notification::{most_severe, NotificationId, NotificationItem};
use crate::domain::timing::EngineConfig;
use crate::scheduler::{FrameRequests, TimerTable};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, trace};

/// Timer slots owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    /// Auto-collapse countdown for one visible item.
    Collapse(NotificationId),
    /// The single hover-suppression window.
    HoverSuppression,
}

/// Something the controller did, reported to whoever keeps a log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// A notification entered the visible set.
    Shown(NotificationId),
    /// A notification left the store and was dropped from both sets.
    Dropped(NotificationId),
    /// A collapse transition started.
    CollapseStarted(NotificationId),
    /// A collapse transition was interrupted by pointer interaction.
    CollapseCancelled(NotificationId),
    /// A notification moved to the collapsed set.
    Collapsed(NotificationId),
    /// An expand transition started.
    ExpandStarted(NotificationId),
    /// An expand transition finished.
    Expanded(NotificationId),
    /// A frame advanced a transition.
    Frame {
        /// The animated notification.
        id: NotificationId,
        /// Progress after the frame.
        progress: f32,
    },
    /// The hover-suppression window started or was restarted.
    SuppressionStarted,
    /// The hover-suppression window elapsed.
    SuppressionEnded,
    /// The pointer entered an individual notification.
    InteractionStarted,
    /// The pointer left an individual notification.
    InteractionEnded,
}

/// Drives the display state of the store's notifications.
#[derive(Debug)]
pub struct PresentationController {
    config: EngineConfig,
    visible: Vec<VisibleEntry>,
    collapsed: Vec<Rc<NotificationItem>>,
    timers: TimerTable<Slot>,
    frames: FrameRequests<NotificationId>,
    interacting: bool,
    events: Option<Vec<ControllerEvent>>,
}

impl Default for PresentationController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PresentationController {
    /// Creates an empty controller.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: config.normalized(),
            visible: Vec::new(),
            collapsed: Vec::new(),
            timers: TimerTable::new(),
            frames: FrameRequests::new(),
            interacting: false,
            events: None,
        }
    }

    /// Starts recording [`ControllerEvent`]s for [`Self::drain_events`].
    #[must_use]
    pub fn with_events(mut self) -> Self {
        self.events = Some(Vec::new());
        self
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn emit(&mut self, event: ControllerEvent) {
        if let Some(events) = self.events.as_mut() {
            events.push(event);
        }
    }

    /// Takes the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        self.events.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn collapsible(&self, item: &NotificationItem) -> bool {
        self.config.auto_collapse && !item.is_persistent()
    }

    fn arm_collapse(&mut self, id: NotificationId, now: Instant) {
        self.timers
            .schedule_after(Slot::Collapse(id), now, self.config.collapse_delay.as_duration(), ());
    }

    fn is_suppressed(&self) -> bool {
        self.timers.contains(&Slot::HoverSuppression)
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.visible.iter().position(|entry| entry.id() == id)
    }

    // =========================================================================
    // Store mirroring
    // =========================================================================

    /// Reconciles both sets with the store's current items.
    ///
    /// Items no longer present are dropped together with their timer and
    /// frame request. New items enter the visible set and, when collapsible,
    /// get a fresh collapse timer. Existing items keep their state.
    pub fn sync(&mut self, items: &[Rc<NotificationItem>], now: Instant) {
        let present = |id: NotificationId| items.iter().any(|item| item.id() == id);

        let dropped: Vec<NotificationId> = self
            .visible
            .iter()
            .map(VisibleEntry::id)
            .chain(self.collapsed.iter().map(|item| item.id()))
            .filter(|id| !present(*id))
            .collect();
        for id in dropped {
            self.drop_item(id);
        }

        for item in items {
            let id = item.id();
            if self.tracks(id) {
                continue;
            }
            self.visible.push(VisibleEntry::new(Rc::clone(item)));
            if self.collapsible(item) && !self.interacting {
                self.arm_collapse(id, now);
            }
            trace!(%id, "notification shown");
            self.emit(ControllerEvent::Shown(id));
        }
    }

    fn drop_item(&mut self, id: NotificationId) {
        self.timers.cancel(&Slot::Collapse(id));
        self.frames.cancel(&id);
        self.visible.retain(|entry| entry.id() != id);
        self.collapsed.retain(|item| item.id() != id);
        trace!(%id, "notification dropped");
        self.emit(ControllerEvent::Dropped(id));
    }

    /// Swaps in an updated item that keeps the same id, preserving its state.
    pub(crate) fn refresh(&mut self, item: &Rc<NotificationItem>) {
        let id = item.id();
        if let Some(entry) = self.visible.iter_mut().find(|entry| entry.id() == id) {
            entry.item = Rc::clone(item);
        } else if let Some(slot) = self.collapsed.iter_mut().find(|held| held.id() == id) {
            *slot = Rc::clone(item);
        }
    }

    /// Drops everything and cancels every timer and frame request.
    pub fn reset(&mut self) {
        let timers = self.timers.clear();
        let frames = self.frames.clear();
        let ids: Vec<NotificationId> = self
            .visible
            .iter()
            .map(VisibleEntry::id)
            .chain(self.collapsed.iter().map(|item| item.id()))
            .collect();
        self.visible.clear();
        self.collapsed.clear();
        self.interacting = false;
        for id in ids {
            self.emit(ControllerEvent::Dropped(id));
        }
        if timers > 0 || frames > 0 {
            debug!(timers, frames, "presentation reset");
        }
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Returns the earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Fires the earliest timer due at `now`. Returns false if none was due.
    pub fn fire_next(&mut self, now: Instant) -> bool {
        let Some((slot, ())) = self.timers.pop_due(now) else {
            return false;
        };
        match slot {
            Slot::Collapse(id) => self.on_collapse_timer(id, now),
            Slot::HoverSuppression => self.on_suppression_elapsed(now),
        }
        true
    }

    /// Fires every timer due at `now`, returning how many fired.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while self.fire_next(now) {
            fired += 1;
        }
        fired
    }

    fn on_collapse_timer(&mut self, id: NotificationId, now: Instant) {
        if self.is_suppressed() || self.interacting {
            trace!(%id, "collapse suppressed");
            return;
        }
        self.begin_collapse(id, now);
    }

    fn on_suppression_elapsed(&mut self, now: Instant) {
        debug!("hover suppression elapsed");
        self.emit(ControllerEvent::SuppressionEnded);
        if self.interacting {
            return;
        }
        let due: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|entry| self.collapsible(&entry.item))
            .map(VisibleEntry::id)
            .collect();
        for id in due {
            self.begin_collapse(id, now);
        }
    }

    fn begin_collapse(&mut self, id: NotificationId, now: Instant) {
        let Some(index) = self.position(id) else {
            return;
        };
        let next = match self.visible[index].state {
            ItemState::Visible => {
                Transition::start(Direction::Collapse, now, self.config.animation.as_duration())
            }
            ItemState::Expanding(transition) => reverse(&transition, now),
            ItemState::Collapsing(_) | ItemState::CollapsedIcon => return,
        };
        self.visible[index].state = ItemState::Collapsing(next);
        self.timers.cancel(&Slot::Collapse(id));
        self.frames.request(id);
        debug!(%id, "collapse started");
        self.emit(ControllerEvent::CollapseStarted(id));
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advances every transition that requested a frame.
    ///
    /// Returns the number of transitions serviced. Finished collapses move
    /// their item to the collapsed set; unfinished transitions request the
    /// next frame.
    pub fn frame(&mut self, now: Instant) -> usize {
        let requested = self.frames.take();
        let mut serviced = 0;
        for id in requested {
            let Some(index) = self.position(id) else {
                continue;
            };
            let entry = &mut self.visible[index];
            let (progress, complete) = match &mut entry.state {
                ItemState::Collapsing(transition) | ItemState::Expanding(transition) => {
                    let progress = transition.update(now);
                    (progress, transition.is_complete())
                }
                ItemState::Visible | ItemState::CollapsedIcon => continue,
            };
            serviced += 1;
            self.emit(ControllerEvent::Frame { id, progress });

            if !complete {
                self.frames.request(id);
                continue;
            }
            match self.visible[index].state {
                ItemState::Collapsing(_) => {
                    let entry = self.visible.remove(index);
                    self.collapsed.push(entry.item);
                    debug!(%id, "collapsed");
                    self.emit(ControllerEvent::Collapsed(id));
                }
                ItemState::Expanding(_) => {
                    self.visible[index].state = ItemState::Visible;
                    debug!(%id, "expanded");
                    self.emit(ControllerEvent::Expanded(id));
                }
                ItemState::Visible | ItemState::CollapsedIcon => {}
            }
        }
        serviced
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Expands every collapsed notification and opens the hover-suppression window.
    ///
    /// Returns false (and does nothing) when nothing is collapsed. While the
    /// pointer rests on a notification no window is opened.
    pub fn on_expand_requested(&mut self, now: Instant) -> bool {
        if self.collapsed.is_empty() {
            return false;
        }

        let cancelled = self
            .timers
            .cancel_where(|slot, _| matches!(slot, Slot::Collapse(_)));
        trace!(cancelled, "collapse timers cancelled for expand");

        // Items caught mid-collapse turn around from where they are.
        let turning: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|entry| matches!(entry.state, ItemState::Collapsing(_)))
            .map(VisibleEntry::id)
            .collect();
        for id in turning {
            if let Some(index) = self.position(id) {
                if let ItemState::Collapsing(transition) = self.visible[index].state {
                    self.visible[index].state = ItemState::Expanding(reverse(&transition, now));
                    self.emit(ControllerEvent::ExpandStarted(id));
                }
            }
        }

        let duration = self.config.animation.as_duration();
        for item in std::mem::take(&mut self.collapsed) {
            let id = item.id();
            self.visible.push(VisibleEntry::expanding(
                item,
                Transition::start(Direction::Expand, now, duration),
            ));
            self.frames.request(id);
            self.emit(ControllerEvent::ExpandStarted(id));
        }

        // The interaction pause owns the timers; hover end re-arms them.
        if !self.interacting {
            self.start_suppression(now);
        }
        true
    }

    fn start_suppression(&mut self, now: Instant) {
        self.timers.schedule_after(
            Slot::HoverSuppression,
            now,
            self.config.hover_suppression.as_duration(),
            (),
        );
        debug!("hover suppression started");
        self.emit(ControllerEvent::SuppressionStarted);
    }

    /// Restarts the hover-suppression window when the pointer leaves the icon.
    ///
    /// Does nothing unless a window is open.
    pub fn on_collapse_icon_hover_end(&mut self, now: Instant) -> bool {
        if !self.is_suppressed() {
            return false;
        }
        self.start_suppression(now);
        true
    }

    /// Pauses the whole pipeline while the pointer is over a notification.
    ///
    /// Cancels the hover-suppression window and every collapse timer, and
    /// snaps items that were collapsing back to fully visible.
    pub fn on_notification_hover_start(&mut self) {
        self.interacting = true;
        let cancelled = self.timers.clear();

        let interrupted: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|entry| matches!(entry.state, ItemState::Collapsing(_)))
            .map(VisibleEntry::id)
            .collect();
        for id in interrupted {
            if let Some(index) = self.position(id) {
                self.visible[index].state = ItemState::Visible;
            }
            self.frames.cancel(&id);
            self.emit(ControllerEvent::CollapseCancelled(id));
        }

        debug!(cancelled, "interaction started, timers paused");
        self.emit(ControllerEvent::InteractionStarted);
    }

    /// Resumes after interaction, restarting a full collapse delay for every
    /// collapsible notification still present in `items`.
    pub fn on_notification_hover_end(&mut self, items: &[Rc<NotificationItem>], now: Instant) {
        self.interacting = false;
        self.sync(items, now);

        let restart: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|entry| {
                matches!(entry.state, ItemState::Visible | ItemState::Expanding(_))
                    && self.collapsible(&entry.item)
            })
            .map(VisibleEntry::id)
            .collect();
        for id in &restart {
            self.arm_collapse(*id, now);
        }

        debug!(restarted = restart.len(), "interaction ended");
        self.emit(ControllerEvent::InteractionEnded);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    fn tracks(&self, id: NotificationId) -> bool {
        self.position(id).is_some() || self.collapsed.iter().any(|item| item.id() == id)
    }

    /// Returns the visible set, in display order.
    #[must_use]
    pub fn visible(&self) -> &[VisibleEntry] {
        &self.visible
    }

    /// Returns the collapsed set, in the order items collapsed.
    #[must_use]
    pub fn collapsed(&self) -> &[Rc<NotificationItem>] {
        &self.collapsed
    }

    /// Returns the item the aggregate icon should represent.
    #[must_use]
    pub fn most_severe_collapsed(&self) -> Option<&NotificationItem> {
        most_severe(&self.collapsed).map(|item| &**item)
    }

    /// Returns the state of a tracked notification.
    #[must_use]
    pub fn state_of(&self, id: NotificationId) -> Option<ItemState> {
        if let Some(index) = self.position(id) {
            return Some(self.visible[index].state);
        }
        self.collapsed
            .iter()
            .any(|item| item.id() == id)
            .then_some(ItemState::CollapsedIcon)
    }

    /// Returns the state kind of a tracked notification.
    #[must_use]
    pub fn kind_of(&self, id: NotificationId) -> Option<StateKind> {
        self.state_of(id).map(|state| state.kind())
    }

    /// Returns true while the hover-suppression window is open.
    #[must_use]
    pub fn is_hover_suppressed(&self) -> bool {
        self.is_suppressed()
    }

    /// Returns true while the pointer is over a notification.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Returns true if a collapse timer is pending for `id`.
    #[must_use]
    pub fn has_collapse_timer(&self, id: NotificationId) -> bool {
        self.timers.contains(&Slot::Collapse(id))
    }

    /// Returns true if `id` is waiting for an animation frame.
    #[must_use]
    pub fn has_frame_request(&self, id: NotificationId) -> bool {
        self.frames.is_pending(&id)
    }

    /// Returns true if any transition wants another frame.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns the number of outstanding frame requests.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{CorrelationKey, Severity};
    use crate::domain::timing::{AnimationDuration, CollapseDelay, HoverSuppression};
    use std::time::Duration;

    const DELAY: Duration = Duration::from_secs(5);
    const HOVER: Duration = Duration::from_secs(8);
    const ANIMATION: Duration = Duration::from_millis(400);

    fn config() -> EngineConfig {
        EngineConfig {
            collapse_delay: CollapseDelay::from_millis(5_000),
            hover_suppression: HoverSuppression::from_millis(8_000),
            animation: AnimationDuration::from_millis(400),
            ..EngineConfig::default()
        }
    }

    fn item(severity: Severity, persistent: bool, at: Instant) -> Rc<NotificationItem> {
        Rc::new(NotificationItem::new(
            NotificationId::new(),
            CorrelationKey::slot("field"),
            severity,
            "message",
            at,
            persistent,
        ))
    }

    /// Runs timers and then frames until the collapse has finished.
    fn collapse_all(controller: &mut PresentationController, start: Instant) -> Instant {
        let fired_at = start + DELAY;
        controller.fire_due(fired_at);
        controller.frame(fired_at);
        let done = fired_at + ANIMATION;
        controller.frame(done);
        done
    }

    #[test]
    fn sync_shows_new_items_and_arms_timers() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let items = vec![item(Severity::Info, false, start), item(Severity::Error, false, start)];

        controller.sync(&items, start);

        assert_eq!(controller.visible().len(), 2);
        assert!(controller.collapsed().is_empty());
        assert_eq!(controller.pending_timers(), 2);
        assert_eq!(controller.next_deadline(), Some(start + DELAY));
    }

    #[test]
    fn persistent_items_never_get_a_timer() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let pinned = item(Severity::Warning, true, start);
        controller.sync(std::slice::from_ref(&pinned), start);

        assert!(!controller.has_collapse_timer(pinned.id()));
        controller.fire_due(start + Duration::from_secs(600));
        assert_eq!(controller.kind_of(pinned.id()), Some(StateKind::Visible));
    }

    #[test]
    fn auto_collapse_off_keeps_items_visible() {
        let start = Instant::now();
        let mut controller = PresentationController::new(EngineConfig {
            auto_collapse: false,
            ..config()
        });
        controller.sync(&[item(Severity::Info, false, start)], start);
        assert_eq!(controller.pending_timers(), 0);
    }

    #[test]
    fn timer_starts_collapse_and_frames_finish_it() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let info = item(Severity::Info, false, start);
        let id = info.id();
        controller.sync(&[info], start);

        controller.fire_due(start + DELAY);
        assert_eq!(controller.kind_of(id), Some(StateKind::Collapsing));
        assert!(controller.has_frame_request(id));

        controller.frame(start + DELAY + ANIMATION / 2);
        assert_eq!(controller.kind_of(id), Some(StateKind::Collapsing));
        assert!(controller.has_frame_request(id));

        controller.frame(start + DELAY + ANIMATION);
        assert_eq!(controller.kind_of(id), Some(StateKind::CollapsedIcon));
        assert!(controller.visible().is_empty());
        assert_eq!(controller.collapsed().len(), 1);
        assert_eq!(controller.pending_frames(), 0);
        assert_eq!(controller.most_severe_collapsed().map(NotificationItem::id), Some(id));
    }

    #[test]
    fn most_severe_collapsed_uses_severity_ordering() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let info = item(Severity::Info, false, start);
        let warning = item(Severity::Warning, false, start + Duration::from_millis(1));
        let warning_id = warning.id();
        controller.sync(&[info, warning], start);

        collapse_all(&mut controller, start);
        assert_eq!(controller.collapsed().len(), 2);
        assert_eq!(
            controller.most_severe_collapsed().map(NotificationItem::id),
            Some(warning_id)
        );
    }

    #[test]
    fn expand_with_nothing_collapsed_is_noop() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        controller.sync(&[item(Severity::Info, false, start)], start);

        assert!(!controller.on_expand_requested(start));
        assert!(!controller.is_hover_suppressed());
        assert_eq!(controller.pending_timers(), 1);
    }

    #[test]
    fn expand_moves_whole_collapsed_set_and_suppresses_collapse() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let items = vec![item(Severity::Info, false, start), item(Severity::Error, false, start)];
        controller.sync(&items, start);
        let collapsed_at = collapse_all(&mut controller, start);
        assert_eq!(controller.collapsed().len(), 2);

        assert!(controller.on_expand_requested(collapsed_at));
        assert!(controller.collapsed().is_empty());
        assert_eq!(controller.visible().len(), 2);
        assert!(controller.is_hover_suppressed());
        // One suppression timer replaces the per-item timers.
        assert_eq!(controller.pending_timers(), 1);

        controller.frame(collapsed_at + ANIMATION);
        for entry in controller.visible() {
            assert_eq!(entry.state().kind(), StateKind::Visible);
        }

        // Nothing collapses before the suppression window elapses.
        controller.fire_due(collapsed_at + HOVER - Duration::from_millis(1));
        assert!(controller.visible().iter().all(|e| e.state().kind() == StateKind::Visible));

        controller.fire_due(collapsed_at + HOVER);
        assert!(controller
            .visible()
            .iter()
            .all(|e| e.state().kind() == StateKind::Collapsing));
    }

    #[test]
    fn item_timer_firing_during_suppression_is_ignored() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let first = item(Severity::Info, false, start);
        controller.sync(std::slice::from_ref(&first), start);
        let collapsed_at = collapse_all(&mut controller, start);

        controller.on_expand_requested(collapsed_at);
        // A new item arrives while suppressed and gets its own timer.
        let late = item(Severity::Warning, false, collapsed_at);
        controller.sync(&[Rc::clone(&first), Rc::clone(&late)], collapsed_at);
        assert!(controller.has_collapse_timer(late.id()));

        controller.fire_due(collapsed_at + DELAY);
        assert_eq!(controller.kind_of(late.id()), Some(StateKind::Visible));
        assert!(!controller.has_frame_request(late.id()));
    }

    #[test]
    fn icon_hover_end_restarts_suppression_window() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        controller.sync(&[item(Severity::Info, false, start)], start);
        let collapsed_at = collapse_all(&mut controller, start);
        controller.on_expand_requested(collapsed_at);

        let left_at = collapsed_at + Duration::from_secs(3);
        assert!(controller.on_collapse_icon_hover_end(left_at));
        assert_eq!(controller.next_deadline(), Some(left_at + HOVER));
    }

    #[test]
    fn icon_hover_end_without_window_is_noop() {
        let mut controller = PresentationController::new(config());
        assert!(!controller.on_collapse_icon_hover_end(Instant::now()));
        assert_eq!(controller.pending_timers(), 0);
    }

    #[test]
    fn hover_pauses_everything_and_restarts_full_delay() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let kept = item(Severity::Info, false, start);
        let gone = item(Severity::Error, false, start);
        controller.sync(&[Rc::clone(&kept), Rc::clone(&gone)], start);

        controller.on_notification_hover_start();
        assert_eq!(controller.pending_timers(), 0);
        controller.fire_due(start + DELAY * 3);
        assert!(controller.collapsed().is_empty());

        // `gone` was removed from the store while hovering.
        let resume_at = start + Duration::from_secs(20);
        controller.on_notification_hover_end(std::slice::from_ref(&kept), resume_at);
        assert!(controller.kind_of(gone.id()).is_none());
        assert!(controller.has_collapse_timer(kept.id()));
        assert_eq!(controller.next_deadline(), Some(resume_at + DELAY));
    }

    #[test]
    fn hover_snaps_collapsing_items_back() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let info = item(Severity::Info, false, start);
        let id = info.id();
        controller.sync(&[info], start);
        controller.fire_due(start + DELAY);
        controller.frame(start + DELAY + ANIMATION / 4);

        controller.on_notification_hover_start();
        assert_eq!(controller.kind_of(id), Some(StateKind::Visible));
        assert_eq!(controller.pending_frames(), 0);
    }

    #[test]
    fn hover_cancels_suppression_window() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        controller.sync(&[item(Severity::Info, false, start)], start);
        let collapsed_at = collapse_all(&mut controller, start);
        controller.on_expand_requested(collapsed_at);

        controller.on_notification_hover_start();
        assert!(!controller.is_hover_suppressed());
        assert!(controller.is_interacting());
    }

    #[test]
    fn expand_during_interaction_never_collapses_under_pointer() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        let first = item(Severity::Info, false, start);
        controller.sync(std::slice::from_ref(&first), start);
        let collapsed_at = collapse_all(&mut controller, start);

        controller.on_notification_hover_start();
        let late = item(Severity::Warning, false, collapsed_at);
        let items = vec![Rc::clone(&first), Rc::clone(&late)];
        controller.sync(&items, collapsed_at);
        assert!(controller.on_expand_requested(collapsed_at));
        assert!(!controller.is_hover_suppressed());
        assert_eq!(controller.pending_timers(), 0);

        controller.frame(collapsed_at + ANIMATION);
        let later = collapsed_at + HOVER + Duration::from_secs(1);
        controller.fire_due(later);
        controller.frame(later);
        assert_eq!(controller.kind_of(first.id()), Some(StateKind::Visible));
        assert_eq!(controller.kind_of(late.id()), Some(StateKind::Visible));

        // Leaving the notification restarts a full delay for both.
        controller.on_notification_hover_end(&items, later);
        assert!(controller.has_collapse_timer(first.id()));
        assert!(controller.has_collapse_timer(late.id()));
        assert_eq!(controller.next_deadline(), Some(later + DELAY));
    }

    #[test]
    fn removal_mid_collapse_cancels_frames() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config()).with_events();
        let doomed = item(Severity::Info, false, start);
        let id = doomed.id();
        controller.sync(&[doomed], start);
        controller.fire_due(start + DELAY);
        controller.frame(start + DELAY + ANIMATION / 4);

        controller.sync(&[], start + DELAY + ANIMATION / 4);
        assert!(!controller.has_frame_request(id));
        assert_eq!(controller.pending_timers(), 0);
        controller.drain_events();

        assert_eq!(controller.frame(start + DELAY + ANIMATION), 0);
        assert!(controller.drain_events().is_empty());
        assert!(controller.kind_of(id).is_none());
    }

    #[test]
    fn reset_cancels_all_timers_and_frames() {
        let start = Instant::now();
        let mut controller = PresentationController::new(config());
        controller.sync(&[item(Severity::Info, false, start), item(Severity::Error, false, start)], start);
        controller.fire_due(start + DELAY);
        assert!(controller.is_animating());

        controller.reset();
        assert_eq!(controller.pending_timers(), 0);
        assert_eq!(controller.pending_frames(), 0);
        assert!(controller.visible().is_empty());
        assert_eq!(controller.fire_due(start + Duration::from_secs(600)), 0);
    }

    #[test]
    fn events_are_only_recorded_when_enabled() {
        let start = Instant::now();
        let mut quiet = PresentationController::new(config());
        quiet.sync(&[item(Severity::Info, false, start)], start);
        assert!(quiet.drain_events().is_empty());

        let mut loud = PresentationController::new(config()).with_events();
        let shown = item(Severity::Info, false, start);
        loud.sync(std::slice::from_ref(&shown), start);
        assert_eq!(loud.drain_events(), vec![ControllerEvent::Shown(shown.id())]);
    }
}
