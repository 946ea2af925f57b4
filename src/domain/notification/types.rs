// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `NotificationItem` struct, the `Severity` enum
//! and the identifiers used to address notifications in the store.

use std::fmt;
use std::time::Instant;

/// Slot used by callers that do not target a particular field or form.
pub const GLOBAL_SLOT: &str = "global";

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level, ordered from most to least urgent.
///
/// The rank is the single source of truth for ordering: `Error` (0) beats
/// `Warning` (1), which beats `Info` (2), which beats `Success` (3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Error requiring attention.
    Error,
    /// Warning that doesn't block the operation.
    Warning,
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
}

impl Severity {
    /// All severities, most urgent first.
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Success,
    ];

    /// Returns the numeric urgency rank (lower is more severe).
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Success => 3,
        }
    }

    /// Returns true if `self` is strictly more urgent than `other`.
    #[must_use]
    pub fn is_more_severe_than(self, other: Severity) -> bool {
        self.rank() < other.rank()
    }

    /// Returns a stable lowercase label, used in logs and exports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical slot a notification belongs to.
///
/// A plain key (no uniqueness marker) is replaced when another notification
/// is added to the same slot. A unique key embeds the id of the notification
/// that owns it and therefore never collides with anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey {
    slot: String,
    unique: Option<NotificationId>,
}

impl CorrelationKey {
    /// Creates a replaceable key for the given slot.
    pub fn slot(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            unique: None,
        }
    }

    /// Creates a key that can never be replaced by another notification.
    pub fn unique(slot: impl Into<String>, marker: NotificationId) -> Self {
        Self {
            slot: slot.into(),
            unique: Some(marker),
        }
    }

    /// Returns the slot name without the uniqueness marker.
    #[must_use]
    pub fn slot_name(&self) -> &str {
        &self.slot
    }

    /// Returns true if the key carries a uniqueness marker.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique.is_some()
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unique {
            Some(marker) => write!(f, "{}{}", self.slot, marker),
            None => f.write_str(&self.slot),
        }
    }
}

/// Per-call options for adding a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOptions {
    /// Success notifications are removed automatically after the dismiss delay.
    pub auto_dismiss: bool,
    /// Persistent notifications are never collapsed into the aggregate icon.
    pub persistent: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            auto_dismiss: true,
            persistent: false,
        }
    }
}

impl AddOptions {
    /// Marks the notification as persistent.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Disables success auto-dismiss.
    #[must_use]
    pub fn without_auto_dismiss(mut self) -> Self {
        self.auto_dismiss = false;
        self
    }
}

/// A notification held by the store.
///
/// Items are immutable once created; replacing a slot creates a new item.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationItem {
    id: NotificationId,
    key: CorrelationKey,
    severity: Severity,
    message: String,
    created_at: Instant,
    persistent: bool,
}

impl NotificationItem {
    /// Creates a notification item.
    pub fn new(
        id: NotificationId,
        key: CorrelationKey,
        severity: Severity,
        message: impl Into<String>,
        created_at: Instant,
        persistent: bool,
    ) -> Self {
        Self {
            id,
            key,
            severity,
            message: message.into(),
            created_at,
            persistent,
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the correlation key.
    #[must_use]
    pub fn key(&self) -> &CorrelationKey {
        &self.key
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the display text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when this notification was created.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns whether the notification stays individually visible.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }
}

/// Returns the most urgent item: lowest severity rank, earliest creation.
///
/// Items with the same rank and timestamp keep their iteration order, so the
/// first one inserted wins.
pub fn most_severe<'a, I, T>(items: I) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: AsRef<NotificationItem> + 'a,
{
    items
        .into_iter()
        .min_by_key(|item| {
            let item: &NotificationItem = AsRef::<NotificationItem>::as_ref(*item);
            (item.severity().rank(), item.created_at())
        })
}

impl AsRef<NotificationItem> for NotificationItem {
    fn as_ref(&self) -> &NotificationItem {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn item(severity: Severity, created_at: Instant) -> NotificationItem {
        NotificationItem::new(
            NotificationId::new(),
            CorrelationKey::slot("field"),
            severity,
            "message",
            created_at,
            false,
        )
    }

    #[test]
    fn notification_ids_are_unique() {
        assert_ne!(NotificationId::new(), NotificationId::new());
    }

    #[test]
    fn severity_ranks_are_strictly_ordered() {
        let ranks: Vec<u8> = Severity::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(Severity::Error.is_more_severe_than(Severity::Warning));
        assert!(Severity::Info.is_more_severe_than(Severity::Success));
        assert!(!Severity::Success.is_more_severe_than(Severity::Success));
    }

    #[test]
    fn unique_keys_never_equal_plain_keys() {
        let marker = NotificationId::new();
        let plain = CorrelationKey::slot("email");
        let unique = CorrelationKey::unique("email", marker);

        assert_ne!(plain, unique);
        assert_eq!(unique.slot_name(), "email");
        assert!(unique.is_unique());
        assert_eq!(unique.to_string(), format!("email{marker}"));
    }

    #[test]
    fn add_options_default_auto_dismisses() {
        let options = AddOptions::default();
        assert!(options.auto_dismiss);
        assert!(!options.persistent);

        let options = AddOptions::default().persistent().without_auto_dismiss();
        assert!(options.persistent);
        assert!(!options.auto_dismiss);
    }

    #[test]
    fn most_severe_prefers_lowest_rank() {
        let base = Instant::now();
        let items = vec![
            item(Severity::Info, base),
            item(Severity::Error, base + Duration::from_secs(2)),
            item(Severity::Warning, base + Duration::from_secs(1)),
        ];

        let winner = most_severe(&items).expect("non-empty");
        assert_eq!(winner.severity(), Severity::Error);
    }

    #[test]
    fn most_severe_breaks_ties_by_creation_time() {
        let base = Instant::now();
        let late = item(Severity::Warning, base + Duration::from_millis(10));
        let early = item(Severity::Warning, base);
        let early_id = early.id();
        let items = vec![late, early];

        assert_eq!(most_severe(&items).map(NotificationItem::id), Some(early_id));
    }

    #[test]
    fn most_severe_of_nothing_is_none() {
        let items: Vec<NotificationItem> = Vec::new();
        assert!(most_severe(&items).is_none());
    }
}
