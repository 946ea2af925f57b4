// SPDX-License-Identifier: MPL-2.0
//! Keyed, cancellable timers.
//!
//! A [`TimerTable`] holds at most one pending timer per key. Scheduling a key
//! that already has a timer cancels the old one first, so callers never need
//! to pair `schedule` with a manual cancel.
//!
//! Timers carry no callback. The owner polls [`TimerTable::pop_due`] and
//! dispatches on the returned key and payload, which keeps the table free of
//! borrows into its owner and lets the owner re-validate state before acting.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<P> {
    deadline: Instant,
    seq: u64,
    payload: P,
}

/// Table of pending timers, at most one per key.
#[derive(Debug, Clone)]
pub struct TimerTable<K, P = ()> {
    entries: HashMap<K, Entry<P>>,
    next_seq: u64,
}

impl<K, P> Default for TimerTable<K, P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K, P> TimerTable<K, P>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer for `key`, cancelling any timer already pending for it.
    ///
    /// Returns the payload of the cancelled timer, if there was one.
    pub fn schedule(&mut self, key: K, deadline: Instant, payload: P) -> Option<P> {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries
            .insert(
                key,
                Entry {
                    deadline,
                    seq,
                    payload,
                },
            )
            .map(|old| old.payload)
    }

    /// Schedules a timer `delay` after `now`.
    pub fn schedule_after(&mut self, key: K, now: Instant, delay: Duration, payload: P) -> Option<P> {
        self.schedule(key, now + delay, payload)
    }

    /// Cancels the timer for `key`. Unknown keys are a no-op.
    pub fn cancel(&mut self, key: &K) -> Option<P> {
        self.entries.remove(key).map(|entry| entry.payload)
    }

    /// Cancels every timer matching `predicate`, returning how many were cancelled.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K, &P) -> bool) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, entry| !predicate(key, &entry.payload));
        before - self.entries.len()
    }

    /// Cancels every timer, returning how many were pending.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Returns true if a timer is pending for `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the deadline of the timer pending for `key`.
    #[must_use]
    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.deadline)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    ///
    /// Timers with equal deadlines come out in the order they were scheduled.
    pub fn pop_due(&mut self, now: Instant) -> Option<(K, P)> {
        let key = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(key, _)| key.clone())?;
        self.entries.remove(&key).map(|entry| (key, entry.payload))
    }

    /// Returns the keys of all pending timers, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
