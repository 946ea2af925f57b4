// SPDX-License-Identifier: MPL-2.0
//! Bounded ring buffer backing the event log.
//!
//! Once full, every push evicts the oldest entry.

use std::collections::VecDeque;

/// Number of entries a [`CircularBuffer`] holds, kept within
/// [`BufferCapacity::MIN`]..=[`BufferCapacity::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Smallest log worth keeping.
    pub const MIN: usize = 16;
    /// Upper bound on retained events.
    pub const MAX: usize = 10_000;
    /// Size used when nothing is configured.
    pub const DEFAULT: usize = 512;

    /// Clamps `entries` into range.
    #[must_use]
    pub fn new(entries: usize) -> Self {
        Self(entries.clamp(Self::MIN, Self::MAX))
    }

    /// Resolves an optional setting, falling back to [`Self::DEFAULT`].
    #[must_use]
    pub fn from_setting(entries: Option<usize>) -> Self {
        entries.map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// A ring buffer with a fixed capacity, oldest entry first.
///
/// # Example
///
/// ```
/// use toastline::diagnostics::{BufferCapacity, CircularBuffer};
///
/// let mut buffer: CircularBuffer<u32> = CircularBuffer::new(BufferCapacity::new(16));
/// for n in 0..20 {
///     buffer.push(n);
/// }
///
/// assert_eq!(buffer.len(), 16);
/// assert_eq!(buffer.evicted(), 4);
/// assert_eq!(buffer.iter().next(), Some(&4));
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
    evicted: u64,
}

impl<T> CircularBuffer<T> {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates an empty buffer without the [`BufferCapacity`] bounds.
    ///
    /// Handy in tests that want to overflow a tiny buffer.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    /// Appends `item`, evicting the oldest entry when full.
    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
            self.evicted += 1;
        }
        self.data.push_back(item);
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns how many entries were evicted since creation.
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Drops every stored entry. The eviction counter is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
