// SPDX-License-Identifier: MPL-2.0
//! Animation-frame requests.
//!
//! Each animating item holds at most one outstanding request. The host
//! services requests once per rendered frame; an animation that still has
//! work to do must request the next frame explicitly.

/// Outstanding next-frame requests, in request order.
#[derive(Debug, Clone)]
pub struct FrameRequests<K> {
    pending: Vec<K>,
}

impl<K> Default for FrameRequests<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: PartialEq> FrameRequests<K> {
    /// Creates an empty request set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a frame for `key`.
    ///
    /// Returns false if a request was already outstanding; the existing one
    /// is kept so a key never has two drivers.
    pub fn request(&mut self, key: K) -> bool {
        if self.pending.contains(&key) {
            return false;
        }
        self.pending.push(key);
        true
    }

    /// Cancels the request for `key`. Unknown keys are a no-op.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending != key);
        self.pending.len() != before
    }

    /// Takes every outstanding request, leaving the set empty.
    pub fn take(&mut self) -> Vec<K> {
        std::mem::take(&mut self.pending)
    }

    /// Cancels every request, returning how many were outstanding.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Returns true if a request is outstanding for `key`.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    /// Returns the number of outstanding requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is waiting for a frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requests_are_coalesced() {
        let mut frames = FrameRequests::new();
        assert!(frames.request(1));
        assert!(!frames.request(1));
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn take_drains_in_request_order() {
        let mut frames = FrameRequests::new();
        frames.request(3);
        frames.request(1);
        frames.request(2);

        assert_eq!(frames.take(), vec![3, 1, 2]);
        assert!(frames.is_empty());
    }

    #[test]
    fn cancel_removes_only_that_key() {
        let mut frames = FrameRequests::new();
        frames.request("a");
        frames.request("b");

        assert!(frames.cancel(&"a"));
        assert!(!frames.cancel(&"a"));
        assert!(!frames.is_pending(&"a"));
        assert!(frames.is_pending(&"b"));
        assert_eq!(frames.clear(), 1);
    }
}
