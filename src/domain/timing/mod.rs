// SPDX-License-Identifier: MPL-2.0
//! Timing domain types.
//!
//! Validated delays used by the store and the presentation controller:
//! [`CollapseDelay`], [`HoverSuppression`], [`DismissDelay`] and
//! [`AnimationDuration`].

mod newtypes;

pub use newtypes::{
    animation_bounds, collapse_bounds, dismiss_bounds, hover_bounds, AnimationDuration,
    CollapseDelay, DismissDelay, HoverSuppression,
};

/// Timing and behavior settings consumed by the engine.
///
/// Built from the persisted [`crate::config::Config`] or directly in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Delay before a visible notification collapses.
    pub collapse_delay: CollapseDelay,
    /// Window during which auto-collapse is suppressed after an expand.
    pub hover_suppression: HoverSuppression,
    /// Delay before an auto-dismissing success notification is removed.
    pub dismiss_delay: DismissDelay,
    /// Duration of a collapse or expand transition.
    pub animation: AnimationDuration,
    /// Whether visible notifications collapse on their own.
    pub auto_collapse: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collapse_delay: CollapseDelay::default(),
            hover_suppression: HoverSuppression::default(),
            dismiss_delay: DismissDelay::default(),
            animation: AnimationDuration::default(),
            auto_collapse: true,
        }
    }
}

impl EngineConfig {
    /// Returns a copy whose hover window is guaranteed to outlast the collapse delay.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.hover_suppression = self.hover_suppression.longer_than(self.collapse_delay);
        self
    }
}
