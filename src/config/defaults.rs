// SPDX-License-Identifier: MPL-2.0
//! Default values for every setting.
//!
//! The bounds themselves live next to the validated types in
//! [`crate::domain::timing`] and [`crate::diagnostics`]; these constants
//! mirror them for the settings file.

use crate::diagnostics::BufferCapacity;
use crate::domain::timing::{animation_bounds, collapse_bounds, dismiss_bounds, hover_bounds};

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Delay before a visible notification collapses (ms).
pub const DEFAULT_COLLAPSE_DELAY_MS: u64 = collapse_bounds::DEFAULT_MS;

/// Hover-suppression window after an expand (ms).
pub const DEFAULT_HOVER_SUPPRESSION_MS: u64 = hover_bounds::DEFAULT_MS;

/// Delay before a success notification dismisses itself (ms).
pub const DEFAULT_SUCCESS_DISMISS_MS: u64 = dismiss_bounds::DEFAULT_MS;

/// Duration of a collapse or expand transition (ms).
pub const DEFAULT_ANIMATION_MS: u64 = animation_bounds::DEFAULT_MS;

// ==========================================================================
// Behavior Defaults
// ==========================================================================

/// Whether notifications collapse on their own.
pub const DEFAULT_AUTO_COLLAPSE: bool = true;

/// Default number of events kept by the event log.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = BufferCapacity::DEFAULT;

/// Minimum event log capacity.
pub const MIN_EVENT_LOG_CAPACITY: usize = BufferCapacity::MIN;

/// Maximum event log capacity.
pub const MAX_EVENT_LOG_CAPACITY: usize = BufferCapacity::MAX;
