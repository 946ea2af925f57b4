// SPDX-License-Identifier: MPL-2.0
//! Scheduling primitives shared by the store and the presentation controller.
//!
//! - [`Clock`]: injected time source ([`SystemClock`], [`ManualClock`])
//! - [`TimerTable`]: one cancellable timer per key, cancel-then-set on reschedule
//! - [`FrameRequests`]: individually cancellable next-frame requests

mod clock;
mod frames;
mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frames::FrameRequests;
pub use timers::TimerTable;
