// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notification engine.
//!
//! Every lifecycle transition is mirrored into a memory-bounded
//! [`EventLog`] that can be exported as JSON. Events carry ids and
//! severities only, never message text.
//!
//! - [`CircularBuffer`]: ring buffer with eviction
//! - [`LifecycleEvent`]: a recorded transition and its timestamp
//! - [`EventLog`]: the log itself, with JSON export

mod buffer;
mod events;
mod log;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{LifecycleEvent, LifecycleEventKind, RemovalReason};
pub use log::{EventLog, LogMetadata, SerializableEvent};
