// SPDX-License-Identifier: MPL-2.0
//! Bounded log of lifecycle events with JSON export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, LifecycleEvent, LifecycleEventKind};
use crate::error::Result;

/// Header of an exported log.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogMetadata {
    /// When the export was generated (RFC 3339).
    pub generated_at: String,
    /// Crate version that produced the log.
    pub version: String,
    /// When recording started (RFC 3339).
    pub recording_started_at: String,
    /// Number of events in the export.
    pub event_count: usize,
    /// Events lost to buffer eviction.
    pub evicted: u64,
}

/// An event with its time relative to the start of recording.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since recording started.
    pub offset_ms: u64,
    /// The event data.
    #[serde(flatten)]
    pub kind: LifecycleEventKind,
}

#[derive(Debug, Serialize)]
struct LogExport {
    metadata: LogMetadata,
    events: Vec<SerializableEvent>,
}

/// Memory-bounded record of what the engine did.
#[derive(Debug, Clone)]
pub struct EventLog {
    buffer: CircularBuffer<LifecycleEvent>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl EventLog {
    /// Creates an empty log whose offsets are measured from `started_at`.
    #[must_use]
    pub fn new(capacity: BufferCapacity, started_at: Instant) -> Self {
        Self {
            buffer: CircularBuffer::new(capacity),
            started_at,
            started_at_utc: Utc::now(),
        }
    }

    /// Records an event at `now`.
    pub fn record(&mut self, kind: LifecycleEventKind, now: Instant) {
        self.buffer.push(LifecycleEvent::new(kind, now));
    }

    /// Iterates the stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LifecycleEvent> {
        self.buffer.iter()
    }

    /// Returns the stored event kinds, oldest first.
    #[must_use]
    pub fn kinds(&self) -> Vec<&LifecycleEventKind> {
        self.buffer.iter().map(|event| &event.kind).collect()
    }

    /// Returns the number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Drops every stored event.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[allow(clippy::cast_possible_truncation)] // offsets in ms fit in u64
    fn build_export(&self) -> LogExport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.started_at)
                    .as_millis() as u64,
                kind: event.kind.clone(),
            })
            .collect();

        LogExport {
            metadata: LogMetadata {
                generated_at: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                recording_started_at: self.started_at_utc.to_rfc3339(),
                event_count: events.len(),
                evicted: self.buffer.evicted(),
            },
            events,
        }
    }

    /// Serializes the log as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_export())
    }

    /// Writes the log as JSON to `path`, replacing any existing file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Io`] if writing fails and
    /// [`crate::error::Error::Serialization`] if encoding fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(())
}
