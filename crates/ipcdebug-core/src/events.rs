//! Ordered in-memory event history and the module labels used when mirroring it.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::bounded::{Bounded, Insert};

/// Source label attached to an event when it is mirrored to a persisted log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogModule {
    System,
    Pipe,
    MessageQueue,
    SharedMemory,
    Deadlock,
}

impl LogModule {
    pub fn as_str(self) -> &'static str {
        match self {
            LogModule::System => "SYSTEM",
            LogModule::Pipe => "PIPE",
            LogModule::MessageQueue => "MESSAGE_QUEUE",
            LogModule::SharedMemory => "SHARED_MEMORY",
            LogModule::Deadlock => "DEADLOCK",
        }
    }
}

impl fmt::Display for LogModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One human-readable entry. Insertion order is the only ordering kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub description: String,
}

/// Bounded, append-only event history.
///
/// Appends are serialised internally, so workers on different channels may
/// append concurrently without tearing an entry.
#[derive(Debug)]
pub struct EventLog {
    entries: Mutex<Bounded<EventRecord>>,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Bounded::with_capacity(capacity)),
        }
    }

    /// Append `message`, or drop it silently when the log is full.
    pub fn append(&self, message: impl Into<String>) -> Insert {
        let description = message.into();
        let mut entries = self.lock();
        let result = entries.push(EventRecord {
            description: description.clone(),
        });
        match result {
            Insert::Inserted(index) => tracing::debug!(index, %description, "event appended"),
            Insert::Dropped => tracing::warn!(
                capacity = entries.capacity(),
                %description,
                "event log full, event dropped"
            ),
        }
        result
    }

    /// Descriptions in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|record| record.description.clone())
            .collect()
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.lock().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn dropped(&self) -> u64 {
        self.lock().dropped()
    }

    fn lock(&self) -> MutexGuard<'_, Bounded<EventRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
