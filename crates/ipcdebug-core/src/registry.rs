//! Thread lifecycle table.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::bounded::{Bounded, Insert};

/// Worker lifecycle state.
///
/// Workers move `Created -> Running -> Terminated`. `Waiting` exists for
/// display and is not produced by any current worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadState {
    Created,
    Running,
    Waiting,
    Terminated,
}

impl ThreadState {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreadState::Created => "CREATED",
            ThreadState::Running => "RUNNING",
            ThreadState::Waiting => "WAITING",
            ThreadState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadRecord {
    /// 1-based, assigned in registration order.
    pub id: u32,
    pub name: String,
    pub state: ThreadState,
}

/// Bounded table of worker lifecycle records behind one coarse lock.
///
/// Names are not unique. Lookups scan from the oldest record and stop at the
/// first match, so a worker reusing an earlier worker's name updates the
/// earlier record.
#[derive(Debug)]
pub struct ThreadRegistry {
    records: Mutex<Bounded<ThreadRecord>>,
}

impl ThreadRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Bounded::with_capacity(capacity)),
        }
    }

    /// Add a record with the next sequential id.
    ///
    /// Returns `None` without any other signal when the registry is full.
    pub fn register(&self, name: &str, state: ThreadState) -> Option<u32> {
        let mut records = self.lock();
        let id = u32::try_from(records.len() + 1).unwrap_or(u32::MAX);
        match records.push(ThreadRecord {
            id,
            name: name.to_string(),
            state,
        }) {
            Insert::Inserted(_) => {
                tracing::debug!(id, name, %state, "thread registered");
                Some(id)
            }
            Insert::Dropped => {
                tracing::warn!(
                    name,
                    capacity = records.capacity(),
                    "thread registry full, registration dropped"
                );
                None
            }
        }
    }

    /// Set the state of the first record named `name`.
    ///
    /// Returns `false` when no record matches; nothing else happens.
    pub fn update_state(&self, name: &str, state: ThreadState) -> bool {
        let mut records = self.lock();
        match records.iter_mut().find(|record| record.name == name) {
            Some(record) => {
                tracing::debug!(id = record.id, name, from = %record.state, to = %state, "thread state changed");
                record.state = state;
                true
            }
            None => {
                tracing::debug!(name, %state, "state update for unknown thread ignored");
                false
            }
        }
    }

    pub fn snapshot(&self) -> Vec<ThreadRecord> {
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

    /// Registrations discarded because the registry was full.
    pub fn dropped(&self) -> u64 {
        self.lock().dropped()
    }

    fn lock(&self) -> MutexGuard<'_, Bounded<ThreadRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
