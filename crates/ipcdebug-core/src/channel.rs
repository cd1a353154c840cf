//! Simulated channels.
//!
//! Each channel owns a bounded payload buffer and an operation counter,
//! guarded by a lock private to that channel. No lock is ever taken for two
//! channels at once.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::events::LogModule;

/// The three simulated channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Pipe,
    MessageQueue,
    SharedMemory,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Pipe,
        ChannelKind::MessageQueue,
        ChannelKind::SharedMemory,
    ];

    /// Fixed payload stored by this channel's writer.
    pub fn message(self) -> &'static str {
        match self {
            ChannelKind::Pipe => "Hello via Pipe IPC",
            ChannelKind::MessageQueue => "Hello via Message Queue IPC",
            ChannelKind::SharedMemory => "Hello via Shared Memory IPC",
        }
    }

    pub fn module(self) -> LogModule {
        match self {
            ChannelKind::Pipe => LogModule::Pipe,
            ChannelKind::MessageQueue => LogModule::MessageQueue,
            ChannelKind::SharedMemory => LogModule::SharedMemory,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChannelKind::Pipe => "Pipe",
            ChannelKind::MessageQueue => "Message Queue",
            ChannelKind::SharedMemory => "Shared Memory",
        }
    }

    fn index(self) -> usize {
        match self {
            ChannelKind::Pipe => 0,
            ChannelKind::MessageQueue => 1,
            ChannelKind::SharedMemory => 2,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Side of a channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Writer,
    Reader,
}

/// What a single [`ChannelStore::perform`] call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub kind: ChannelKind,
    pub role: Role,
    /// Payload written, or payload observed by a reader (possibly empty).
    pub payload: String,
    /// Channel counter after the operation.
    pub op_count: u64,
}

#[derive(Debug, Default)]
struct ChannelState {
    payload: String,
    op_count: u64,
}

#[derive(Debug)]
struct Channel {
    kind: ChannelKind,
    state: Mutex<ChannelState>,
}

/// Payload and counter for every channel kind.
#[derive(Debug)]
pub struct ChannelStore {
    channels: [Channel; 3],
    max_buffer: usize,
}

impl ChannelStore {
    pub fn new(max_buffer: usize) -> Self {
        Self {
            channels: ChannelKind::ALL.map(|kind| Channel {
                kind,
                state: Mutex::new(ChannelState::default()),
            }),
            max_buffer,
        }
    }

    /// Run one operation on `kind` while holding that channel's lock.
    ///
    /// A writer overwrites the payload with the channel's fixed message and
    /// bumps the counter; a reader only observes. `on_locked` runs before the
    /// lock is released so its side effects are atomic with the operation
    /// relative to other workers on the same channel. The guard is dropped on
    /// every exit path, including a panic inside `on_locked`.
    pub fn perform<F>(&self, kind: ChannelKind, role: Role, on_locked: F) -> Operation
    where
        F: FnOnce(&Operation),
    {
        let channel = self.channel(kind);
        let mut state = channel
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if role == Role::Writer {
            state.payload = truncate_to(kind.message(), self.max_buffer).to_string();
            state.op_count += 1;
        }

        let op = Operation {
            kind: channel.kind,
            role,
            payload: state.payload.clone(),
            op_count: state.op_count,
        };
        on_locked(&op);
        op
    }

    /// Operation counter of `kind`, read under its lock.
    pub fn op_count(&self, kind: ChannelKind) -> u64 {
        self.channel(kind)
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .op_count
    }

    /// Current payload of `kind`, read under its lock.
    pub fn payload(&self, kind: ChannelKind) -> String {
        self.channel(kind)
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .payload
            .clone()
    }

    pub fn max_buffer(&self) -> usize {
        self.max_buffer
    }

    fn channel(&self, kind: ChannelKind) -> &Channel {
        &self.channels[kind.index()]
    }
}

fn truncate_to(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
