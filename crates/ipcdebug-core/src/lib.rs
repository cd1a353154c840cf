//! Lock-synchronised IPC channel simulation with thread and event instrumentation.
//!
//! Three simulated channels (pipe, message queue, shared memory) are exercised
//! by sender/receiver worker pairs running on real OS threads. Every worker
//! records its lifecycle in a bounded thread registry and every channel
//! operation appends to a bounded, ordered event log, so the interleaving of
//! concurrent workers around shared state can be inspected afterwards.
//!
//! No real OS IPC object is created; payloads are fixed strings.
//!
//! # Crate Structure
//!
//! - [`bounded`] — fixed-capacity container with drop-on-overflow
//! - [`channel`] — per-channel payload and counter, each behind its own lock
//! - [`registry`] — thread lifecycle table
//! - [`events`] — in-memory event log
//! - [`sink`] — seam for mirroring events to a persisted log
//! - [`worker`] — the six sender/receiver routines
//! - [`debugger`] — orchestrator owning all of the above

pub mod bounded;
pub mod channel;
pub mod config;
pub mod debugger;
pub mod error;
pub mod events;
pub mod registry;
pub mod sink;
pub mod worker;

pub use bounded::{Bounded, Insert};
pub use channel::{ChannelKind, ChannelStore, Operation, Role};
pub use config::{DebuggerConfig, MAX_BUFFER, MAX_EVENTS, MAX_THREADS};
pub use debugger::{CapacityReport, DashboardCounters, Debugger};
pub use error::{ConfigError, Result, SinkError};
pub use events::{EventLog, EventRecord, LogModule};
pub use registry::{ThreadRecord, ThreadRegistry, ThreadState};
pub use sink::{EventSink, NullSink};
pub use worker::Worker;
