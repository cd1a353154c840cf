//! Orchestrator owning all simulation state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use serde::Serialize;

use crate::bounded::Insert;
use crate::channel::{ChannelKind, ChannelStore, Operation};
use crate::config::DebuggerConfig;
use crate::events::{EventLog, LogModule};
use crate::registry::{ThreadRecord, ThreadRegistry};
use crate::sink::{EventSink, NullSink};
use crate::worker::Worker;

pub const STARTUP_EVENT: &str = "IPC Debugger Started";
pub const SHUTDOWN_EVENT: &str = "IPC Debugger Terminated";
pub const DEADLOCK_EVENT: &str = "Deadlock simulation executed";

/// Per-channel operation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardCounters {
    pub pipe_ops: u64,
    pub queue_ops: u64,
    pub shm_ops: u64,
}

/// Occupancy and drop counts of the bounded stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub threads: usize,
    pub thread_capacity: usize,
    pub threads_dropped: u64,
    pub events: usize,
    pub event_capacity: usize,
    pub events_dropped: u64,
    pub sink_failures: u64,
}

/// Channel store, thread registry and event log for one process.
///
/// Workers borrow the debugger for the duration of a [`run`](Self::run);
/// nothing outlives it.
pub struct Debugger {
    config: DebuggerConfig,
    channels: ChannelStore,
    threads: ThreadRegistry,
    events: EventLog,
    sink: Box<dyn EventSink>,
    sink_failures: AtomicU64,
}

impl Debugger {
    /// Debugger with default capacities and no persisted log.
    pub fn new() -> Self {
        Self::with_config(DebuggerConfig::default())
    }

    pub fn with_config(config: DebuggerConfig) -> Self {
        Self {
            config,
            channels: ChannelStore::new(config.max_buffer),
            threads: ThreadRegistry::new(config.max_threads),
            events: EventLog::new(config.max_events),
            sink: Box::new(NullSink),
            sink_failures: AtomicU64::new(0),
        }
    }

    /// Mirror every event to `sink` as well as the in-memory log.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Spawn the worker pair for `kind` and block until both have finished.
    ///
    /// The two workers race for the channel lock; whichever wins runs first.
    /// A worker that cannot be spawned or that panics is reported through
    /// `tracing` only.
    pub fn run(&self, kind: ChannelKind) {
        self.run_collect(kind);
    }

    /// Like [`run`](Self::run), returning what each worker did.
    ///
    /// Operations come back in spawn order (writer, then reader), not in
    /// lock order. A worker that failed to spawn or panicked has no entry.
    pub fn run_collect(&self, kind: ChannelKind) -> Vec<Operation> {
        tracing::debug!(channel = %kind, "starting worker pair");
        let ops = thread::scope(|scope| {
            let handles: Vec<_> = Worker::pair(kind)
                .into_iter()
                .filter_map(|worker| {
                    thread::Builder::new()
                        .name(worker.name().to_string())
                        .spawn_scoped(scope, move || worker.run(self))
                        .map_err(|err| {
                            tracing::error!(worker = worker.name(), error = %err, "failed to spawn worker");
                        })
                        .ok()
                        .map(|handle| (worker, handle))
                })
                .collect();

            handles
                .into_iter()
                .filter_map(|(worker, handle)| match handle.join() {
                    Ok(op) => Some(op),
                    Err(_) => {
                        tracing::error!(worker = worker.name(), "worker terminated abnormally");
                        None
                    }
                })
                .collect()
        });
        tracing::debug!(channel = %kind, "worker pair joined");
        ops
    }

    pub fn run_pipe_exchange(&self) {
        self.run(ChannelKind::Pipe);
    }

    pub fn run_queue_exchange(&self) {
        self.run(ChannelKind::MessageQueue);
    }

    pub fn run_shared_memory_exchange(&self) {
        self.run(ChannelKind::SharedMemory);
    }

    /// Append the deadlock marker event. Takes no channel lock and detects nothing.
    pub fn simulate_deadlock(&self) -> Insert {
        tracing::info!("simulating circular wait");
        self.log_event(LogModule::Deadlock, DEADLOCK_EVENT)
    }

    pub fn startup_event(&self) -> Insert {
        self.log_event(LogModule::System, STARTUP_EVENT)
    }

    pub fn shutdown_event(&self) -> Insert {
        self.log_event(LogModule::System, SHUTDOWN_EVENT)
    }

    /// Mirror `message` to the sink, then append it to the event log.
    ///
    /// A sink failure is counted and logged; the in-memory append happens
    /// regardless.
    pub fn log_event(&self, module: LogModule, message: &str) -> Insert {
        if let Err(err) = self.sink.write_event(module, message) {
            self.sink_failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(module = %module, error = %err, "event not persisted");
        }
        self.events.append(message)
    }

    pub fn dashboard_counters(&self) -> DashboardCounters {
        DashboardCounters {
            pipe_ops: self.channels.op_count(ChannelKind::Pipe),
            queue_ops: self.channels.op_count(ChannelKind::MessageQueue),
            shm_ops: self.channels.op_count(ChannelKind::SharedMemory),
        }
    }

    pub fn thread_snapshot(&self) -> Vec<ThreadRecord> {
        self.threads.snapshot()
    }

    pub fn event_snapshot(&self) -> Vec<String> {
        self.events.snapshot()
    }

    pub fn capacity_report(&self) -> CapacityReport {
        CapacityReport {
            threads: self.threads.len(),
            thread_capacity: self.threads.capacity(),
            threads_dropped: self.threads.dropped(),
            events: self.events.len(),
            event_capacity: self.events.capacity(),
            events_dropped: self.events.dropped(),
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &DebuggerConfig {
        &self.config
    }

    pub fn channels(&self) -> &ChannelStore {
        &self.channels
    }

    pub fn threads(&self) -> &ThreadRegistry {
        &self.threads
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}
