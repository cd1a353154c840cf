//! Sender and receiver routines, one pair per channel kind.
//!
//! Every worker runs the same sequence: register as `Created`, move to
//! `Running`, perform its operation under the channel lock (appending its
//! event before the lock is released), then move to `Terminated`. Nothing
//! orders a pair's sender before its receiver.

use crate::channel::{ChannelKind, Operation, Role};
use crate::debugger::Debugger;
use crate::registry::ThreadState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Worker {
    PipeSender,
    PipeReceiver,
    QueueSender,
    QueueReceiver,
    ShmWriter,
    ShmReader,
}

impl Worker {
    /// Writer and reader for `kind`, in spawn order.
    pub fn pair(kind: ChannelKind) -> [Worker; 2] {
        match kind {
            ChannelKind::Pipe => [Worker::PipeSender, Worker::PipeReceiver],
            ChannelKind::MessageQueue => [Worker::QueueSender, Worker::QueueReceiver],
            ChannelKind::SharedMemory => [Worker::ShmWriter, Worker::ShmReader],
        }
    }

    pub fn kind(self) -> ChannelKind {
        match self {
            Worker::PipeSender | Worker::PipeReceiver => ChannelKind::Pipe,
            Worker::QueueSender | Worker::QueueReceiver => ChannelKind::MessageQueue,
            Worker::ShmWriter | Worker::ShmReader => ChannelKind::SharedMemory,
        }
    }

    pub fn role(self) -> Role {
        match self {
            Worker::PipeSender | Worker::QueueSender | Worker::ShmWriter => Role::Writer,
            Worker::PipeReceiver | Worker::QueueReceiver | Worker::ShmReader => Role::Reader,
        }
    }

    /// Registry name, also used as the OS thread name.
    pub fn name(self) -> &'static str {
        match self {
            Worker::PipeSender => "Pipe-Sender",
            Worker::PipeReceiver => "Pipe-Receiver",
            Worker::QueueSender => "MQ-Sender",
            Worker::QueueReceiver => "MQ-Receiver",
            Worker::ShmWriter => "SHM-Writer",
            Worker::ShmReader => "SHM-Reader",
        }
    }

    /// Event log description for this worker's operation.
    pub fn event(self) -> &'static str {
        match self {
            Worker::PipeSender => "Pipe sender wrote data",
            Worker::PipeReceiver => "Pipe receiver read data",
            Worker::QueueSender => "Message enqueued",
            Worker::QueueReceiver => "Message dequeued",
            Worker::ShmWriter => "Shared memory written",
            Worker::ShmReader => "Shared memory read",
        }
    }

    /// Execute this worker to completion on the calling thread.
    pub fn run(self, debugger: &Debugger) -> Operation {
        let name = self.name();
        let span = tracing::info_span!("worker", name);
        let _entered = span.enter();

        let threads = debugger.threads();
        threads.register(name, ThreadState::Created);
        threads.update_state(name, ThreadState::Running);

        let kind = self.kind();
        let op = debugger.channels().perform(kind, self.role(), |op| {
            tracing::info!(
                channel = %op.kind,
                role = ?op.role,
                op_count = op.op_count,
                payload = %op.payload,
                "{}",
                self.event()
            );
            debugger.log_event(kind.module(), self.event());
        });

        threads.update_state(name, ThreadState::Terminated);
        op
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_writer_then_reader_of_same_kind() {
        for kind in ChannelKind::ALL {
            let [writer, reader] = Worker::pair(kind);
            assert_eq!(writer.kind(), kind);
            assert_eq!(reader.kind(), kind);
            assert_eq!(writer.role(), Role::Writer);
            assert_eq!(reader.role(), Role::Reader);
        }
    }

    #[test]
    fn single_worker_runs_full_lifecycle() {
        let debugger = Debugger::new();
        let op = Worker::QueueSender.run(&debugger);

        assert_eq!(op.payload, "Hello via Message Queue IPC");
        let threads = debugger.thread_snapshot();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].name, "MQ-Sender");
        assert_eq!(threads[0].state, ThreadState::Terminated);
        assert_eq!(debugger.event_snapshot(), vec!["Message enqueued"]);
    }

    #[test]
    fn reader_alone_sees_empty_buffer() {
        let debugger = Debugger::new();
        let op = Worker::PipeReceiver.run(&debugger);
        assert_eq!(op.payload, "");
        assert_eq!(op.op_count, 0);
    }
}
