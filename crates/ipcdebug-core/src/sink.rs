//! Seam for mirroring events outside the process.

use crate::error::SinkError;
use crate::events::LogModule;

/// Destination that mirrors every event outside the process.
///
/// Called from worker threads while a channel lock is held, so
/// implementations must be cheap and must serialise their own writes.
pub trait EventSink: Send + Sync {
    fn write_event(&self, module: LogModule, message: &str) -> Result<(), SinkError>;
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn write_event(&self, _module: LogModule, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}
