//! Instrumented IPC simulation: pipes, message queues and shared memory
//! exercised by concurrent worker pairs.
//!
//! # Crate Structure
//!
//! - [`sim`] — channels, thread registry, event log and the orchestrating `Debugger`
//! - [`sink`] — append-only timestamped log file

/// Re-export simulation types.
pub mod sim {
    pub use ipcdebug_core::*;
}

/// Re-export the persisted log sink.
pub mod sink {
    pub use ipcdebug_sink::*;
}
