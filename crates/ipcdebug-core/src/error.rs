//! Configuration and sink errors.

use std::io;

/// Errors raised while building a [`DebuggerConfig`](crate::DebuggerConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Channel payload buffers must hold at least one byte.
    #[error("channel buffer size must be greater than zero")]
    InvalidBufferSize,

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Errors reported by an [`EventSink`](crate::EventSink).
///
/// The debugger absorbs these; they never reach the orchestrator's callers.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink destination could not be opened.
    #[error("log sink unavailable ({target}): {source}")]
    Unavailable { target: String, source: io::Error },

    /// Writing an event line failed after the destination was opened.
    #[error("log sink write failed: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
