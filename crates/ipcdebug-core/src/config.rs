//! Store capacities and their environment overrides.

use crate::error::{ConfigError, Result};

/// Maximum number of thread records kept by the registry.
pub const MAX_THREADS: usize = 20;

/// Maximum number of entries kept by the in-memory event log.
pub const MAX_EVENTS: usize = 100;

/// Byte capacity of each channel's payload buffer.
pub const MAX_BUFFER: usize = 256;

const ENV_MAX_THREADS: &str = "IPCDEBUG_MAX_THREADS";
const ENV_MAX_EVENTS: &str = "IPCDEBUG_MAX_EVENTS";
const ENV_MAX_BUFFER: &str = "IPCDEBUG_MAX_BUFFER";

/// Capacities used by a [`Debugger`](crate::Debugger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebuggerConfig {
    /// Thread registry capacity. Registrations past this are dropped.
    pub max_threads: usize,
    /// Event log capacity. Appends past this are dropped.
    pub max_events: usize,
    /// Payload buffer size in bytes for every channel.
    pub max_buffer: usize,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            max_threads: MAX_THREADS,
            max_events: MAX_EVENTS,
            max_buffer: MAX_BUFFER,
        }
    }
}

impl DebuggerConfig {
    /// Defaults, overridden by `IPCDEBUG_MAX_*` environment variables when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_threads: read_usize(&lookup, ENV_MAX_THREADS)?.unwrap_or(defaults.max_threads),
            max_events: read_usize(&lookup, ENV_MAX_EVENTS)?.unwrap_or(defaults.max_events),
            max_buffer: read_usize(&lookup, ENV_MAX_BUFFER)?.unwrap_or(defaults.max_buffer),
        };
        config.validate()?;
        Ok(config)
    }

    /// Zero thread or event capacity is allowed (everything drops); a zero
    /// byte payload buffer is not.
    pub fn validate(&self) -> Result<()> {
        if self.max_buffer == 0 {
            return Err(ConfigError::InvalidBufferSize);
        }
        Ok(())
    }
}

fn read_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<usize>> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value: raw }),
    }
}
