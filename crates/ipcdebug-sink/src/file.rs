use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use ipcdebug_core::{EventSink, LogModule, SinkError};

use crate::format::format_line_now;

/// Default persisted log location, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "ipc_log.txt";

/// Appends one timestamped line per event to a text file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSink {
    /// The file is created on first write, not here.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for FileSink {
    fn write_event(&self, module: LogModule, message: &str) -> Result<(), SinkError> {
        let line = format_line_now(module, message);
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| SinkError::Unavailable {
                target: self.path.display().to_string(),
                source,
            })?;
        writeln!(file, "{line}")?;
        tracing::trace!(path = %self.path.display(), %line, "event persisted");
        Ok(())
    }
}
