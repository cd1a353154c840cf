//! Append-only log file sink for ipcdebug events.
//!
//! Every event becomes one line, `[HH:MM:SS] [MODULE] message`, stamped with
//! local wall-clock time. The file is opened in append mode for each line and
//! closed again, so an external `tail -f` sees complete lines only.

pub mod file;
pub mod format;

pub use file::{FileSink, DEFAULT_LOG_FILE};
pub use format::{format_line, format_line_now};
