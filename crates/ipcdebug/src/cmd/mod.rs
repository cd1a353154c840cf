use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use ipcdebug_core::{ChannelKind, Debugger, DebuggerConfig};
use ipcdebug_sink::FileSink;

use crate::exit::{config_error, CliResult};
use crate::output::OutputFormat;

pub mod interactive;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Menu-driven session (default).
    Interactive,
    /// Run one or more channel exchanges and print a report.
    Run(RunArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, persist: &PersistArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Interactive => interactive::run(new_debugger(persist)?, format),
        Command::Run(args) => run::run(args, new_debugger(persist)?, format),
        Command::Version(args) => version::run(args),
    }
}

/// Where persisted event lines go.
#[derive(Args, Debug, Clone)]
pub struct PersistArgs {
    /// Append-only event log file.
    #[arg(
        long,
        value_name = "PATH",
        env = "IPCDEBUG_LOG_FILE",
        default_value = ipcdebug_sink::DEFAULT_LOG_FILE,
        global = true
    )]
    pub log_file: PathBuf,

    /// Keep events in memory only.
    #[arg(long, global = true)]
    pub no_log_file: bool,
}

/// Debugger with capacities from the environment and, unless disabled, a file sink.
pub fn new_debugger(persist: &PersistArgs) -> CliResult<Debugger> {
    let config = DebuggerConfig::from_env().map_err(config_error)?;
    let debugger = Debugger::with_config(config);
    if persist.no_log_file {
        return Ok(debugger);
    }
    tracing::debug!(path = %persist.log_file.display(), "persisting events");
    Ok(debugger.with_sink(FileSink::new(&persist.log_file)))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    Pipe,
    #[value(alias = "mq")]
    Queue,
    #[value(alias = "shared-memory")]
    Shm,
}

impl From<ChannelArg> for ChannelKind {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Pipe => ChannelKind::Pipe,
            ChannelArg::Queue => ChannelKind::MessageQueue,
            ChannelArg::Shm => ChannelKind::SharedMemory,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Channels to exercise, in order.
    #[arg(value_enum, required = true, num_args = 1..)]
    pub channels: Vec<ChannelArg>,

    /// Append the deadlock simulation event after the exchanges.
    #[arg(long)]
    pub deadlock: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
