use std::io::{self, BufRead, Write};
use std::sync::Arc;

use ipcdebug_core::{ChannelKind, Debugger, Role};

use crate::exit::{io_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{render_dashboard, render_events, render_threads, OutputFormat};

const MENU: &str = "\
========== IPC DEBUGGER MENU ==========
1. Pipe IPC
2. Message Queue IPC
3. Shared Memory IPC
4. Show Dashboard
5. Show Thread Table
6. Show Event History
7. Simulate Deadlock
0. Exit
Enter choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Exchange(ChannelKind),
    Dashboard,
    Threads,
    Events,
    Deadlock,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Exchange(ChannelKind::Pipe)),
            2 => Some(Self::Exchange(ChannelKind::MessageQueue)),
            3 => Some(Self::Exchange(ChannelKind::SharedMemory)),
            4 => Some(Self::Dashboard),
            5 => Some(Self::Threads),
            6 => Some(Self::Events),
            7 => Some(Self::Deadlock),
            0 => Some(Self::Exit),
            _ => None,
        }
    }
}

pub fn run(debugger: Debugger, format: OutputFormat) -> CliResult<i32> {
    let debugger = Arc::new(debugger);
    install_ctrlc_handler(Arc::clone(&debugger))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    session(&debugger, stdin.lock(), stdout.lock(), format)
}

/// Drive the menu until `0` or end of input. The shutdown event is logged
/// either way.
fn session<R: BufRead, W: Write>(
    debugger: &Debugger,
    mut input: R,
    mut out: W,
    format: OutputFormat,
) -> CliResult<i32> {
    debugger.startup_event();
    writeln!(out, "===== IPC DEBUGGER =====").map_err(|err| io_error("write", err))?;

    let mut line = String::new();
    loop {
        write!(out, "\n{MENU}").map_err(|err| io_error("write", err))?;
        out.flush().map_err(|err| io_error("flush", err))?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|err| io_error("read input", err))?;
        if read == 0 {
            tracing::debug!("input closed");
            debugger.shutdown_event();
            writeln!(out).map_err(|err| io_error("write", err))?;
            return Ok(SUCCESS);
        }

        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "Invalid option").map_err(|err| io_error("write", err))?;
            continue;
        };

        let text = match choice {
            MenuChoice::Exchange(kind) => exchange(debugger, kind),
            MenuChoice::Dashboard => render_dashboard(&debugger.dashboard_counters(), format),
            MenuChoice::Threads => render_threads(&debugger.thread_snapshot(), format),
            MenuChoice::Events => render_events(&debugger.event_snapshot(), format),
            MenuChoice::Deadlock => {
                debugger.simulate_deadlock();
                "[DEADLOCK] Simulating circular wait...".to_string()
            }
            MenuChoice::Exit => {
                debugger.shutdown_event();
                writeln!(out, "Exiting IPC Debugger...").map_err(|err| io_error("write", err))?;
                return Ok(SUCCESS);
            }
        };
        writeln!(out, "{text}").map_err(|err| io_error("write", err))?;
    }
}

/// Run one exchange, then describe the events it appended and what the
/// reader observed. An empty observation means the reader won the lock race.
fn exchange(debugger: &Debugger, kind: ChannelKind) -> String {
    let before = debugger.events().len();
    let ops = debugger.run_collect(kind);
    let label = kind.module();

    let mut lines: Vec<String> = debugger
        .event_snapshot()
        .get(before..)
        .unwrap_or_default()
        .iter()
        .map(|event| format!("[{label}] {event}"))
        .collect();
    lines.extend(
        ops.iter()
            .filter(|op| op.role == Role::Reader)
            .map(|op| format!("[{label}] {}: {}", observation_label(kind), op.payload)),
    );
    lines.join("\n")
}

fn observation_label(kind: ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Pipe => "Receiver read",
        ChannelKind::MessageQueue => "Message dequeued",
        ChannelKind::SharedMemory => "Data read",
    }
}

fn install_ctrlc_handler(debugger: Arc<Debugger>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        debugger.shutdown_event();
        std::process::exit(SUCCESS);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
