use ipcdebug_core::{ChannelKind, Debugger};

use crate::cmd::RunArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{render_report, OutputFormat, Report};

pub fn run(args: RunArgs, debugger: Debugger, format: OutputFormat) -> CliResult<i32> {
    debugger.startup_event();

    for channel in args.channels {
        let kind = ChannelKind::from(channel);
        tracing::info!(channel = %kind, "running exchange");
        debugger.run(kind);
    }
    if args.deadlock {
        debugger.simulate_deadlock();
    }

    debugger.shutdown_event();

    let threads = debugger.thread_snapshot();
    let events = debugger.event_snapshot();
    let report = Report {
        counters: debugger.dashboard_counters(),
        threads: &threads,
        events: &events,
        capacity: debugger.capacity_report(),
    };
    println!("{}", render_report(&report, format));

    Ok(SUCCESS)
}
