use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use ipcdebug_core::{CapacityReport, DashboardCounters, ThreadRecord};
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Pretty
        }
    }
}

#[derive(Serialize)]
struct EventOutput<'a> {
    seq: usize,
    description: &'a str,
}

/// Everything a batch run prints at the end.
#[derive(Serialize)]
pub struct Report<'a> {
    pub counters: DashboardCounters,
    pub threads: &'a [ThreadRecord],
    pub events: &'a [String],
    pub capacity: CapacityReport,
}

pub fn render_dashboard(counters: &DashboardCounters, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(counters),
        OutputFormat::Table => {
            let mut table = new_table(vec!["CHANNEL", "OPS"]);
            table
                .add_row(vec!["Pipe".to_string(), counters.pipe_ops.to_string()])
                .add_row(vec![
                    "Message Queue".to_string(),
                    counters.queue_ops.to_string(),
                ])
                .add_row(vec![
                    "Shared Memory".to_string(),
                    counters.shm_ops.to_string(),
                ]);
            table.to_string()
        }
        OutputFormat::Pretty => [
            "========== IPC DASHBOARD ==========".to_string(),
            format!("Pipe Ops        : {}", counters.pipe_ops),
            format!("Message Queue   : {}", counters.queue_ops),
            format!("Shared Memory   : {}", counters.shm_ops),
            "===================================".to_string(),
        ]
        .join("\n"),
    }
}

pub fn render_threads(threads: &[ThreadRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&threads),
        OutputFormat::Table => {
            let mut table = new_table(vec!["ID", "NAME", "STATE"]);
            for thread in threads {
                table.add_row(vec![
                    thread.id.to_string(),
                    thread.name.clone(),
                    thread.state.to_string(),
                ]);
            }
            table.to_string()
        }
        OutputFormat::Pretty => {
            let mut lines = vec!["------ THREAD TABLE ------".to_string()];
            lines.extend(threads.iter().map(|thread| {
                format!(
                    "ID:{} Name:{} State:{}",
                    thread.id, thread.name, thread.state
                )
            }));
            lines.join("\n")
        }
    }
}

pub fn render_events(events: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let out: Vec<EventOutput<'_>> = events
                .iter()
                .enumerate()
                .map(|(i, description)| EventOutput {
                    seq: i + 1,
                    description,
                })
                .collect();
            to_json(&out)
        }
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "EVENT"]);
            for (i, event) in events.iter().enumerate() {
                table.add_row(vec![(i + 1).to_string(), event.clone()]);
            }
            table.to_string()
        }
        OutputFormat::Pretty => {
            let mut lines = vec!["------ EVENT HISTORY ------".to_string()];
            lines.extend(
                events
                    .iter()
                    .enumerate()
                    .map(|(i, event)| format!("{}. {event}", i + 1)),
            );
            lines.join("\n")
        }
    }
}

pub fn render_report(report: &Report<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Table | OutputFormat::Pretty => {
            let capacity = &report.capacity;
            let mut sections = vec![
                render_dashboard(&report.counters, format),
                render_threads(report.threads, format),
                render_events(report.events, format),
            ];
            if capacity.threads_dropped > 0
                || capacity.events_dropped > 0
                || capacity.sink_failures > 0
            {
                sections.push(format!(
                    "dropped: threads={} events={} unpersisted={}",
                    capacity.threads_dropped, capacity.events_dropped, capacity.sink_failures
                ));
            }
            sections.join("\n\n")
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use ipcdebug_core::ThreadState;

    use super::*;

    fn sample_threads() -> Vec<ThreadRecord> {
        vec![
            ThreadRecord {
                id: 1,
                name: "Pipe-Sender".to_string(),
                state: ThreadState::Terminated,
            },
            ThreadRecord {
                id: 2,
                name: "Pipe-Receiver".to_string(),
                state: ThreadState::Running,
            },
        ]
    }

    #[test]
    fn pretty_dashboard_lists_all_counters() {
        let out = render_dashboard(
            &DashboardCounters {
                pipe_ops: 1,
                queue_ops: 2,
                shm_ops: 3,
            },
            OutputFormat::Pretty,
        );
        assert!(out.contains("Pipe Ops        : 1"));
        assert!(out.contains("Message Queue   : 2"));
        assert!(out.contains("Shared Memory   : 3"));
    }

    #[test]
    fn json_dashboard_uses_field_names() {
        let out = render_dashboard(&DashboardCounters::default(), OutputFormat::Json);
        assert_eq!(out, r#"{"pipe_ops":0,"queue_ops":0,"shm_ops":0}"#);
    }

    #[test]
    fn thread_table_formats() {
        let threads = sample_threads();
        let pretty = render_threads(&threads, OutputFormat::Pretty);
        assert!(pretty.contains("ID:1 Name:Pipe-Sender State:TERMINATED"));

        let table = render_threads(&threads, OutputFormat::Table);
        assert!(table.contains("Pipe-Receiver"));
        assert!(table.contains("RUNNING"));

        let json = render_threads(&threads, OutputFormat::Json);
        assert!(json.contains(r#""state":"terminated""#));
    }

    #[test]
    fn events_are_numbered_from_one() {
        let events = vec!["first".to_string(), "second".to_string()];
        let pretty = render_events(&events, OutputFormat::Pretty);
        assert!(pretty.contains("1. first"));
        assert!(pretty.contains("2. second"));

        let json = render_events(&events, OutputFormat::Json);
        assert_eq!(
            json,
            r#"[{"seq":1,"description":"first"},{"seq":2,"description":"second"}]"#
        );
    }

    #[test]
    fn empty_event_history_renders_header_only() {
        assert_eq!(
            render_events(&[], OutputFormat::Pretty),
            "------ EVENT HISTORY ------"
        );
    }
}
