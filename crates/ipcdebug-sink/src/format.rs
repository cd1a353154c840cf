use chrono::{Local, Timelike};
use ipcdebug_core::LogModule;

/// Render one persisted log line (without trailing newline).
pub fn format_line(time: &impl Timelike, module: LogModule, message: &str) -> String {
    format!(
        "[{:02}:{:02}:{:02}] [{}] {}",
        time.hour(),
        time.minute(),
        time.second(),
        module.as_str(),
        message
    )
}

/// [`format_line`] stamped with the current local time.
pub fn format_line_now(module: LogModule, message: &str) -> String {
    format_line(&Local::now(), module, message)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    #[test]
    fn pads_time_fields() {
        let time = NaiveTime::from_hms_opt(7, 5, 3).unwrap();
        assert_eq!(
            format_line(&time, LogModule::Pipe, "Pipe sender wrote data"),
            "[07:05:03] [PIPE] Pipe sender wrote data"
        );
    }

    #[test]
    fn uses_module_label() {
        let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(
            format_line(&time, LogModule::MessageQueue, "Message enqueued"),
            "[23:59:59] [MESSAGE_QUEUE] Message enqueued"
        );
    }

    #[test]
    fn now_has_expected_shape() {
        let line = format_line_now(LogModule::System, "IPC Debugger Started");
        assert_eq!(&line[0..1], "[");
        assert_eq!(&line[9..10], "]");
        assert!(line.ends_with("] [SYSTEM] IPC Debugger Started"));
    }
}
