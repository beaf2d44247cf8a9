use std::fmt::Write;

use crate::model::Domain;

const SERVER_BORDER: &str = "+----------------------+--------------------------+----------+--------+";
const LOG_BORDER: &str = "+----------------------+-------------------------+-----------+--------+";

/// Render the server and log statistics tables as plain text.
pub fn render(domain: &Domain) -> String {
    let mut out = String::new();

    out.push_str(SERVER_BORDER);
    out.push('\n');
    server_row(&mut out, "Server", "State", "Health", "Errors");
    out.push_str(SERVER_BORDER);
    out.push('\n');
    for server in &domain.servers {
        server_row(
            &mut out,
            &server.name,
            &server.state,
            &server.health,
            &server.error_count.to_string(),
        );
    }
    out.push_str(SERVER_BORDER);
    out.push_str("\n\n\n");

    out.push_str(LOG_BORDER);
    out.push('\n');
    log_row(&mut out, "Server", "Log", "Duration", "Errors");
    out.push_str(LOG_BORDER);
    out.push('\n');
    for server in &domain.servers {
        for log in &server.logs {
            log_row(
                &mut out,
                &server.name,
                &log.name,
                &log.duration,
                &log.error_count.to_string(),
            );
        }
    }
    out.push_str(LOG_BORDER);
    out.push('\n');
    out
}

fn server_row(out: &mut String, name: &str, state: &str, health: &str, errors: &str) {
    let _ = writeln!(out, "| {name:20.20} | {state:24.24} | {health:8.8} | {errors:>6.6} |");
}

fn log_row(out: &mut String, server: &str, log: &str, duration: &str, errors: &str) {
    let _ = writeln!(out, "| {server:20.20} | {log:23.23} | {duration:9.9} | {errors:>6.6} |");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Log, LogEntry, Server};

    fn sample() -> Domain {
        let mut domain = Domain::new();
        let mut admin = Server::new("AdminServer", "u");
        admin.state = "running".into();
        admin.health = "ok".into();
        admin.add_log(Log::new("ServerLog", "u"));
        admin.record_entry(
            0,
            LogEntry {
                severity: "Error".into(),
                timestamp: "t".into(),
                message: "m".into(),
            },
        );
        admin.logs[0].duration = "00:00:01".into();
        domain.add_server(admin);

        let mut ms = Server::new("a_very_long_managed_server_name", "u");
        ms.state = "shutdown".into();
        domain.add_server(ms);
        domain
    }

    #[test]
    fn rows_have_fixed_width() {
        let text = render(&sample());
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        for line in &lines[..6] {
            assert_eq!(line.len(), SERVER_BORDER.len(), "{line}");
        }
        for line in &lines[6..] {
            assert_eq!(line.len(), LOG_BORDER.len(), "{line}");
        }
    }

    #[test]
    fn long_names_are_truncated() {
        let text = render(&sample());
        assert!(text.contains("| a_very_long_managed_ | shutdown"));
        assert!(!text.contains("a_very_long_managed_server_name"));
    }

    #[test]
    fn counts_are_right_aligned() {
        let text = render(&sample());
        assert!(text.contains("| AdminServer          | running                  | ok       |      1 |"));
        assert!(text.contains("| AdminServer          | ServerLog               | 00:00:01  |      1 |"));
    }
}
