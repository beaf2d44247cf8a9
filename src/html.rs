use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::Result;
use crate::model::{Domain, Log, Server};

const HEAD: &str = "<!DOCTYPE html>
<html lang='en'>
  <head>
    <meta charset='utf-8'>
    <title>WebLogic Server Log Errors</title>
    <link rel='stylesheet' href='https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css' integrity='sha384-BVYiiSIFeK1dGmJRAkycuHAHRg32OmUcww7on3RYdg4Va+PmSTsz/K68vbdEjh4u' crossorigin='anonymous'>
    <link rel='stylesheet' href='https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap-theme.min.css' integrity='sha384-rHyoN1iRsVXV4nD0JutlnGaslCJuC7uwjduW9SVrLvRYooPp2bWYgmgJQIXwl/Sp' crossorigin='anonymous'>
    <script src='https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/js/bootstrap.min.js' integrity='sha384-Tc5IQib027qvyjSMfHjOMaLkfuWVxZxUPnCJA7l2mCWNIpG9mGCD8wGNIcPD7Txa' crossorigin='anonymous'></script>
  </head>
  <body>
    <div class='container theme-showcase' role='main'>
    &nbsp;
";

const TAIL: &str = "    <script src='https://ajax.googleapis.com/ajax/libs/jquery/1.12.4/jquery.min.js'></script>
    </div>
  </body>
</html>
";

/// Render the report and write it to `path`, replacing any previous file.
///
/// The page goes to a temporary file next to `path` first and is renamed
/// into place, so the old report survives a failed write.
pub fn write_report(domain: &Domain, path: &Path) -> Result<()> {
    let page = render(domain, Local::now());
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(page.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Full HTML page: statistics panel followed by the per-entry details.
pub fn render(domain: &Domain, generated: DateTime<Local>) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(HEAD);
    stats_section(&mut out, domain, generated);
    details_section(&mut out, domain);
    out.push_str(TAIL);
    out
}

/// `warning` when the server logged errors, otherwise green/red by state.
pub fn server_row_class(server: &Server) -> &'static str {
    if server.error_count > 0 {
        "warning"
    } else if server.is_running() {
        "success"
    } else {
        "danger"
    }
}

pub fn log_row_class(log: &Log) -> &'static str {
    if log.error_count > 0 {
        "warning"
    } else {
        "success"
    }
}

fn stats_section(out: &mut String, domain: &Domain, generated: DateTime<Local>) {
    let _ = write!(
        out,
        "<div class='panel panel-primary'>
  <div class='panel-heading'>
    <h3 class='panel-title'>Server Log Statistics <small>{}</small></h3>
  </div>
  <div class='panel-body'>
",
        generated.format("%Y-%m-%d %H:%M:%S")
    );

    table_open(out, ["Server", "State", "Health", "Errors"]);
    for server in &domain.servers {
        let name = escape(&server.name);
        let name_cell = if server.error_count > 0 {
            format!("<a href='#{name}'>{name}</a>")
        } else {
            name
        };
        let _ = write!(
            out,
            "        <tr class='{}'>
          <td>{}</td>
          <td>{}</td>
          <td>{}</td>
          <td>{}</td>
        </tr>
",
            server_row_class(server),
            name_cell,
            escape(&server.state),
            escape(&server.health),
            server.error_count
        );
    }
    table_close(out);

    table_open(out, ["Server", "Log", "Duration", "Errors"]);
    for server in &domain.servers {
        for log in &server.logs {
            let server_name = escape(&server.name);
            let log_name = escape(&log.name);
            let (server_cell, log_cell) = if log.error_count > 0 {
                (
                    format!("<a href='#{server_name}'>{server_name}</a>"),
                    format!("<a href='#{}'>{log_name}</a>", anchor(server, log)),
                )
            } else {
                (server_name, log_name)
            };
            let _ = write!(
                out,
                "        <tr class='{}'>
          <td>{}</td>
          <td>{}</td>
          <td>{}</td>
          <td>{}</td>
        </tr>
",
                log_row_class(log),
                server_cell,
                log_cell,
                escape(&log.duration),
                log.error_count
            );
        }
    }
    table_close(out);

    out.push_str("  </div>\n</div>\n");
}

fn table_open(out: &mut String, headers: [&str; 4]) {
    out.push_str(
        "    <div class='col-md-8'>
      <table class='table table-bordered'>
        <thead>
          <tr>
",
    );
    for h in headers {
        let _ = writeln!(out, "            <th>{h}</th>");
    }
    out.push_str(
        "          </tr>
        </thead>
        <tbody>
",
    );
}

fn table_close(out: &mut String) {
    out.push_str(
        "        </tbody>
      </table>
    </div>
",
    );
}

fn details_section(out: &mut String, domain: &Domain) {
    for server in domain.servers.iter().filter(|s| s.error_count > 0) {
        let server_name = escape(&server.name);
        let _ = writeln!(out, "<h1>{server_name}<a name='{server_name}'></a></h1>");

        for log in server.logs.iter().filter(|l| l.error_count > 0) {
            let log_name = escape(&log.name);
            let _ = writeln!(out, "<h2>{log_name}<a name='{}'></a></h2>", anchor(server, log));

            for (n, entry) in log.entries.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "<h5>#{}/{} - {server_name} - {log_name}</h5>",
                    n + 1,
                    log.error_count
                );
                let _ = writeln!(
                    out,
                    "<pre>{} {} {}</pre><br/>",
                    escape(&entry.timestamp),
                    escape(&entry.severity),
                    escape(&entry.message)
                );
            }
        }
    }
}

fn anchor(server: &Server, log: &Log) -> String {
    escape(&format!("{}{}", server.name, log.name))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogEntry;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            severity: "Error".into(),
            timestamp: "Oct 19, 2026 10:00:00 AM".into(),
            message: message.into(),
        }
    }

    fn sample() -> Domain {
        let mut domain = Domain::new();

        let mut admin = Server::new("AdminServer", "u");
        admin.state = "running".into();
        admin.health = "ok".into();
        admin.add_log(Log::new("ServerLog", "u"));
        admin.add_log(Log::new("DomainLog", "u"));
        admin.record_entry(0, entry("<BEA-000001> first"));
        admin.record_entry(0, entry("second"));
        domain.add_server(admin);

        let mut ms1 = Server::new("ms1", "u");
        ms1.state = "running".into();
        ms1.health = "ok".into();
        ms1.add_log(Log::new("ServerLog", "u"));
        domain.add_server(ms1);

        let mut ms2 = Server::new("ms2", "u");
        ms2.state = "shutdown".into();
        domain.add_server(ms2);
        domain
    }

    #[test]
    fn row_classes_follow_counts_and_state() {
        let domain = sample();
        assert_eq!(server_row_class(&domain.servers[0]), "warning");
        assert_eq!(server_row_class(&domain.servers[1]), "success");
        assert_eq!(server_row_class(&domain.servers[2]), "danger");
        assert_eq!(log_row_class(&domain.servers[0].logs[0]), "warning");
        assert_eq!(log_row_class(&domain.servers[0].logs[1]), "success");
    }

    #[test]
    fn details_only_cover_logs_with_errors() {
        let page = render(&sample(), Local::now());
        assert_eq!(page.matches("<h1>").count(), 1);
        assert_eq!(page.matches("<h2>").count(), 1);
        assert!(page.contains("<h1>AdminServer<a name='AdminServer'></a></h1>"));
        assert!(page.contains("<h5>#1/2 - AdminServer - ServerLog</h5>"));
        assert!(page.contains("<h5>#2/2 - AdminServer - ServerLog</h5>"));
        assert!(!page.contains("<h2>DomainLog"));
    }

    #[test]
    fn entry_text_is_escaped() {
        let page = render(&sample(), Local::now());
        assert!(page.contains("<pre>Oct 19, 2026 10:00:00 AM Error &lt;BEA-000001&gt; first</pre>"));
        assert!(!page.contains("<BEA-000001>"));
    }

    #[test]
    fn stats_rows_cover_every_server_and_log() {
        let page = render(&sample(), Local::now());
        assert_eq!(page.matches("<tr class='danger'>").count(), 1);
        // ms1 server row plus its log and the clean DomainLog
        assert_eq!(page.matches("<tr class='success'>").count(), 3);
        // AdminServer row plus its ServerLog row
        assert_eq!(page.matches("<tr class='warning'>").count(), 2);
        assert!(page.contains("<a href='#AdminServerServerLog'>ServerLog</a>"));
    }

    #[test]
    fn write_report_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errorReport.html");
        std::fs::write(&path, "previous run").unwrap();

        write_report(&sample(), &path).unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(!page.contains("previous run"));
        // only the report itself is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
