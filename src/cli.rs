use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::client::Credentials;
use crate::config::{Config, LogExclusions, Settings};
use crate::error::{InspectError, Result};

#[derive(Debug, Parser)]
#[command(name = "wls-log-inspect")]
#[command(about = "Collect error entries from WebLogic server logs into a report", long_about = None)]
pub struct Cli {
    /// YAML or JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Admin server host and port, e.g. localhost:7001
    #[arg(long)]
    pub host: Option<String>,

    /// WebLogic user name
    #[arg(short, long)]
    pub user: Option<String>,

    /// WebLogic user password
    #[arg(long, env = "WLS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Where to write the HTML report
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Merge flags over the config file, prompting for whatever is still
    /// missing. The password prompt does not echo.
    pub fn into_settings(self) -> Result<Settings> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::default(),
        };
        if let Some(output) = self.output {
            config.output = output;
        }

        let prompting = (self.host.is_none() && config.host.is_none())
            || (self.user.is_none() && config.username.is_none())
            || self.password.is_none();
        if prompting {
            println!();
            println!("Please enter the WLS Server Details");
            println!("-------------------------------------------");
            println!();
        }

        let host = match self.host.or_else(|| config.host.clone()) {
            Some(h) => h,
            None => prompt_line("host", "Please enter the server and port e.g localhost:7001  ")?,
        };
        let username = match self.user.or_else(|| config.username.clone()) {
            Some(u) => u,
            None => prompt_line("user name", "Please enter the weblogic user name: ")?,
        };
        let password = match self.password {
            Some(p) => p,
            None => rpassword::prompt_password("Please enter the weblogic user password: ")
                .map_err(|e| InspectError::Prompt {
                    field: "password",
                    reason: e.to_string(),
                })?,
        };
        if prompting {
            println!();
        }

        resolve(config, &host, username, password)
    }
}

/// Build run settings from a loaded config and the collected inputs.
pub fn resolve(config: Config, host: &str, username: String, password: String) -> Result<Settings> {
    if host.trim().is_empty() {
        return Err(InspectError::ConfigError("server host must not be empty".to_string()));
    }
    Ok(Settings {
        base_url: config.base_url(host),
        credentials: Credentials { username, password },
        exclusions: LogExclusions::new(&config.exclude_logs)?,
        output: config.output,
    })
}

fn prompt_line(field: &'static str, prompt: &str) -> Result<String> {
    let mut stdout = io::stdout();
    let to_err = |e: io::Error| InspectError::Prompt {
        field,
        reason: e.to_string(),
    };
    stdout.write_all(prompt.as_bytes()).map_err(to_err)?;
    stdout.flush().map_err(to_err)?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).map_err(to_err)?;
    if read == 0 {
        return Err(InspectError::Prompt {
            field,
            reason: "end of input".to_string(),
        });
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "wls-log-inspect",
            "--host",
            "wls.local:7001",
            "-u",
            "weblogic",
            "--password",
            "welcome1",
            "-o",
            "out.html",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("wls.local:7001"));
        assert_eq!(cli.user.as_deref(), Some("weblogic"));
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn flags_skip_prompts() {
        let cli = Cli {
            config: None,
            host: Some("wls.local:7001".into()),
            user: Some("weblogic".into()),
            password: Some("welcome1".into()),
            output: Some(PathBuf::from("r.html")),
        };
        let settings = cli.into_settings().unwrap();
        assert_eq!(settings.base_url, "http://wls.local:7001");
        assert_eq!(settings.credentials.username, "weblogic");
        assert_eq!(settings.output, PathBuf::from("r.html"));
        assert!(settings.exclusions.is_excluded("HTTPAccessLog"));
    }

    #[test]
    fn resolve_rejects_empty_host() {
        let err = resolve(Config::default(), "  ", "u".into(), "p".into()).unwrap_err();
        assert!(matches!(err, InspectError::ConfigError(_)));
    }
}
