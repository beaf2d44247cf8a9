use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::client::Credentials;
use crate::error::{InspectError, Result};

pub const DEFAULT_REPORT_FILE: &str = "errorReport.html";

/// Log streams that are never fetched: JMS message logs and HTTP access logs
/// are high volume and carry no severity. Always applied; `exclude_logs` in
/// the config file only adds to them.
pub const DEFAULT_EXCLUDE_LOGS: &[&str] = &["JMSMessageLog*", "HTTPAccessLog*"];

/// Optional file configuration. Anything left out is taken from the command
/// line or prompted for.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: Option<String>,
    pub username: Option<String>,
    pub scheme: String,
    pub output: PathBuf,
    pub exclude_logs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            scheme: "http".to_string(),
            output: PathBuf::from(DEFAULT_REPORT_FILE),
            exclude_logs: Vec::new(),
        }
    }
}

impl Config {
    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            InspectError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let cfg: Config = match ext.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .map_err(|e| InspectError::ConfigError(format!("{}: {e}", path.display())))?,
            Some("json") => serde_json::from_str(&text)
                .map_err(|e| InspectError::ConfigError(format!("{}: {e}", path.display())))?,
            _ => {
                return Err(InspectError::ConfigError(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(InspectError::ConfigError(format!(
                "scheme must be http or https, got: {}",
                self.scheme
            )));
        }
        LogExclusions::new(&self.exclude_logs)?;
        Ok(())
    }

    /// Base URL of the admin server, e.g. `http://localhost:7001`.
    pub fn base_url(&self, host: &str) -> String {
        let host = host.trim().trim_end_matches('/');
        format!("{}://{}", self.scheme, host)
    }
}

/// Everything one run needs, after file, flags and prompts are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub credentials: Credentials,
    pub output: PathBuf,
    pub exclusions: LogExclusions,
}

/// Compiled set of log-name patterns to leave out of discovery.
#[derive(Debug, Clone)]
pub struct LogExclusions {
    set: GlobSet,
}

impl LogExclusions {
    /// Built-in exclusions plus `extra` user patterns.
    pub fn new(extra: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let builtin = DEFAULT_EXCLUDE_LOGS.iter().copied();
        for pat in builtin.chain(extra.iter().map(String::as_str)) {
            let glob = Glob::new(pat).map_err(|e| {
                InspectError::ConfigError(format!("invalid exclude pattern {pat}: {e}"))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| InspectError::ConfigError(e.to_string()))?;
        Ok(Self { set })
    }

    pub fn is_excluded(&self, log_name: &str) -> bool {
        self.set.is_match(log_name)
    }
}
