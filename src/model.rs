use serde::Deserialize;

/// Lifecycle state reported for a server that is up and serving.
pub const STATE_RUNNING: &str = "running";

/// Root of one inspection run: every server found, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Domain {
    pub servers: Vec<Server>,
}

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_server(&mut self, server: Server) {
        self.servers.push(server);
    }

    pub fn total_errors(&self) -> usize {
        self.servers.iter().map(|s| s.error_count).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Server {
    pub name: String,
    pub url: String,
    pub state: String,
    pub health: String,
    pub error_count: usize,
    pub logs: Vec<Log>,
}

impl Server {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            state: String::new(),
            health: String::new(),
            error_count: 0,
            logs: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == STATE_RUNNING
    }

    pub fn add_log(&mut self, log: Log) {
        self.logs.push(log);
    }

    /// Appends an entry to the log at `log_index`, keeping the server total
    /// in step with the per-log counter.
    ///
    /// Panics if `log_index` is out of bounds.
    pub fn record_entry(&mut self, log_index: usize, entry: LogEntry) {
        self.logs[log_index].push_entry(entry);
        self.error_count += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Log {
    pub name: String,
    pub url: String,
    pub duration: String,
    pub error_count: usize,
    pub entries: Vec<LogEntry>,
}

impl Log {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            duration: String::new(),
            error_count: 0,
            entries: Vec::new(),
        }
    }

    fn push_entry(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        self.error_count += 1;
    }
}

/// One error-severity record copied out of a server log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: String,
    pub timestamp: String,
    pub message: String,
}

// Wire types of the management API. Only the fields the pipeline reads are
// declared; everything else in the payload is ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub rel: String,
    pub uri: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkList {
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerDetail {
    pub item: ServerItem,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerItem {
    pub state: String,
    #[serde(default)]
    pub health: Option<Health>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogItems {
    #[serde(default)]
    pub items: Vec<LogItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogItem {
    pub severity: String,
    #[serde(default, rename = "timeStamp")]
    pub time_stamp: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
