use std::time::Instant;

use tracing::{info, warn};

use crate::client::ManagementClient;
use crate::config::LogExclusions;
use crate::error::{InspectError, Result};
use crate::model::{
    Domain, Link, LinkList, Log, LogEntry, LogItems, Server, ServerDetail,
};

pub const SERVERS_PATH: &str = "/management/wls/latest/servers";
pub const ERROR_SEVERITY: &str = "Error";

const REL_PARENT: &str = "parent";
const REL_LOGS: &str = "logs";
const REL_LOG_ITEM: &str = "items.name";

/// Discovery pipeline: walks servers, their logs and the log entries,
/// collecting error-severity records into a [`Domain`].
///
/// Every request is awaited before the next one is issued.
pub struct Discovery {
    client: ManagementClient,
    base_url: String,
    exclusions: LogExclusions,
}

impl Discovery {
    pub fn new(
        client: ManagementClient,
        base_url: impl Into<String>,
        exclusions: LogExclusions,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            exclusions,
        }
    }

    /// Run all three phases. The first failed request aborts the run.
    pub async fn run(&self) -> Result<Domain> {
        let mut domain = Domain::new();
        self.list_servers(&mut domain).await?;

        for server in domain.servers.iter_mut() {
            self.list_logs(server).await?;
        }
        for server in domain.servers.iter_mut() {
            self.fetch_entries(server).await?;
        }

        info!(
            servers = domain.servers.len(),
            errors = domain.total_errors(),
            "inspection finished"
        );
        Ok(domain)
    }

    pub async fn list_servers(&self, domain: &mut Domain) -> Result<()> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), SERVERS_PATH);
        let list: LinkList = self.client.fetch_json(&url).await?;

        for link in list.links.iter().filter(|l| l.rel != REL_PARENT) {
            let name = titled(link, &url)?;
            domain.add_server(Server::new(name, link.uri.clone()));
        }
        info!(count = domain.servers.len(), "servers discovered");
        Ok(())
    }

    /// Read state and health, then the log list if the server is running.
    pub async fn list_logs(&self, server: &mut Server) -> Result<()> {
        let detail: ServerDetail = self.client.fetch_json(&server.url).await?;
        server.state = detail.item.state;

        if !server.is_running() {
            info!(server = %server.name, state = %server.state, "server not running, skipping logs");
            return Ok(());
        }

        let health = detail
            .item
            .health
            .ok_or_else(|| InspectError::malformed(&server.url, "running server has no health"))?;
        server.health = health.state;

        let logs_url = detail
            .links
            .iter()
            .find(|l| l.rel == REL_LOGS)
            .map(|l| l.uri.clone())
            .ok_or_else(|| InspectError::MissingLink {
                rel: REL_LOGS.to_string(),
                url: server.url.clone(),
            })?;

        let list: LinkList = self.client.fetch_json(&logs_url).await?;
        for link in list.links.iter().filter(|l| l.rel == REL_LOG_ITEM) {
            let name = titled(link, &logs_url)?;
            if self.exclusions.is_excluded(&name) {
                continue;
            }
            server.add_log(Log::new(name, link.uri.clone()));
        }
        Ok(())
    }

    /// Fetch every log of a running server, keeping only `Error` entries.
    pub async fn fetch_entries(&self, server: &mut Server) -> Result<()> {
        if !server.is_running() {
            return Ok(());
        }

        for idx in 0..server.logs.len() {
            let url = server.logs[idx].url.clone();
            info!("Reading {} : {}", server.name, server.logs[idx].name);

            let started = Instant::now();
            let body: LogItems = self.client.fetch_json(&url).await?;
            for item in body.items {
                if item.severity != ERROR_SEVERITY {
                    continue;
                }
                let (Some(timestamp), Some(message)) = (item.time_stamp, item.message) else {
                    return Err(InspectError::malformed(
                        &url,
                        "error entry without timeStamp or message",
                    ));
                };
                server.record_entry(
                    idx,
                    LogEntry {
                        severity: item.severity,
                        timestamp,
                        message,
                    },
                );
            }
            let elapsed = started.elapsed().as_secs();
            server.logs[idx].duration = format_duration(elapsed);

            if server.logs[idx].error_count > 0 {
                warn!(
                    server = %server.name,
                    log = %server.logs[idx].name,
                    errors = server.logs[idx].error_count,
                    "errors found"
                );
            }
        }
        Ok(())
    }
}

fn titled(link: &Link, url: &str) -> Result<String> {
    link.title
        .clone()
        .ok_or_else(|| InspectError::malformed(url, format!("'{}' link without title", link.rel)))
}

/// Whole seconds as `HH:MM:SS`; hours keep growing past 99.
pub fn format_duration(seconds: u64) -> String {
    let (minutes, secs) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
