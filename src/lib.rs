//! Error-log inspection for WebLogic domains over the management REST API.
//!
//! The run is one pass: discover servers, list their logs, fetch each log and
//! keep the `Error` entries, then hand the finished [`model::Domain`] to the
//! console and HTML renderers.

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod html;
pub mod model;

use crate::client::ManagementClient;
use crate::config::Settings;
use crate::discovery::Discovery;
use crate::error::Result;
use crate::model::Domain;

/// Run the full discovery pipeline against the configured admin server.
pub async fn inspect(settings: &Settings) -> Result<Domain> {
    let client = ManagementClient::new(settings.credentials.clone());
    Discovery::new(client, settings.base_url.clone(), settings.exclusions.clone())
        .run()
        .await
}
