use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{InspectError, Result};

/// Username/password pair sent as HTTP Basic auth on every request.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Blocking-style access to the management REST API: one GET per call,
/// awaited to completion, no caching or retry.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: HttpClient,
    credentials: Credentials,
}

impl ManagementClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: HttpClient::new(),
            credentials,
        }
    }

    /// GET `url` and decode the body as `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|source| InspectError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InspectError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| InspectError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| InspectError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Credentials;

    #[test]
    fn debug_hides_password() {
        let creds = Credentials {
            username: "weblogic".to_string(),
            password: "welcome1".to_string(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("weblogic"));
        assert!(!shown.contains("welcome1"));
    }
}
