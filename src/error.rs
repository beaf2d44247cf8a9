use thiserror::Error;

pub type Result<T> = std::result::Result<T, InspectError>;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("HTTP error {status} from management server: {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no '{rel}' link in response from {url}")]
    MissingLink { rel: String, url: String },

    #[error("unexpected response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("could not read {field}: {reason}")]
    Prompt { field: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InspectError {
    pub fn malformed(url: &str, reason: impl Into<String>) -> Self {
        InspectError::MalformedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
