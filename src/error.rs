use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to the preference store.
///
/// Neither variant is retried. `status` is `None` when the request never
/// produced a response (connect error, timeout).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store write failed{}: {}", status_suffix(.status), .body)]
    Write { status: Option<u16>, body: String },

    #[error("store read failed{}: {}", status_suffix(.status), .body)]
    Read { status: Option<u16>, body: String },
}

impl StoreError {
    pub fn write(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Write {
            status,
            body: body.into(),
        }
    }

    pub fn read(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Read {
            status,
            body: body.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Webhook delivery failures. Logged by the dispatcher, never propagated.
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook rejected payload (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
