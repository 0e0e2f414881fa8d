use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Failure talking to the restaurant backend. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{detail}")]
    Status {
        status: StatusCode,
        detail: String,
    },
    #[error("Unexpected response from the restaurant service")]
    Decode(#[source] reqwest::Error),
    #[error("Invalid backend URL {0}")]
    InvalidBaseUrl(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ApiError {
    pub fn transport(source: reqwest::Error, fallback: &str) -> Self {
        Self::Transport {
            message: fallback.to_string(),
            source,
        }
    }

    /// Builds a status error from a non-2xx body, using its `detail` string when there is one.
    pub fn from_body(status: StatusCode, body: &[u8], fallback: &str) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| d.as_str().map(str::to_string))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Self::Status { status, detail }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
