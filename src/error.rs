use thiserror::Error;

use crate::{config::Config, traits::DisplayTerminal};

/// Every way a single search can fail.
///
/// An empty result set is not an error, it is delivered as a successful
/// outcome with no records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no network connection available")]
    NoConnectivity,
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("server responded with status {0}")]
    HttpStatus(u16),
    #[error("server returned an empty response")]
    EmptyResponse,
    #[error("response is not valid JSON: {0}")]
    MalformedJson(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Self::HttpStatus(status.as_u16());
        }
        if e.is_timeout() {
            return Self::NetworkFailure(format!("request timed out: {e}"));
        }
        Self::NetworkFailure(e.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedJson(e.to_string())
    }
}

impl DisplayTerminal for SearchError {
    fn fmt_to_string(&self, config: &Config) -> String {
        match self {
            Self::NoConnectivity => config.output_empty.format_str("No internet connection."),
            e => config.output_error.format_str(e),
        }
    }
}
