//! Typed errors for the sales assistant pipeline.

use thiserror::Error;

/// Errors that can occur while setting up or invoking the assistant.
#[derive(Debug, Error)]
pub enum SalesAgentError {
    /// Missing API key, unreadable config or prompt file
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure, non-2xx status or an empty provider reply
    #[error("model call failed: {0:#}")]
    Model(#[source] anyhow::Error),

    /// Model output is not the three-field JSON object
    #[error("failed to parse model output as JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
}

impl SalesAgentError {
    /// Raw model output, when the failure happened while parsing it.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Result type alias for assistant operations.
pub type SalesResult<T> = std::result::Result<T, SalesAgentError>;
