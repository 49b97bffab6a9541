//! Error types for the dispatch engine

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Every configured sink reported itself unavailable
    #[error("There's no available log sink")]
    NoAvailableSink,

    /// Formatter failed to serialize the merged record
    #[error("Formatter error ({format_type}): {message}")]
    Render {
        format_type: String,
        message: String,
    },

    /// Dispatch body did not finish within the configured timeout
    #[error("Log dispatch timed out after {0:?}")]
    Timeout(Duration),

    /// Entry point called before a process-wide logger was installed
    #[error("Logger not initialized")]
    NotInitialized,

    /// Sink could not reach its destination
    #[error("Cannot connect to '{addr}': {message}")]
    Connection { addr: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a render error for the named format
    pub fn render(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Render {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a connection error for a sink address
    pub fn connection(addr: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Connection {
            addr: addr.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error aborted a dispatch (as opposed to a setup failure)
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            LoggerError::NoAvailableSink | LoggerError::Render { .. } | LoggerError::Timeout(_)
        )
    }
}
