//! Error types for delivery event ingestion.
//!
//! The ingestion core distinguishes two failure classes: configuration
//! problems that must abort the offending call (missing credential, empty
//! topic table) and publish dispatch failures the caller should treat as a
//! failed operation. Transport failures that surface after dispatch are
//! logged by the pipeline and never reach the caller.

use thiserror::Error;

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error type for the ingestion core.
#[derive(Debug, Clone, Error)]
pub enum IngestError {
    /// A required configuration value is missing or invalid.
    ///
    /// Fatal for the offending call. Never retried by this core.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the missing or invalid configuration
        message: String,
    },

    /// Dispatching an event to the transport failed.
    ///
    /// Covers payload serialization failures and synchronous transport
    /// rejection while initiating a publish. The whole operation should be
    /// treated as failed by the caller.
    #[error("event publish failed: {message}")]
    PublishFailure {
        /// Description of the dispatch failure
        message: String,
    },
}

impl IngestError {
    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Creates a publish failure from a message.
    pub fn publish_failure(message: impl Into<String>) -> Self {
        Self::PublishFailure { message: message.into() }
    }

    /// Returns `true` for configuration errors.
    ///
    /// Configuration errors indicate the service is misconfigured and the
    /// same call will keep failing until the configuration changes.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::PublishFailure { message: format!("payload serialization failed: {err}") }
    }
}
