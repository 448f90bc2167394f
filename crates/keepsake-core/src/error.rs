//! Error types for the Keepsake registry.
//!
//! Errors are organized by collaborator so callers can tell a provider outage
//! from bad input or a broken store, and each variant carries the context
//! (photo path, item id, HTTP status) needed to act on it.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Top-level error type for registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The image-analysis call failed; nothing was persisted
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Input rejected before any provider or store call
    #[error("Validation error: {0}")]
    Validation(String),

    /// No item with this id
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    /// Underlying persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Image-analysis provider failures, classified by cause.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure (DNS, connection refused, reset)
    #[error("{provider}: network failure: {message}")]
    Network { provider: String, message: String },

    /// Credentials missing or rejected (HTTP 401/403)
    #[error("{provider}: authentication failed: {message}")]
    Auth { provider: String, message: String },

    /// Rate limit or quota exhausted (HTTP 429)
    #[error("{provider}: quota exceeded: {message}")]
    Quota { provider: String, message: String },

    /// The provider could not process the image
    #[error("{provider}: malformed image {path}: {message}")]
    MalformedImage {
        provider: String,
        path: PathBuf,
        message: String,
    },

    /// The call exceeded its time budget and was cancelled
    #[error("{provider}: timed out after {timeout_ms}ms analyzing {path}")]
    Timeout {
        provider: String,
        path: PathBuf,
        timeout_ms: u64,
    },

    /// Provider-side failure (HTTP 5xx)
    #[error("{provider}: service unavailable (HTTP {status_code}): {message}")]
    Unavailable {
        provider: String,
        status_code: u16,
        message: String,
    },

    /// The image could not be read from disk
    #[error("{provider}: cannot read {path}: {source}")]
    Io {
        provider: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The provider answered with something we could not interpret
    #[error("{provider}: unexpected response: {message}")]
    Response { provider: String, message: String },
}

/// Item store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store document could not be (de)serialized
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store contents violate an invariant
    #[error("Store is corrupt: {0}")]
    Corrupt(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// A string did not name a member of a fixed vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Convenience type alias for registry results.
pub type Result<T> = std::result::Result<T, RegistryError>;
