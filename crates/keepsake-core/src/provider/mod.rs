//! Image-analysis providers.
//!
//! A provider turns one photo into [`RawImageSignals`]. The registry only
//! depends on the [`ImageAnalyzer`] trait, so tests and offline setups can
//! swap in a fake without touching the tagging code.

pub(crate) mod classify;
pub(crate) mod google;
pub(crate) mod sidecar;

pub use google::GoogleVisionAnalyzer;
pub use sidecar::SidecarAnalyzer;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::types::RawImageSignals;

/// Reference to a photo on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the image bytes.
    pub(crate) async fn read(&self, provider: &str) -> Result<Vec<u8>, ProviderError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                provider: provider.to_string(),
                path: self.path.clone(),
                source,
            })
    }
}

/// Trait that all image-analysis providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn ImageAnalyzer>` for dynamic dispatch).
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Provider name for logging (e.g., "google-vision", "sidecar").
    fn name(&self) -> &str;

    /// Analyze one photo. A single attempt; callers bound it with a timeout.
    async fn analyze(&self, image: &ImageRef) -> Result<RawImageSignals, ProviderError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured provider.
pub struct AnalyzerFactory;

impl AnalyzerFactory {
    /// Create a provider from its config section.
    ///
    /// `kind` is `"google-vision"` or `"sidecar"`.
    pub fn create(config: &ProviderConfig) -> Result<Box<dyn ImageAnalyzer>, ProviderError> {
        match config.kind.as_str() {
            google::PROVIDER_NAME => {
                let cfg = &config.google_vision;
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| ProviderError::Auth {
                    provider: google::PROVIDER_NAME.to_string(),
                    message: "API key not set. Set GOOGLE_VISION_API_KEY env var.".to_string(),
                })?;
                Ok(Box::new(GoogleVisionAnalyzer::new(
                    &cfg.endpoint,
                    &api_key,
                    cfg.max_results,
                )))
            }
            sidecar::PROVIDER_NAME => Ok(Box::new(SidecarAnalyzer::new())),
            other => Err(ProviderError::Response {
                provider: other.to_string(),
                message: format!("Unknown image-analysis provider: {other}"),
            }),
        }
    }
}
