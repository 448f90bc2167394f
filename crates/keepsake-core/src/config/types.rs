//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the item store
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.keepsake"),
        }
    }
}

/// Image-analysis provider selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// "google-vision" or "sidecar"
    pub kind: String,

    /// Google Cloud Vision settings
    pub google_vision: GoogleVisionConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: "google-vision".to_string(),
            google_vision: GoogleVisionConfig::default(),
        }
    }
}

/// Google Cloud Vision configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleVisionConfig {
    /// API endpoint
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Maximum labels/objects requested per photo
    pub max_results: u32,
}

impl Default for GoogleVisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://vision.googleapis.com/v1".to_string(),
            api_key: "${GOOGLE_VISION_API_KEY}".to_string(),
            max_results: 10,
        }
    }
}

/// Resource limits for ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum photos attached to one item
    pub max_photos_per_item: usize,

    /// Maximum photo size in megabytes
    pub max_file_size_mb: u64,

    /// Image-analysis call timeout in milliseconds
    pub provider_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_photos_per_item: 10,
            max_file_size_mb: 10,
            provider_timeout_ms: 30000,
        }
    }
}

/// Photo discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    /// Extensions picked up when a directory is ingested
    pub supported_formats: Vec<String>,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            supported_formats: ["jpg", "jpeg", "png", "webp", "gif", "bmp", "heic"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
