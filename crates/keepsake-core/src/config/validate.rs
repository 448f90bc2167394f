//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Provider kinds the analyzer factory knows how to build.
pub const KNOWN_PROVIDERS: &[&str] = &["google-vision", "sidecar"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !KNOWN_PROVIDERS.contains(&self.provider.kind.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "provider.kind must be one of {}, got '{}'",
                KNOWN_PROVIDERS.join(", "),
                self.provider.kind
            )));
        }
        if self.provider.google_vision.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "provider.google_vision.max_results must be > 0".into(),
            ));
        }
        if self.limits.max_photos_per_item == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_photos_per_item must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.provider_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.provider_timeout_ms must be > 0".into(),
            ));
        }
        if self.photos.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "photos.supported_formats must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = Config::default();
        config.provider.kind = "clarifai".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider.kind"));
    }

    #[test]
    fn test_validate_rejects_zero_photo_limit() {
        let mut config = Config::default();
        config.limits.max_photos_per_item = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_photos_per_item"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.limits.provider_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_empty_formats() {
        let mut config = Config::default();
        config.photos.supported_formats.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("supported_formats"));
    }
}
