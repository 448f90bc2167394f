//! Offline provider that reads pre-computed signals from disk.
//!
//! For `photos/mug.jpg` it loads `photos/mug.jpg.signals.json`, a serialized
//! [`RawImageSignals`]. Useful for demos, fixtures and re-importing photos
//! that were annotated elsewhere.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{ImageAnalyzer, ImageRef};
use crate::error::ProviderError;
use crate::types::RawImageSignals;

pub(crate) const PROVIDER_NAME: &str = "sidecar";

const SIDECAR_SUFFIX: &str = ".signals.json";

/// Reads `<photo>.signals.json` next to each photo.
#[derive(Debug, Default)]
pub struct SidecarAnalyzer;

impl SidecarAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Location of the signals file for a photo.
    pub fn sidecar_path(photo: &Path) -> PathBuf {
        let mut name = photo.as_os_str().to_os_string();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }
}

#[async_trait]
impl ImageAnalyzer for SidecarAnalyzer {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn analyze(&self, image: &ImageRef) -> Result<RawImageSignals, ProviderError> {
        let sidecar = ImageRef::new(Self::sidecar_path(&image.path));
        let bytes = sidecar.read(PROVIDER_NAME).await?;

        serde_json::from_slice(&bytes).map_err(|e| ProviderError::MalformedImage {
            provider: PROVIDER_NAME.to_string(),
            path: sidecar.path,
            message: format!("Invalid signals file: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotation;

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            SidecarAnalyzer::sidecar_path(Path::new("/photos/mug.jpg")),
            PathBuf::from("/photos/mug.jpg.signals.json")
        );
    }

    #[tokio::test]
    async fn test_reads_signals_file() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("mug.jpg");
        std::fs::write(&photo, b"not really a jpeg").unwrap();
        std::fs::write(
            SidecarAnalyzer::sidecar_path(&photo),
            r#"{"labels":[{"description":"Mug","score":0.93}]}"#,
        )
        .unwrap();

        let signals = SidecarAnalyzer::new()
            .analyze(&ImageRef::new(&photo))
            .await
            .unwrap();
        assert_eq!(signals.labels, vec![Annotation::new("Mug", 0.93)]);
    }

    #[tokio::test]
    async fn test_missing_sidecar_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SidecarAnalyzer::new()
            .analyze(&ImageRef::new(dir.path().join("none.jpg")))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_sidecar_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("bad.jpg");
        std::fs::write(SidecarAnalyzer::sidecar_path(&photo), "{ nope").unwrap();
        let err = SidecarAnalyzer::new()
            .analyze(&ImageRef::new(&photo))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedImage { .. }));
    }
}
