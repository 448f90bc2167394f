//! Photo checks that run before any provider call.

use std::io::Read;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{RegistryError, Result};

/// Validates photo files before they are analyzed or attached.
pub struct PhotoValidator {
    limits: LimitsConfig,
}

impl PhotoValidator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Validate the photo list of one ingestion.
    ///
    /// Rejects an empty list, more than `max_photos_per_item` photos, and
    /// any photo that fails [`validate`](Self::validate).
    pub fn validate_all<P: AsRef<Path>>(&self, photos: &[P]) -> Result<()> {
        if photos.is_empty() {
            return Err(RegistryError::Validation("No photos supplied".to_string()));
        }
        if photos.len() > self.limits.max_photos_per_item {
            return Err(RegistryError::Validation(format!(
                "{} photos supplied, at most {} allowed per item",
                photos.len(),
                self.limits.max_photos_per_item
            )));
        }
        photos.iter().try_for_each(|p| self.validate(p.as_ref()))
    }

    /// Checks:
    /// - File exists and is readable
    /// - File size is within limits
    /// - File has valid image magic bytes
    pub fn validate(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(rejected(path, "file not found"));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| rejected(path, &format!("cannot read metadata: {e}")))?;

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(rejected(
                path,
                &format!(
                    "file too large ({} MB, max {} MB)",
                    metadata.len() / (1024 * 1024),
                    self.limits.max_file_size_mb
                ),
            ));
        }

        let mut file = std::fs::File::open(path)
            .map_err(|e| rejected(path, &format!("cannot open file: {e}")))?;
        let mut header = [0u8; 12];
        let bytes_read = file.read(&mut header).unwrap_or(0);

        if !is_image_header(&header, bytes_read) {
            return Err(rejected(path, "unrecognized image format"));
        }
        Ok(())
    }
}

fn rejected(path: &Path, reason: &str) -> RegistryError {
    RegistryError::Validation(format!("{}: {reason}", path.display()))
}

/// Check if the header bytes match a format the providers accept.
fn is_image_header(header: &[u8; 12], bytes_read: usize) -> bool {
    if bytes_read < 4 {
        return false;
    }

    // JPEG: FF D8 FF
    if header[..3] == [0xFF, 0xD8, 0xFF] {
        return true;
    }

    // PNG: 89 50 4E 47
    if header[..4] == [0x89, b'P', b'N', b'G'] {
        return true;
    }

    // GIF: GIF8
    if &header[..4] == b"GIF8" {
        return true;
    }

    // WebP: RIFF....WEBP
    if &header[..4] == b"RIFF" {
        return bytes_read >= 12 && &header[8..12] == b"WEBP";
    }

    // BMP: BM
    if &header[..2] == b"BM" {
        return true;
    }

    // HEIC/HEIF: ftyp box at offset 4
    bytes_read >= 12 && &header[4..8] == b"ftyp"
}
