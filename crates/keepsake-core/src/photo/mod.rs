//! Photo files: discovery, validation and the records attached to items.

pub mod discovery;
pub mod hash;
pub mod validate;

pub use discovery::PhotoDiscovery;
pub use validate::PhotoValidator;

use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

use crate::error::{RegistryError, Result};
use crate::types::Photo;

/// Build the photo records for one item. The first photo is primary.
pub fn photo_records<P: AsRef<Path>>(paths: &[P], now: DateTime<Utc>) -> Result<Vec<Photo>> {
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let path = path.as_ref();
            let content_hash = hash::content_hash(path).map_err(|e| {
                RegistryError::Validation(format!("{}: cannot hash file: {e}", path.display()))
            })?;
            Ok(Photo {
                id: Uuid::new_v4(),
                file_path: std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                content_hash,
                is_primary: index == 0,
                added_at: now,
            })
        })
        .collect()
}
