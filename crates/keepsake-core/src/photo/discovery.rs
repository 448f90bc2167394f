//! Expanding photo arguments into image files.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::PhotosConfig;

/// Finds supported photos at a path.
pub struct PhotoDiscovery {
    config: PhotosConfig,
}

impl PhotoDiscovery {
    pub fn new(config: PhotosConfig) -> Self {
        Self { config }
    }

    /// Discover photos at a path.
    ///
    /// A file is returned as is, even with an unsupported extension, so the
    /// validator can report it. A directory is walked recursively and only
    /// supported files are kept, sorted by path.
    pub fn discover(&self, path: &Path) -> Vec<PathBuf> {
        if !path.is_dir() {
            return vec![path.to_path_buf()];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        files
    }

    /// Discover photos across several arguments, keeping argument order.
    pub fn discover_all<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<PathBuf> {
        paths
            .iter()
            .flat_map(|p| self.discover(p.as_ref()))
            .collect()
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
