use std::fs;
use std::path::{Path, PathBuf};

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("empty filename")]
    EmptyFilename,
    #[error("extension not allowed: {0:?}")]
    DisallowedExtension(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat on-disk store for uploaded images. Names are sanitized before any
/// write; collisions resolve last-writer-wins.
#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Last dot-separated segment, compared case-insensitively.
    pub fn allowed_file(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes
    /// `_`. Path components on either separator are stripped, as are leading
    /// dots, so the result can never escape the store root.
    pub fn sanitize_filename(filename: &str) -> String {
        let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        let cleaned: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        cleaned.trim_start_matches('.').to_string()
    }

    /// Validates, sanitizes, writes, and returns the resolved path. The store
    /// directory is created on first use.
    pub fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        if filename.is_empty() {
            return Err(StorageError::EmptyFilename);
        }
        if !Self::allowed_file(filename) {
            let ext = filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_string())
                .unwrap_or_default();
            return Err(StorageError::DisallowedExtension(ext));
        }

        let safe_name = Self::sanitize_filename(filename);
        if safe_name.is_empty() {
            return Err(StorageError::EmptyFilename);
        }

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(&safe_name);
        fs::write(&path, data)?;
        Ok(path)
    }
}
