//! Data file scanner
//!
//! Recursive discovery of data files under a root folder, matched by
//! extension. Results are absolute and sorted, so two scans of the same
//! tree visit files in the same order.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use sparkify_common::config::DEFAULT_DATA_EXTENSION;

/// Data file scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Root folder cannot be read
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error on the root folder
    #[error("I/O error at {0}: {1}")]
    IoError(PathBuf, String),
}

impl ScanError {
    pub fn path(&self) -> &Path {
        match self {
            ScanError::PathNotFound(p)
            | ScanError::NotADirectory(p)
            | ScanError::PermissionDenied(p)
            | ScanError::IoError(p, _) => p,
        }
    }
}

impl From<ScanError> for sparkify_common::Error {
    fn from(err: ScanError) -> Self {
        sparkify_common::Error::FileSystem {
            path: err.path().to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Files found under one root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    /// Absolute paths, sorted
    pub files: Vec<PathBuf>,
}

impl FileSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Data file scanner
pub struct FileScanner {
    extension: String,
    ignore_patterns: Vec<String>,
}

impl FileScanner {
    /// Create a scanner for `.json` files with no ignore patterns
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_DATA_EXTENSION)
    }

    /// Create a scanner for another extension (compared case-insensitively)
    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
            ignore_patterns: Vec::new(),
        }
    }

    /// Skip any file or directory whose name contains one of `patterns`
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Scan directory for data files
    pub fn scan(&self, root_path: &Path) -> Result<FileSet, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        let root = std::path::absolute(root_path)
            .map_err(|e| ScanError::IoError(root_path.to_path_buf(), e.to_string()))?;

        let mut files = Vec::new();

        // Symlinks are reported as symlinks, so linked folders are never
        // entered and linked files never pass the `is_file` check
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.is_data_file(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) if e.depth() == 0 => {
                    return Err(root_error(&root, e));
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        files.sort();

        tracing::debug!(
            root = %root.display(),
            count = files.len(),
            "Scan complete"
        );

        Ok(FileSet { files })
    }

    /// Check if entry should be processed
    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        // The root itself is never filtered
        if entry.depth() == 0 {
            return true;
        }

        let file_name = entry.file_name().to_string_lossy();
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| file_name.contains(pattern.as_str()))
    }

    /// Check extension
    fn is_data_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase() == self.extension)
            .unwrap_or(false)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn root_error(root: &Path, err: walkdir::Error) -> ScanError {
    match err.io_error().map(|io| io.kind()) {
        Some(std::io::ErrorKind::PermissionDenied) => ScanError::PermissionDenied(root.to_path_buf()),
        Some(std::io::ErrorKind::NotFound) => ScanError::PathNotFound(root.to_path_buf()),
        _ => ScanError::IoError(root.to_path_buf(), err.to_string()),
    }
}
