//! Document discovery.
//!
//! Lists every file under a directory and tells which ones the pipeline
//! would accept.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::ingest::scanner::{DiscoveredFile, Scanner};

/// Result of listing files.
#[derive(Debug, Clone, Serialize)]
pub struct FilesResult {
    pub files: Vec<DiscoveredFile>,
    pub summary: FilesSummary,
}

/// Summary of file listing.
#[derive(Debug, Clone, Serialize)]
pub struct FilesSummary {
    /// Total number of files.
    pub total: usize,
    /// Number of files the pipeline would accept.
    pub supported: usize,
    /// Number of files validation would reject.
    pub skipped: usize,
}

/// Filter options for listing files.
#[derive(Debug, Clone, Default)]
pub struct FilesFilter {
    /// Only include skipped files.
    pub skipped_only: bool,
    /// Only include supported files.
    pub supported_only: bool,
}

/// List all files under `root` with optional filtering.
pub fn list_files(root: &Path, max_file_size_bytes: u64, filter: FilesFilter) -> Result<FilesResult> {
    let scanner = Scanner::with_max_file_size(root, max_file_size_bytes);
    let mut files = scanner.scan()?;

    if filter.skipped_only {
        files.retain(|f| !f.supported);
    }
    if filter.supported_only {
        files.retain(|f| f.supported);
    }

    // Sort by path for consistent output
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let total = files.len();
    let supported = files.iter().filter(|f| f.supported).count();

    Ok(FilesResult {
        files,
        summary: FilesSummary {
            total,
            supported,
            skipped: total - supported,
        },
    })
}
