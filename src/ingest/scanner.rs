use std::path::PathBuf;

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{IngestError, Result};
use crate::ingest::detector::{detect, FileFormat};
use crate::ingest::validate::validate;

/// Why a discovered file would be rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// File extension is not a supported document format.
    UnsupportedExtension,
    /// File has zero bytes.
    Empty,
    /// File exceeds the configured size limit.
    TooLarge,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnsupportedExtension => "unsupported_extension",
            SkipReason::Empty => "empty",
            SkipReason::TooLarge => "too_large",
        }
    }

    /// The skip reason matching a validation failure, if it is one.
    #[must_use]
    pub fn from_error(err: &IngestError) -> Option<Self> {
        match err {
            IngestError::UnsupportedFileType => Some(SkipReason::UnsupportedExtension),
            IngestError::EmptyFile => Some(SkipReason::Empty),
            IngestError::FileTooLarge { .. } => Some(SkipReason::TooLarge),
            _ => None,
        }
    }
}

/// A file found under the scanned root, processable or not.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredFile {
    /// Path relative to the scan root (forward slashes).
    #[serde(rename = "file")]
    pub relative_path: String,
    /// File extension (lowercase, without dot).
    #[serde(rename = "ext")]
    pub extension: String,
    /// Detected document format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FileFormat>,
    pub size_bytes: u64,
    /// Whether the pipeline would accept the file.
    pub supported: bool,
    /// Reason why the file would be rejected (only set when supported=false).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
}

/// Parallel document scanner that respects .gitignore.
pub struct Scanner {
    root: PathBuf,
    /// Files above this many bytes are reported as too large.
    max_file_size_bytes: u64,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_size_bytes: u64::MAX,
        }
    }

    /// Create a scanner with a file size limit in bytes.
    pub fn with_max_file_size(root: impl Into<PathBuf>, max_file_size_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size_bytes,
        }
    }

    /// Walk the root and classify every regular file.
    pub fn scan(&self) -> Result<Vec<DiscoveredFile>> {
        let entries: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .hidden(true) // skip hidden dirs like .git
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .follow_links(false) // Prevent symlink loops
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                !matches!(
                    name.as_ref(),
                    "node_modules" | "target" | ".promptdoc" | ".git" | "dist" | "build"
                )
            })
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect();

        let root = &self.root;
        let max_size = self.max_file_size_bytes;
        let files: Vec<DiscoveredFile> = entries
            .par_iter()
            .filter_map(|path| {
                let size = path.metadata().ok()?.len();
                let relative = path
                    .strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/");
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                let name = path.file_name()?.to_string_lossy();
                let verdict = validate(&name, size, max_size);

                Some(DiscoveredFile {
                    relative_path: relative,
                    extension: ext,
                    format: detect(&name),
                    size_bytes: size,
                    supported: verdict.is_ok(),
                    skip_reason: verdict.as_ref().err().and_then(SkipReason::from_error),
                })
            })
            .collect();

        Ok(files)
    }
}
