use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Something the pipeline can ingest: a name, a size, and bytes on demand.
///
/// `size` must be answerable without reading the content so that validation
/// can reject a file before any bytes are loaded.
pub trait SourceFile {
    /// Name used for format detection (only its extension matters).
    fn name(&self) -> &str;

    /// Size in bytes as reported by the source.
    fn size(&self) -> u64;

    /// Load the full content.
    fn read_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

/// An uploaded buffer held in memory.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl SourceFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(&self.bytes))
    }
}

/// A document on disk. The size comes from file metadata; bytes are read
/// only when the pipeline asks for them.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl DiskFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = file_name_of(&path);
        Ok(Self { path, name, size })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The name a path is ingested under: its last component, or the whole
/// path when it has none.
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

impl SourceFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn read_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Owned(std::fs::read(&self.path)?))
    }
}
