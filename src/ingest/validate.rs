use crate::error::{IngestError, Result};
use crate::ingest::detector::{detect, FileFormat};

/// Check a file by name and size alone, before any byte is read.
///
/// Checks run in order: format, empty, size limit. A file of exactly
/// `max_file_size_bytes` is accepted.
pub fn validate(file_name: &str, size: u64, max_file_size_bytes: u64) -> Result<FileFormat> {
    let format = detect(file_name).ok_or(IngestError::UnsupportedFileType)?;
    if size == 0 {
        return Err(IngestError::EmptyFile);
    }
    if size > max_file_size_bytes {
        return Err(IngestError::FileTooLarge {
            size,
            limit: max_file_size_bytes,
        });
    }
    Ok(format)
}
