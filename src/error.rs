use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::detector::FileFormat;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported file type")]
    UnsupportedFileType,

    #[error("file is empty")]
    EmptyFile,

    /// A text file that decoded fine but holds only whitespace.
    #[error("file is empty")]
    BlankText { format: FileFormat },

    #[error("file exceeds size limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("no text content found in {} file", .format.label())]
    NoTextContent { format: FileFormat },

    #[error("failed to parse {} file: {cause}", .format.label())]
    Parse { format: FileFormat, cause: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Coarse classification of an [`IngestError`], used by failure sinks and callers
/// deciding how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input shape; rejected before any parsing.
    Validation,
    /// The format library produced no text, or failed.
    Extraction,
    /// Reading the source bytes failed.
    Io,
    /// Configuration problems outside the pipeline proper.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Extraction => "extraction",
            ErrorKind::Io => "io",
            ErrorKind::Internal => "internal",
        }
    }
}

impl IngestError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::UnsupportedFileType
            | IngestError::EmptyFile
            | IngestError::FileTooLarge { .. } => ErrorKind::Validation,
            IngestError::BlankText { .. }
            | IngestError::NoTextContent { .. }
            | IngestError::Parse { .. } => ErrorKind::Extraction,
            IngestError::Io(_) => ErrorKind::Io,
            IngestError::Config(_) => ErrorKind::Internal,
        }
    }

    /// Build a parse failure for `format` from any displayable library error.
    pub fn parse(format: FileFormat, cause: impl std::fmt::Display) -> Self {
        IngestError::Parse {
            format,
            cause: cause.to_string(),
        }
    }

    /// The failure used when a format decoded fine but yielded no text.
    ///
    /// Text formats report an empty file; binary formats report that no text
    /// content could be extracted.
    #[must_use]
    pub fn no_text(format: FileFormat) -> Self {
        if format.is_plain_text() {
            IngestError::BlankText { format }
        } else {
            IngestError::NoTextContent { format }
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
