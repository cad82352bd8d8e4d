use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{IngestError, Result};
use crate::ingest::detector::FileFormat;
use crate::models::section::SectionMap;

/// Facts about one uploaded file, fixed at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub file_name: String,
    pub file_format: FileFormat,
    pub file_size_bytes: u64,
    pub observed_at: DateTime<Utc>,
    /// SHA-256 of the raw bytes (hex).
    pub content_hash: String,
}

impl DocumentMetadata {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        file_format: FileFormat,
        file_size_bytes: u64,
        content_hash: String,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_format,
            file_size_bytes,
            observed_at: Utc::now(),
            content_hash,
        }
    }

    /// Metadata for `bytes` as read from the source: size and hash are taken
    /// from the bytes themselves.
    #[must_use]
    pub fn for_bytes(file_name: impl Into<String>, file_format: FileFormat, bytes: &[u8]) -> Self {
        Self::new(file_name, file_format, bytes.len() as u64, content_hash(bytes))
    }
}

/// Hex SHA-256 of a document's raw bytes.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Result of running a format parser over a file's bytes.
#[derive(Debug)]
pub enum ParseOutcome {
    Success {
        text: String,
        metadata: DocumentMetadata,
    },
    Failure {
        reason: IngestError,
        metadata: Option<DocumentMetadata>,
    },
}

impl ParseOutcome {
    /// Wrap a raw extraction result.
    ///
    /// Text that is empty or whitespace-only never becomes a `Success`; it is
    /// reclassified as the format's "no text" failure.
    #[must_use]
    pub fn from_extraction(extracted: Result<String>, metadata: DocumentMetadata) -> Self {
        match extracted {
            Ok(text) if text.trim().is_empty() => ParseOutcome::Failure {
                reason: IngestError::no_text(metadata.file_format),
                metadata: Some(metadata),
            },
            Ok(text) => ParseOutcome::Success { text, metadata },
            Err(reason) => ParseOutcome::Failure {
                reason,
                metadata: Some(metadata),
            },
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    /// Human-readable failure reason, if this is a failure.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            ParseOutcome::Success { .. } => None,
            ParseOutcome::Failure { reason, .. } => Some(reason.to_string()),
        }
    }

    pub fn into_result(self) -> Result<(String, DocumentMetadata)> {
        match self {
            ParseOutcome::Success { text, metadata } => Ok((text, metadata)),
            ParseOutcome::Failure { reason, .. } => Err(reason),
        }
    }
}

/// The structured text handed to the prompt generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledDocument {
    pub body: String,
    pub metadata: DocumentMetadata,
    pub sections: SectionMap,
    /// Rough prompt-token cost of `body`.
    pub estimated_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(format: FileFormat) -> DocumentMetadata {
        DocumentMetadata::new("doc", format, 10, "00".into())
    }

    #[test]
    fn metadata_for_bytes() {
        let m = DocumentMetadata::for_bytes("brief.md", FileFormat::Md, b"");
        assert_eq!(m.file_size_bytes, 0);
        assert_eq!(
            m.content_hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(content_hash(b"hello"), content_hash(b"world"));
    }

    #[test]
    fn success_requires_visible_text() {
        let ok = ParseOutcome::from_extraction(Ok("hello".into()), meta(FileFormat::Txt));
        assert!(ok.is_success());
        assert!(ok.reason().is_none());

        let blank = ParseOutcome::from_extraction(Ok(" \n\t ".into()), meta(FileFormat::Txt));
        assert!(!blank.is_success());
        assert_eq!(blank.reason().as_deref(), Some("file is empty"));
    }

    #[test]
    fn blank_binary_formats_report_no_text() {
        let outcome = ParseOutcome::from_extraction(Ok(String::new()), meta(FileFormat::Pdf));
        assert_eq!(
            outcome.reason().as_deref(),
            Some("no text content found in PDF file")
        );
    }

    #[test]
    fn failure_keeps_metadata() {
        let outcome = ParseOutcome::from_extraction(
            Err(IngestError::parse(FileFormat::Docx, "bad zip")),
            meta(FileFormat::Docx),
        );
        match outcome {
            ParseOutcome::Failure { reason, metadata } => {
                assert_eq!(reason.to_string(), "failed to parse DOCX file: bad zip");
                assert_eq!(metadata.map(|m| m.file_format), Some(FileFormat::Docx));
            }
            ParseOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let json = serde_json::to_value(meta(FileFormat::Md)).unwrap();
        assert_eq!(json["fileName"], "doc");
        assert_eq!(json["fileFormat"], "md");
        assert_eq!(json["fileSizeBytes"], 10);
        assert!(json["observedAt"].is_string());
    }
}
