//! Supported extensions listing.

use serde::Serialize;

use crate::ingest::detector::FileFormat;

/// Result of listing supported extensions.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedResult {
    /// The list of supported extensions.
    pub extensions: Vec<ExtensionInfo>,
    /// Maximum accepted file size in bytes.
    pub max_file_size_bytes: u64,
}

/// Information about a supported extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionInfo {
    /// The file extension (e.g., ".pdf").
    pub ext: String,
    /// The format tag (e.g., "pdf").
    pub format: FileFormat,
    /// The extraction backend (pdf-extract, ooxml, utf8).
    pub backend: String,
}

fn backend_for(format: FileFormat) -> &'static str {
    match format {
        FileFormat::Pdf => "pdf-extract",
        FileFormat::Docx => "ooxml",
        FileFormat::Txt | FileFormat::Md => "utf8",
    }
}

/// List all supported file extensions with their format and backend.
#[must_use]
pub fn list_supported(max_file_size_bytes: u64) -> SupportedResult {
    let mut infos: Vec<ExtensionInfo> = FileFormat::ALL
        .iter()
        .flat_map(|&format| {
            format.extensions().iter().map(move |e| ExtensionInfo {
                ext: format!(".{e}"),
                format,
                backend: backend_for(format).to_string(),
            })
        })
        .collect();

    infos.sort_by(|a, b| a.ext.cmp(&b.ext));

    SupportedResult {
        extensions: infos,
        max_file_size_bytes,
    }
}
