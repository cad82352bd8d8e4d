use std::path::Path;

use serde::{Deserialize, Serialize};

/// Every document format the pipeline can turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Docx,
    Txt,
    Md,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Pdf,
        FileFormat::Docx,
        FileFormat::Txt,
        FileFormat::Md,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Docx => "docx",
            FileFormat::Txt => "txt",
            FileFormat::Md => "md",
        }
    }

    /// Upper-case name used in user-facing failure reasons.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "PDF",
            FileFormat::Docx => "DOCX",
            FileFormat::Txt => "TXT",
            FileFormat::Md => "MD",
        }
    }

    /// File extensions (lowercase, without dot) mapped to this format.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileFormat::Pdf => &["pdf"],
            FileFormat::Docx => &["docx"],
            FileFormat::Txt => &["txt"],
            FileFormat::Md => &["md", "markdown"],
        }
    }

    /// Whether the bytes are decoded verbatim as UTF-8.
    #[must_use]
    pub fn is_plain_text(&self) -> bool {
        matches!(self, FileFormat::Txt | FileFormat::Md)
    }

    /// Map a bare extension to a format, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileFormat::Pdf),
            "docx" => Some(FileFormat::Docx),
            "txt" => Some(FileFormat::Txt),
            "md" | "markdown" => Some(FileFormat::Md),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the format of a file from its name alone. No content sniffing.
#[must_use]
pub fn detect(file_name: &str) -> Option<FileFormat> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileFormat::from_extension)
}
