use crate::error::{IngestError, Result};
use crate::ingest::detector::FileFormat;
use crate::ingest::text::TextParser;

const UTF8_BOM: &str = "\u{feff}";

/// Verbatim UTF-8 decoder for plain text and Markdown files.
pub struct PlaintextParser {
    format: FileFormat,
}

impl PlaintextParser {
    #[must_use]
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }
}

impl TextParser for PlaintextParser {
    fn format(&self) -> FileFormat {
        self.format
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes).map_err(|e| IngestError::parse(self.format, e))?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        if text.trim().is_empty() {
            return Err(IngestError::no_text(self.format));
        }
        Ok(text.to_string())
    }
}
