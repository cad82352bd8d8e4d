pub mod docx;
pub mod pdf;
pub mod plaintext;

use crate::error::Result;
use crate::ingest::detector::FileFormat;

/// Turns the raw bytes of one document format into flat text.
///
/// Implementations are stateless. Any library failure must come back as an
/// [`crate::error::IngestError`] naming the format; nothing panics or leaks a
/// low-level error type past this boundary.
pub trait TextParser: Send + Sync {
    /// Format handled by this parser.
    fn format(&self) -> FileFormat;

    /// Extract the text content of `bytes`.
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}
