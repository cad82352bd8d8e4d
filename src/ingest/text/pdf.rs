use std::panic::{self, AssertUnwindSafe};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{IngestError, Result};
use crate::ingest::detector::FileFormat;
use crate::ingest::text::TextParser;

static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Separator placed between consecutive pages.
const PAGE_SEPARATOR: &str = "\n\n";

/// Page-ordered PDF text extractor.
pub struct PdfParser;

impl Default for PdfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextParser for PdfParser {
    fn format(&self) -> FileFormat {
        FileFormat::Pdf
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let pages = guarded(|| pdf_extract::extract_text_from_mem_by_pages(bytes))?;

        tracing::debug!(pages = pages.len(), "extracted pdf pages");

        let text = join_pages(&pages);
        if text.is_empty() {
            return Err(IngestError::NoTextContent {
                format: FileFormat::Pdf,
            });
        }
        Ok(text)
    }
}

/// Join pages 1..N with a paragraph break, normalizing inter-word spacing
/// inside each page. Pages without text contribute nothing.
#[must_use]
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| RE_HORIZONTAL_WS.replace_all(page.as_ref(), " "))
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Run an extractor, turning both its error and a panic into a PDF parse
/// failure. pdf-extract panics on some malformed files.
///
/// The panic is still printed to stderr by the process panic hook.
fn guarded<T, E: std::fmt::Display>(
    extract: impl FnOnce() -> std::result::Result<T, E>,
) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(extract))
        .map_err(|payload| IngestError::parse(FileFormat::Pdf, panic_message(&*payload)))?
        .map_err(|e| IngestError::parse(FileFormat::Pdf, e))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "extractor panicked".to_string()
    }
}
