use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{IngestError, Result};
use crate::ingest::detector::FileFormat;
use crate::ingest::text::TextParser;

/// Main part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Largest decompressed `document.xml` read by default.
pub const DEFAULT_MAX_XML_BYTES: u64 = 64 * 1024 * 1024;

/// Raw-text extractor for Office Open XML documents.
///
/// Reads `word/document.xml` from the zip container and keeps only run text:
/// one line per paragraph, tabs and breaks preserved, all styling dropped.
/// The decompressed part is capped at `max_xml_bytes`.
pub struct DocxParser {
    max_xml_bytes: u64,
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxParser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_xml_bytes(DEFAULT_MAX_XML_BYTES)
    }

    #[must_use]
    pub fn with_max_xml_bytes(max_xml_bytes: u64) -> Self {
        Self { max_xml_bytes }
    }

    /// Read the document part, refusing to inflate past the cap. The size
    /// in the zip header is checked first but not trusted.
    fn read_document_part(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(parse_error)?;
        let part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| parse_error(format!("{DOCUMENT_PART}: {e}")))?;
        let limit = self.max_xml_bytes;
        let too_large = || parse_error(format!("{DOCUMENT_PART} exceeds {limit} bytes"));
        if part.size() > limit {
            return Err(too_large());
        }

        let mut xml = String::new();
        part.take(limit.saturating_add(1))
            .read_to_string(&mut xml)
            .map_err(parse_error)?;
        if xml.len() as u64 > limit {
            return Err(too_large());
        }
        Ok(xml)
    }
}

impl TextParser for DocxParser {
    fn format(&self) -> FileFormat {
        FileFormat::Docx
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let xml = self.read_document_part(bytes)?;
        let text = document_text(&xml)?;
        if text.trim().is_empty() {
            return Err(IngestError::NoTextContent {
                format: FileFormat::Docx,
            });
        }
        Ok(text)
    }
}

fn parse_error(cause: impl std::fmt::Display) -> IngestError {
    IngestError::parse(FileFormat::Docx, cause)
}

/// Collect run text from a `document.xml` body.
fn document_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(parse_error)?;
                out.push_str(&text);
            }
            Ok(Event::CData(e)) if in_text => {
                out.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(format!("invalid {DOCUMENT_PART}: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
