use crate::ingest::detector::FileFormat;
use crate::ingest::text::{
    docx::DocxParser, pdf::PdfParser, plaintext::PlaintextParser, TextParser,
};
use crate::models::document::{DocumentMetadata, ParseOutcome};

/// The parse stage as seen by the pipeline.
pub trait DocumentParser: Send + Sync {
    /// Turn `bytes` of a detected `format` into text, or a diagnosed failure.
    fn parse(&self, format: FileFormat, bytes: &[u8], metadata: DocumentMetadata)
        -> ParseOutcome;
}

/// Routes each format to its stateless parser. There is no fallback from one
/// format's parser to another.
pub struct Dispatcher {
    pdf: PdfParser,
    docx: DocxParser,
    txt: PlaintextParser,
    md: PlaintextParser,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pdf: PdfParser::new(),
            docx: DocxParser::new(),
            txt: PlaintextParser::new(FileFormat::Txt),
            md: PlaintextParser::new(FileFormat::Md),
        }
    }

    /// The parser registered for `format`.
    #[must_use]
    pub fn parser_for(&self, format: FileFormat) -> &dyn TextParser {
        match format {
            FileFormat::Pdf => &self.pdf,
            FileFormat::Docx => &self.docx,
            FileFormat::Txt => &self.txt,
            FileFormat::Md => &self.md,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for Dispatcher {
    fn parse(
        &self,
        format: FileFormat,
        bytes: &[u8],
        metadata: DocumentMetadata,
    ) -> ParseOutcome {
        let extracted = self.parser_for(format).extract_text(bytes);
        ParseOutcome::from_extraction(extracted, metadata)
    }
}
