//! The ingestion pipeline.
//!
//! `validate -> read -> parse -> normalize -> extract sections -> assemble`,
//! strictly in that order, once per document. Every failure is terminal for
//! the call, goes to the configured [`FailureSink`], and is returned to the
//! caller unchanged. Nothing is retried.

use std::borrow::Cow;
use std::path::Path;

use rayon::prelude::*;

use crate::config::PipelineOptions;
use crate::error::{IngestError, Result};
use crate::ingest::detector::{detect, FileFormat};
use crate::ingest::dispatcher::{Dispatcher, DocumentParser};
use crate::ingest::source::{file_name_of, DiskFile, SourceFile};
use crate::ingest::validate::validate;
use crate::models::document::{AssembledDocument, DocumentMetadata};
use crate::models::token_estimate::estimate_tokens_str;
use crate::sink::{FailureContext, FailureSink, Stage, TracingSink};
use crate::structure::{assemble, extract_sections, normalize};

/// Sequences the ingestion stages for one document at a time.
///
/// A `Pipeline` holds no per-document state and can be shared across
/// threads; see [`Pipeline::ingest_all`].
pub struct Pipeline {
    parser: Box<dyn DocumentParser>,
    sink: Box<dyn FailureSink>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Pipeline with the built-in parsers and a `tracing` failure sink.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            parser: Box::new(Dispatcher::new()),
            sink: Box::new(TracingSink),
            options,
        }
    }

    /// Replace the parse stage.
    #[must_use]
    pub fn with_parser(mut self, parser: impl DocumentParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Replace the failure sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl FailureSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    #[must_use]
    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Check name and size before anything is read. Returns the detected format.
    ///
    /// Checks run in order: format, empty, size limit.
    pub fn validate(&self, file_name: &str, size: u64) -> Result<FileFormat> {
        validate(file_name, size, self.options.max_file_size_bytes)
    }

    /// Open a file on disk. A failure is reported at the read stage.
    pub fn open(&self, path: &Path) -> Result<DiskFile> {
        DiskFile::open(path).map_err(|e| {
            let name = file_name_of(path);
            self.fail(e, &name, detect(&name), 0, Stage::Read)
        })
    }

    /// Open and ingest one file on disk.
    pub fn ingest_path(&self, path: &Path) -> Result<AssembledDocument> {
        self.open(path).and_then(|file| self.ingest(&file))
    }

    /// Ingest one document.
    pub fn ingest(&self, file: &dyn SourceFile) -> Result<AssembledDocument> {
        self.run(file.name(), file.size(), || file.read_bytes())
    }

    /// Ingest an in-memory buffer under `file_name`.
    pub fn ingest_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<AssembledDocument> {
        self.run(file_name, bytes.len() as u64, || Ok(Cow::Borrowed(bytes)))
    }

    /// Ingest independent documents in parallel. Results keep input order and
    /// one failure never affects another document.
    pub fn ingest_all<F>(&self, files: &[F]) -> Vec<Result<AssembledDocument>>
    where
        F: SourceFile + Sync,
    {
        files.par_iter().map(|file| self.ingest(file)).collect()
    }

    fn run<'a>(
        &self,
        file_name: &str,
        reported_size: u64,
        read: impl FnOnce() -> Result<Cow<'a, [u8]>>,
    ) -> Result<AssembledDocument> {
        let format = self
            .validate(file_name, reported_size)
            .map_err(|e| self.fail(e, file_name, detect(file_name), reported_size, Stage::Validate))?;

        let bytes = read()
            .map_err(|e| self.fail(e, file_name, Some(format), reported_size, Stage::Read))?;
        let size = bytes.len() as u64;
        // The source may have changed since it reported its size.
        self.validate(file_name, size)
            .map_err(|e| self.fail(e, file_name, Some(format), size, Stage::Validate))?;

        tracing::debug!(file = file_name, %format, size, "parsing");
        let metadata = DocumentMetadata::for_bytes(file_name, format, &bytes);
        let (text, metadata) = self
            .parser
            .parse(format, &bytes, metadata)
            .into_result()
            .map_err(|e| self.fail(e, file_name, Some(format), size, Stage::Parse))?;

        let normalized = normalize(&text);
        if normalized.is_empty() {
            return Err(self.fail(
                IngestError::no_text(format),
                file_name,
                Some(format),
                size,
                Stage::Normalize,
            ));
        }

        let sections = extract_sections(&normalized);
        let body = assemble(&sections, &normalized);
        tracing::debug!(
            file = file_name,
            sections = sections.len(),
            chars = body.len(),
            "assembled"
        );

        Ok(AssembledDocument {
            estimated_tokens: estimate_tokens_str(&body),
            body,
            metadata,
            sections,
        })
    }

    fn fail(
        &self,
        error: IngestError,
        file_name: &str,
        format: Option<FileFormat>,
        size_bytes: u64,
        stage: Stage,
    ) -> IngestError {
        let context = FailureContext {
            file_name,
            format,
            size_bytes,
            stage,
            kind: error.kind(),
        };
        self.sink.report(&error.to_string(), &context);
        error
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}
