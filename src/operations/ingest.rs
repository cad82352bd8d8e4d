//! Ingest files from disk.

use std::path::Path;

use serde::Serialize;

use crate::error::{IngestError, Result};
use crate::models::document::AssembledDocument;
use crate::models::section::SectionMap;
use crate::pipeline::Pipeline;

/// Per-file outcome, printed as one JSON line.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum IngestEntry {
    Ok { ok: Box<AssembledDocument> },
    Failed { error: String, file: String },
}

impl IngestEntry {
    fn failed(file: &str, err: &IngestError) -> Self {
        IngestEntry::Failed {
            error: err.to_string(),
            file: file.to_string(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, IngestEntry::Ok { .. })
    }

    #[must_use]
    pub fn document(&self) -> Option<&AssembledDocument> {
        match self {
            IngestEntry::Ok { ok } => Some(ok),
            IngestEntry::Failed { .. } => None,
        }
    }
}

/// Ingest every path. Entries keep input order.
///
/// Paths are opened up front; the ones that open are ingested in parallel
/// by [`Pipeline::ingest_all`].
pub fn ingest_paths<P: AsRef<Path>>(pipeline: &Pipeline, paths: &[P]) -> Vec<IngestEntry> {
    // `None` marks a slot filled by the parallel batch.
    let mut outcomes: Vec<Option<Result<AssembledDocument>>> = Vec::with_capacity(paths.len());
    let mut files = Vec::new();
    for path in paths {
        match pipeline.open(path.as_ref()) {
            Ok(file) => {
                files.push(file);
                outcomes.push(None);
            }
            Err(e) => outcomes.push(Some(Err(e))),
        }
    }

    let mut parsed = pipeline.ingest_all(&files).into_iter();
    for slot in outcomes.iter_mut().filter(|slot| slot.is_none()) {
        *slot = parsed.next();
    }

    outcomes
        .into_iter()
        .flatten()
        .zip(paths)
        .map(|(outcome, path)| match outcome {
            Ok(doc) => IngestEntry::Ok { ok: Box::new(doc) },
            Err(e) => IngestEntry::failed(&path.as_ref().display().to_string(), &e),
        })
        .collect()
}

/// Ingest a single file and return only its section map.
pub fn sections_of(pipeline: &Pipeline, path: &Path) -> Result<SectionMap> {
    Ok(pipeline.ingest_path(path)?.sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineOptions;
    use crate::models::section::SectionKey;
    use crate::sink::{MemorySink, Stage};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn mixed_batch_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let brief = tmp.path().join("brief.md");
        let empty = tmp.path().join("empty.txt");
        let missing = tmp.path().join("missing.md");
        std::fs::write(&brief, "Overview\nA planner.").unwrap();
        std::fs::write(&empty, "").unwrap();

        let pipeline = Pipeline::new(PipelineOptions::default());
        let entries = ingest_paths(&pipeline, &[&brief, &missing, &empty]);
        assert_eq!(entries.len(), 3);

        assert!(entries[0].is_ok());
        assert_eq!(entries[0].document().unwrap().metadata.file_name, "brief.md");
        assert!(!entries[1].is_ok());
        match &entries[2] {
            IngestEntry::Failed { error, file } => {
                assert_eq!(error, "file is empty");
                assert!(file.ends_with("empty.txt"));
            }
            IngestEntry::Ok { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn unopenable_paths_reach_the_sink() {
        let tmp = TempDir::new().unwrap();
        let notes = tmp.path().join("notes.txt");
        std::fs::write(&notes, "Architecture\nOne binary.").unwrap();
        let missing = tmp.path().join("missing.md");

        let sink = Arc::new(MemorySink::default());
        let pipeline = Pipeline::default().with_sink(Arc::clone(&sink));
        let entries = ingest_paths(&pipeline, &[&missing, &notes, &missing]);

        assert!(!entries[0].is_ok());
        assert_eq!(entries[1].document().unwrap().metadata.file_name, "notes.txt");
        assert!(!entries[2].is_ok());

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .all(|r| r.file == "missing.md" && r.stage == Stage::Read));
    }

    #[test]
    fn sections_of_missing_file_reaches_the_sink() {
        let tmp = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::default());
        let pipeline = Pipeline::default().with_sink(Arc::clone(&sink));
        assert!(sections_of(&pipeline, &tmp.path().join("gone.txt")).is_err());
        assert_eq!(sink.records()[0].stage, Stage::Read);
    }

    #[test]
    fn entries_serialize_flat() {
        let entry = IngestEntry::failed("logo.png", &IngestError::UnsupportedFileType);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"error":"unsupported file type","file":"logo.png"}"#);
    }

    #[test]
    fn sections_of_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        std::fs::write(&path, "Requirements\n- offline mode\n").unwrap();

        let pipeline = Pipeline::new(PipelineOptions::default());
        let sections = sections_of(&pipeline, &path).unwrap();
        assert_eq!(
            sections.get(SectionKey::Requirements),
            Some("Requirements\n- offline mode")
        );
    }
}
