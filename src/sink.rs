//! Failure reporting.
//!
//! The pipeline hands every failure to an injected [`FailureSink`] before
//! returning it. Sinks never influence the outcome of an ingestion.
//!
//! - [`TracingSink`] logs through `tracing` (default)
//! - [`MemorySink`] keeps the most recent failures in a bounded buffer
//! - [`FailureLog`] appends JSONL records to a file, e.g. `.promptdoc/failures.log`

use std::collections::{BTreeMap, VecDeque};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::ingest::detector::FileFormat;

/// Pipeline stage at which an ingestion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validate,
    Read,
    Parse,
    Normalize,
}

/// What the sink learns about a failure besides its reason.
#[derive(Debug, Clone, Copy)]
pub struct FailureContext<'a> {
    pub file_name: &'a str,
    pub format: Option<FileFormat>,
    pub size_bytes: u64,
    pub stage: Stage,
    pub kind: ErrorKind,
}

/// Receives `(reason, context)` for every failed ingestion.
pub trait FailureSink: Send + Sync {
    fn report(&self, reason: &str, context: &FailureContext<'_>);
}

impl<T: FailureSink + ?Sized> FailureSink for Arc<T> {
    fn report(&self, reason: &str, context: &FailureContext<'_>) {
        (**self).report(reason, context);
    }
}

impl<T: FailureSink + ?Sized> FailureSink for Box<T> {
    fn report(&self, reason: &str, context: &FailureContext<'_>) {
        (**self).report(reason, context);
    }
}

/// Report to two sinks in order.
impl<A: FailureSink, B: FailureSink> FailureSink for (A, B) {
    fn report(&self, reason: &str, context: &FailureContext<'_>) {
        self.0.report(reason, context);
        self.1.report(reason, context);
    }
}

/// A single failure, as stored by [`MemorySink`] and [`FailureLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub ts: DateTime<Utc>,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FileFormat>,
    pub size_bytes: u64,
    pub stage: Stage,
    pub kind: ErrorKind,
    pub reason: String,
}

impl FailureRecord {
    #[must_use]
    pub fn new(reason: &str, context: &FailureContext<'_>) -> Self {
        Self {
            ts: Utc::now(),
            file: context.file_name.to_string(),
            format: context.format,
            size_bytes: context.size_bytes,
            stage: context.stage,
            kind: context.kind,
            reason: reason.to_string(),
        }
    }
}

/// Logs failures as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn report(&self, reason: &str, context: &FailureContext<'_>) {
        tracing::warn!(
            file = context.file_name,
            format = context.format.map(|f| f.as_str()),
            size_bytes = context.size_bytes,
            stage = ?context.stage,
            kind = ?context.kind,
            "ingestion failed: {reason}"
        );
    }
}

/// Keeps the last `capacity` failures in memory.
#[derive(Debug)]
pub struct MemorySink {
    capacity: usize,
    records: Mutex<VecDeque<FailureRecord>>,
}

impl MemorySink {
    pub const DEFAULT_CAPACITY: usize = 100;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: Mutex::new(VecDeque::new()),
        }
    }

    /// Snapshot of stored failures, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<FailureRecord> {
        self.lock().iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<FailureRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl FailureSink for MemorySink {
    fn report(&self, reason: &str, context: &FailureContext<'_>) {
        let mut records = self.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(FailureRecord::new(reason, context));
    }
}

/// Appends failures to a JSONL file.
#[derive(Debug, Clone)]
pub struct FailureLog {
    log_path: PathBuf,
}

impl FailureLog {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one record.
    pub fn append(&self, record: &FailureRecord) -> std::io::Result<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        // One write per record so concurrent appends don't interleave
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read all records. Unparseable lines are skipped.
    pub fn read(&self) -> std::io::Result<Vec<FailureRecord>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(File::open(&self.log_path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(record) = serde_json::from_str::<FailureRecord>(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Remove the log file.
    pub fn clear(&self) -> std::io::Result<()> {
        if self.log_path.exists() {
            std::fs::remove_file(&self.log_path)?;
        }
        Ok(())
    }
}

impl FailureSink for FailureLog {
    fn report(&self, reason: &str, context: &FailureContext<'_>) {
        if let Err(e) = self.append(&FailureRecord::new(reason, context)) {
            tracing::warn!(path = %self.log_path.display(), "cannot write failure log: {e}");
        }
    }
}

/// Counts of logged failures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FailureSummary {
    pub total: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub by_reason: BTreeMap<String, usize>,
}

#[must_use]
pub fn summarize(records: &[FailureRecord]) -> FailureSummary {
    let mut summary = FailureSummary {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        *summary
            .by_kind
            .entry(record.kind.as_str().to_string())
            .or_default() += 1;
        *summary.by_reason.entry(record.reason.clone()).or_default() += 1;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ctx(file_name: &str, kind: ErrorKind) -> FailureContext<'_> {
        FailureContext {
            file_name,
            format: Some(FileFormat::Txt),
            size_bytes: 0,
            stage: Stage::Validate,
            kind,
        }
    }

    #[test]
    fn memory_sink_is_bounded() {
        let sink = MemorySink::new(2);
        sink.report("one", &ctx("a.txt", ErrorKind::Validation));
        sink.report("two", &ctx("b.txt", ErrorKind::Validation));
        sink.report("three", &ctx("c.txt", ErrorKind::Extraction));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reason, "two");
        assert_eq!(records[1].file, "c.txt");
        assert_eq!(records[1].kind, ErrorKind::Extraction);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn pair_reports_to_both() {
        let first = Arc::new(MemorySink::default());
        let second = Arc::new(MemorySink::default());
        let pair = (Arc::clone(&first), Arc::clone(&second));
        pair.report("file is empty", &ctx("a.md", ErrorKind::Validation));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failure_log_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let log = FailureLog::new(tmp.path().join(".promptdoc/failures.log"));
        assert!(log.read().unwrap().is_empty());

        log.report("unsupported file type", &ctx("diagram.png", ErrorKind::Validation));
        log.report("file is empty", &ctx("blank.txt", ErrorKind::Extraction));

        let records = log.read().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file, "diagram.png");
        assert_eq!(records[1].reason, "file is empty");

        log.clear().unwrap();
        assert!(!log.path().exists());
    }

    #[test]
    fn failure_log_skips_garbage_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("failures.log");
        std::fs::write(&path, "not json\n\n").unwrap();
        let log = FailureLog::new(&path);
        log.report("file is empty", &ctx("a.txt", ErrorKind::Validation));
        assert_eq!(log.read().unwrap().len(), 1);
    }

    #[test]
    fn summarize_counts() {
        let sink = MemorySink::default();
        sink.report("file is empty", &ctx("a.txt", ErrorKind::Validation));
        sink.report("file is empty", &ctx("b.txt", ErrorKind::Validation));
        sink.report(
            "no text content found in PDF file",
            &ctx("c.pdf", ErrorKind::Extraction),
        );

        let summary = summarize(&sink.records());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_kind["validation"], 2);
        assert_eq!(summary.by_kind["extraction"], 1);
        assert_eq!(summary.by_reason["file is empty"], 2);
    }
}
