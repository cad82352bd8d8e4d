//! Failure log inspection.

use serde::Serialize;

use crate::error::Result;
use crate::sink::{summarize, FailureLog, FailureRecord, FailureSummary};

/// Recorded failures, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct FailuresResult {
    pub count: usize,
    pub failures: Vec<FailureRecord>,
}

/// Read every record from the failure log.
pub fn list_failures(log: &FailureLog) -> Result<FailuresResult> {
    let failures = log.read()?;
    Ok(FailuresResult {
        count: failures.len(),
        failures,
    })
}

/// Count logged failures by kind and reason.
pub fn summarize_failures(log: &FailureLog) -> Result<FailureSummary> {
    Ok(summarize(&log.read()?))
}

/// Delete the failure log.
pub fn clear_failures(log: &FailureLog) -> Result<()> {
    log.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ingest::detector::FileFormat;
    use crate::sink::{FailureContext, FailureSink, Stage};
    use tempfile::TempDir;

    fn log_with_two(tmp: &TempDir) -> FailureLog {
        let log = FailureLog::new(tmp.path().join("failures.log"));
        let ctx = FailureContext {
            file_name: "scan.pdf",
            format: Some(FileFormat::Pdf),
            size_bytes: 120,
            stage: Stage::Parse,
            kind: ErrorKind::Extraction,
        };
        log.report("no text content found in PDF file", &ctx);
        log.report(
            "unsupported file type",
            &FailureContext {
                file_name: "logo.png",
                format: None,
                stage: Stage::Validate,
                kind: ErrorKind::Validation,
                ..ctx
            },
        );
        log
    }

    #[test]
    fn list_and_summarize() {
        let tmp = TempDir::new().unwrap();
        let log = log_with_two(&tmp);

        let listed = list_failures(&log).unwrap();
        assert_eq!(listed.count, 2);
        assert_eq!(listed.failures[0].file, "scan.pdf");
        assert_eq!(listed.failures[1].format, None);

        let summary = summarize_failures(&log).unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.by_kind["validation"], 1);
        assert_eq!(summary.by_reason["no text content found in PDF file"], 1);
    }

    #[test]
    fn clear_removes_log() {
        let tmp = TempDir::new().unwrap();
        let log = log_with_two(&tmp);
        clear_failures(&log).unwrap();
        assert_eq!(list_failures(&log).unwrap().count, 0);
        // Clearing twice is fine
        clear_failures(&log).unwrap();
    }
}
