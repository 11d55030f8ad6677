//! Batch run reporting.
//!
//! Every batch operation returns a [`BatchReport`] summarising what was
//! processed and what was skipped, with each skip carrying the offending path
//! and the [`FileError`] that caused it. The report is serialisable so the
//! CLI can emit it as JSON for downstream tooling.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One skipped file and the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Source path of the file that was skipped.
    pub file: PathBuf,
    /// The per-file error that caused the skip.
    pub error: FileError,
}

/// Summary of one batch run.
///
/// `processed + failures.len()` equals the number of files the scan yielded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Files successfully processed.
    pub processed: usize,
    /// Files skipped with their reasons, in scan order.
    pub failures: Vec<FileFailure>,
    /// Wall-clock duration of the whole batch in milliseconds.
    pub total_duration_ms: u64,
}

impl BatchReport {
    /// Number of files skipped.
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// Record a successfully processed file.
    pub fn record_success(&mut self) {
        self.processed += 1;
    }

    /// Record a skipped file, logging the reason at `warn` level.
    pub fn record_failure(&mut self, file: &Path, error: FileError) {
        warn!("skipping '{}': {}", file.display(), error);
        self.failures.push(FileFailure {
            file: file.to_path_buf(),
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;

    #[test]
    fn counts_track_records() {
        let mut report = BatchReport::default();
        report.record_success();
        report.record_success();
        report.record_failure(
            Path::new("bad.pdf"),
            FileError::PatternMismatch {
                corpus: Corpus::Dzk,
                stem: "bad".into(),
                detail: "no match".into(),
            },
        );
        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failures[0].file, PathBuf::from("bad.pdf"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = BatchReport::default();
        report.record_failure(
            Path::new("x.pdf"),
            FileError::RenderFailed {
                detail: "empty document".into(),
            },
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("x.pdf"));
        assert!(json.contains("empty document"));
    }
}
