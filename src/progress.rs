//! Progress-callback trait for per-file batch events.
//!
//! Pass an [`Arc<dyn BatchProgress>`] to the batch functions to receive
//! events as each file is handled. The callback approach keeps the library
//! free of any assumption about how the host communicates: the CLI forwards
//! events to a terminal progress bar, a service could forward them to a
//! channel or a log aggregator.
//!
//! All methods have default no-op implementations so callers only override
//! what they care about. The trait is `Send + Sync`; the reference batch
//! loops are sequential, but implementations must not rely on that.

use crate::error::FileError;
use crate::report::BatchReport;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch loops as files are processed.
pub trait BatchProgress: Send + Sync {
    /// Called once after the source scan, before any file is handled.
    fn on_batch_start(&self, _total_files: usize) {}

    /// Called after a file was processed successfully.
    fn on_file_done(&self, _file: &Path) {}

    /// Called when a file is skipped.
    fn on_file_skipped(&self, _file: &Path, _error: &FileError) {}

    /// Called once after the last file, with the final report.
    fn on_batch_complete(&self, _report: &BatchReport) {}
}

/// Shared handle to a progress callback.
pub type ProgressCallback = Arc<dyn BatchProgress>;

/// Notify a possibly-absent callback that a file succeeded.
pub(crate) fn notify_done(progress: Option<&ProgressCallback>, file: &Path) {
    if let Some(cb) = progress {
        cb.on_file_done(file);
    }
}

/// Notify a possibly-absent callback that a file was skipped.
pub(crate) fn notify_skipped(progress: Option<&ProgressCallback>, file: &Path, error: &FileError) {
    if let Some(cb) = progress {
        cb.on_file_skipped(file, error);
    }
}
