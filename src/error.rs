//! Error types for the parlavis-prep library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PrepError`]: **fatal**. The batch cannot proceed at all (unsupported
//!   corpus selection, missing source directory, destination not writable).
//!   Returned as `Err(PrepError)` from the top-level batch functions.
//!
//! * [`FileError`]: **non-fatal**. A single file failed (stem does not match
//!   the corpus grammar, copy error, external tool exited non-zero) but all
//!   other files are fine. Stored inside [`crate::report::BatchReport`] so
//!   callers can inspect partial success rather than losing the whole batch
//!   to one bad file.
//!
//! The separation matches the propagation policy: per-file failures are
//! caught at the loop boundary, logged with enough context for manual
//! correction, and never halt processing of the remaining files. Only a
//! structurally invalid run configuration is fatal.

use crate::corpus::Corpus;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the parlavis-prep library.
///
/// File-level failures use [`FileError`] and are collected in
/// [`crate::report::BatchReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum PrepError {
    /// The corpus identifier is not implemented by any canonicalizer.
    ///
    /// This is a run-configuration error, not a per-file condition, so it
    /// aborts the batch instead of being skipped.
    #[error("corpus '{corpus}' is not supported (known corpora: dzk, yuparl)")]
    UnsupportedCorpus { corpus: String },

    /// Source directory was not found or is not a directory.
    #[error("source directory not found: '{path}'\nCheck the path exists and is a directory.")]
    SourceDirNotFound { path: PathBuf },

    /// Source directory exists but could not be enumerated.
    #[error("failed to read directory '{path}': {source}")]
    DirReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination directory could not be created.
    #[error("failed to create destination directory '{path}': {source}")]
    DestDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single file.
///
/// Stored in [`crate::report::FileFailure`] when a file is skipped.
/// The batch continues with the next file.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The stem does not conform to the corpus grammar's overall shape.
    #[error("'{stem}' does not match the {corpus} naming pattern: {detail}")]
    PatternMismatch {
        corpus: Corpus,
        stem: String,
        detail: String,
    },

    /// (yuparl) Session-type name absent from the static vocabulary.
    #[error("session type '{name}' in '{stem}' is not in the {corpus} vocabulary")]
    UnknownSessionType {
        corpus: Corpus,
        stem: String,
        name: String,
    },

    /// File-system copy to the canonical destination failed.
    #[error("copy to '{dest}' failed: {detail}")]
    CopyFailed { dest: PathBuf, detail: String },

    /// pdfium could not open the document or rasterise its first page.
    #[error("first-page render failed: {detail}")]
    RenderFailed { detail: String },

    /// A produced output (thumbnail PNG, session JSON) could not be written.
    #[error("failed to write output '{dest}': {detail}")]
    OutputWriteFailed { dest: PathBuf, detail: String },

    /// An external tool (Ghostscript, qpdf) failed for this file.
    #[error("{tool} failed: {detail}")]
    ToolFailed { tool: String, detail: String },

    /// The session XML could not be parsed.
    #[error("XML parse failed: {detail}")]
    XmlParseFailed { detail: String },
}
