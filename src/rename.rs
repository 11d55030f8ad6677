//! Canonical renaming: copy legacy-named files under their canonical names.
//!
//! For each `.pdf`/`.png` file in the source directory the stem is run
//! through the corpus canonicalizer and the bytes are copied to
//! `{destination}/{canonical}.{original extension}`. Sources are never
//! deleted; the legacy tree stays intact as the archival reference, and the
//! destination tree is what ParlaVis ingests. Canonicalization and copy
//! failures are per-file: logged, recorded, skipped.

use crate::corpus::{self, Corpus};
use crate::error::{FileError, PrepError};
use crate::progress::{notify_done, notify_skipped, ProgressCallback};
use crate::report::BatchReport;
use crate::scan;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Extensions the rename operation handles; thumbnails produced by an earlier
/// run are renamed alongside their PDFs.
const RENAME_EXTENSIONS: &[&str] = &["pdf", "png"];

/// Copy every legacy-named file in `source` to its canonical name under
/// `destination`.
///
/// # Errors
/// Fatal only for a missing source directory, an unreadable scan, or a
/// destination that cannot be created. Per-file failures land in the report.
pub async fn rename_files(
    source: &Path,
    destination: &Path,
    corpus: Corpus,
    progress: Option<ProgressCallback>,
) -> Result<BatchReport, PrepError> {
    let start = Instant::now();
    info!("Renaming {corpus} files in {}", source.display());

    let files = scan::scan_files(source, RENAME_EXTENSIONS)?;
    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|source_err| PrepError::DestDirFailed {
            path: destination.to_path_buf(),
            source: source_err,
        })?;

    if let Some(ref cb) = progress {
        cb.on_batch_start(files.len());
    }

    let canonicalizer = corpus::canonicalizer(corpus);
    let mut report = BatchReport::default();

    for path in &files {
        // A non-UTF-8 stem can never match a grammar; the lossy form keeps
        // the mismatch reportable like any other bad name.
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        let canonical = match canonicalizer.canonicalize(&stem) {
            Ok(c) => c,
            Err(e) => {
                notify_skipped(progress.as_ref(), path, &e);
                report.record_failure(path, e);
                continue;
            }
        };

        // Extension survives the rename (`.pdf` stays `.pdf`, `.png` `.png`).
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let dest = destination.join(format!("{canonical}.{extension}"));

        match tokio::fs::copy(path, &dest).await {
            Ok(_) => {
                info!("renamed '{}' -> '{}'", path.display(), dest.display());
                notify_done(progress.as_ref(), path);
                report.record_success();
            }
            Err(e) => {
                let err = FileError::CopyFailed {
                    dest,
                    detail: e.to_string(),
                };
                notify_skipped(progress.as_ref(), path, &err);
                report.record_failure(path, err);
            }
        }
    }

    report.total_duration_ms = start.elapsed().as_millis() as u64;
    if let Some(ref cb) = progress {
        cb.on_batch_complete(&report);
    }
    info!(
        "Rename complete: {} processed, {} skipped in {}ms",
        report.processed,
        report.skipped(),
        report.total_duration_ms
    );
    Ok(report)
}
