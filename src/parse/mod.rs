//! Session-transcript extraction: Parla-CLARIN TEI XML to JSON.
//!
//! Both corpora publish their session transcripts as Parla-CLARIN TEI, so
//! one extractor serves them all; records are labeled with the corpus they
//! came from. Each `.xml` file in the source directory becomes one
//! `{stem}.json` in the destination holding a [`SessionRecord`]. The
//! `from_index`/`to_index` window slices the sorted file list so very large
//! corpora can be processed in chunks across multiple invocations.

use crate::corpus::Corpus;
use crate::error::{FileError, PrepError};
use crate::progress::{notify_done, notify_skipped, ProgressCallback};
use crate::report::BatchReport;
use crate::scan;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub mod tei;

/// One parliamentary session extracted from a TEI transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Corpus the session belongs to.
    pub corpus: Corpus,
    /// TEI document id, falling back to the source file stem.
    pub id: String,
    /// Session title from the TEI header, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Session date (`when` attribute of the first dated element), if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Utterances in document order.
    pub utterances: Vec<Utterance>,
}

/// One speech turn within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// TEI id of the utterance, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Speaker reference (`who` attribute, `#` stripped), if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Utterance text, segments joined with newlines.
    pub text: String,
}

/// Extract every `.xml` session file in the window into JSON records.
///
/// `to_index` is exclusive; `None` means "to the end of the list". Indices
/// beyond the list are clamped, so an oversized window is not an error.
pub async fn parse_files(
    source: &Path,
    destination: &Path,
    corpus: Corpus,
    from_index: usize,
    to_index: Option<usize>,
    progress: Option<ProgressCallback>,
) -> Result<BatchReport, PrepError> {
    let start = Instant::now();
    info!("Parsing {corpus} session files in {}", source.display());

    let files = scan::scan_files(source, &["xml"])?;
    let from = from_index.min(files.len());
    let to = to_index.unwrap_or(files.len()).min(files.len()).max(from);
    let window = &files[from..to];

    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|source_err| PrepError::DestDirFailed {
            path: destination.to_path_buf(),
            source: source_err,
        })?;

    if let Some(ref cb) = progress {
        cb.on_batch_start(window.len());
    }

    let mut report = BatchReport::default();

    for path in window {
        match parse_file(path, destination, corpus).await {
            Ok(dest) => {
                info!("parsed '{}' -> '{}'", path.display(), dest.display());
                notify_done(progress.as_ref(), path);
                report.record_success();
            }
            Err(e) => {
                notify_skipped(progress.as_ref(), path, &e);
                report.record_failure(path, e);
            }
        }
    }

    report.total_duration_ms = start.elapsed().as_millis() as u64;
    if let Some(ref cb) = progress {
        cb.on_batch_complete(&report);
    }
    info!(
        "Parse complete: {} parsed, {} skipped in {}ms",
        report.processed,
        report.skipped(),
        report.total_duration_ms
    );
    Ok(report)
}

/// Parse one session file and write its JSON record; returns the output path.
async fn parse_file(
    path: &Path,
    destination: &Path,
    corpus: Corpus,
) -> Result<std::path::PathBuf, FileError> {
    let xml = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FileError::XmlParseFailed {
            detail: format!("could not read '{}': {e}", path.display()),
        })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let record = tei::parse_session(&xml, corpus, &stem)?;

    let dest = destination.join(format!("{stem}.json"));
    let json = serde_json::to_string_pretty(&record).map_err(|e| FileError::XmlParseFailed {
        detail: format!("could not serialize record: {e}"),
    })?;
    tokio::fs::write(&dest, json)
        .await
        .map_err(|e| FileError::OutputWriteFailed {
            dest: dest.clone(),
            detail: e.to_string(),
        })?;

    Ok(dest)
}
