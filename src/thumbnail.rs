//! First-page thumbnail rendering via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves each render onto the blocking thread
//! pool so the runtime's worker threads never stall on rasterisation.
//!
//! ## Why cap pixels?
//!
//! Session scans vary wildly in physical size; a folio page at native
//! resolution would allocate hundreds of megabytes of bitmap. The longest
//! edge is capped and the other dimension scales proportionally.

use crate::config::ThumbnailConfig;
use crate::error::{FileError, PrepError};
use crate::progress::{notify_done, notify_skipped, ProgressCallback};
use crate::report::BatchReport;
use crate::scan;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Render a PNG thumbnail of page one for every PDF in `source`, written as
/// `{destination}/{stem}.png` with the stem unchanged.
///
/// Per-file render or write failures are recorded and skipped; the batch
/// continues.
pub async fn create_thumbnails(
    source: &Path,
    destination: &Path,
    config: &ThumbnailConfig,
    progress: Option<ProgressCallback>,
) -> Result<BatchReport, PrepError> {
    let start = Instant::now();
    info!("Creating thumbnails for files in {}", source.display());

    let files = scan::scan_files(source, &["pdf"])?;
    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|source_err| PrepError::DestDirFailed {
            path: destination.to_path_buf(),
            source: source_err,
        })?;

    if let Some(ref cb) = progress {
        cb.on_batch_start(files.len());
    }

    let mut report = BatchReport::default();

    for path in &files {
        let image = match render_first_page(path, config.max_pixels).await {
            Ok(img) => img,
            Err(e) => {
                notify_skipped(progress.as_ref(), path, &e);
                report.record_failure(path, e);
                continue;
            }
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dest = destination.join(format!("{stem}.png"));

        match image.save(&dest) {
            Ok(()) => {
                info!("created thumbnail '{}'", dest.display());
                notify_done(progress.as_ref(), path);
                report.record_success();
            }
            Err(e) => {
                let err = FileError::OutputWriteFailed {
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
        "Thumbnails complete: {} created, {} skipped in {}ms",
        report.processed,
        report.skipped(),
        report.total_duration_ms
    );
    Ok(report)
}

/// Rasterise page one of a PDF into an image.
///
/// Runs inside `spawn_blocking` since pdfium operations are CPU-bound.
pub async fn render_first_page(
    pdf_path: &Path,
    max_pixels: u32,
) -> Result<DynamicImage, FileError> {
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || render_first_page_blocking(&path, max_pixels))
        .await
        .map_err(|e| FileError::RenderFailed {
            detail: format!("render task panicked: {e}"),
        })?
}

/// Blocking implementation of first-page rendering.
fn render_first_page_blocking(pdf_path: &Path, max_pixels: u32) -> Result<DynamicImage, FileError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| FileError::RenderFailed {
            detail: format!(
                "could not open '{}': {:?} (if pdfium is not installed, set PDFIUM_LIB_PATH)",
                pdf_path.display(),
                e
            ),
        })?;

    let pages = document.pages();
    let first_page = pages.get(0).map_err(|e| FileError::RenderFailed {
        detail: format!("document has no renderable first page: {e:?}"),
    })?;

    let render_config = PdfRenderConfig::new()
        .set_target_width(max_pixels as i32)
        .set_maximum_height(max_pixels as i32);

    let bitmap = first_page
        .render_with_config(&render_config)
        .map_err(|e| FileError::RenderFailed {
            detail: format!("{e:?}"),
        })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered first page of '{}' -> {}x{} px",
        pdf_path.display(),
        image.width(),
        image.height()
    );

    Ok(image)
}
