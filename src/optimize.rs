//! PDF optimization for web delivery: Ghostscript then qpdf.
//!
//! Each file goes through two external tools in sequence: a Ghostscript pass
//! compresses streams and subsets fonts into a temporary file, then qpdf
//! linearizes that intermediate into the final output so web viewers can
//! render the first pages before the download completes.
//!
//! The intermediate lives in a [`tempfile::NamedTempFile`] created in the
//! destination directory: it is removed when the guard drops, on every exit
//! path (success, tool failure, timeout, panic). Creating it next to the
//! final output also keeps the qpdf rewrite on one file system.

use crate::config::OptimizeConfig;
use crate::error::{FileError, PrepError};
use crate::progress::{notify_done, notify_skipped, ProgressCallback};
use crate::report::BatchReport;
use crate::scan;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

/// Optimize every PDF in `source` into `destination` under the same name.
pub async fn optimize_pdfs(
    source: &Path,
    destination: &Path,
    config: &OptimizeConfig,
    progress: Option<ProgressCallback>,
) -> Result<BatchReport, PrepError> {
    let start = Instant::now();
    info!(
        "Optimizing PDF files in {} (quality: {})",
        source.display(),
        config.quality
    );

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
        let file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        let output = destination.join(&file_name);

        match optimize_pdf(path, &output, config).await {
            Ok(()) => {
                info!("optimized '{}' -> '{}'", path.display(), output.display());
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
        "Optimization complete: {} optimized, {} skipped in {}ms",
        report.processed,
        report.skipped(),
        report.total_duration_ms
    );
    Ok(report)
}

/// Optimize a single PDF: Ghostscript compression into a scoped temporary
/// file, then qpdf linearization into `output`.
pub async fn optimize_pdf(
    input: &Path,
    output: &Path,
    config: &OptimizeConfig,
) -> Result<(), FileError> {
    let temp_dir = output.parent().unwrap_or_else(|| Path::new("."));
    let intermediate = tempfile::Builder::new()
        .prefix(".optimize-")
        .suffix(".tmp.pdf")
        .tempfile_in(temp_dir)
        .map_err(|e| FileError::ToolFailed {
            tool: "tempfile".to_string(),
            detail: format!("could not create intermediate in '{}': {e}", temp_dir.display()),
        })?;

    debug!("Compressing and subsetting fonts: {}", input.display());
    run_tool(
        &config.ghostscript_path,
        &ghostscript_args(input, intermediate.path(), config),
        config.tool_timeout_secs,
    )
    .await?;

    debug!("Linearizing for fast web view: {}", output.display());
    run_tool(
        "qpdf",
        &[
            "--linearize".to_string(),
            intermediate.path().display().to_string(),
            output.display().to_string(),
        ],
        config.tool_timeout_secs,
    )
    .await?;

    // `intermediate` drops here; the guard removes the temp file on the
    // failure paths above as well.
    Ok(())
}

/// Ghostscript argument list for the compression/font-subsetting pass.
///
/// JPEG (`DCTEncode`) for colour and grey scans, CCITT G4 for monochrome,
/// fonts subsetted and compressed but not force-embedded; `FastWebView` is
/// left to qpdf, which does the linearization properly.
fn ghostscript_args(input: &Path, intermediate: &Path, config: &OptimizeConfig) -> Vec<String> {
    vec![
        "-sDEVICE=pdfwrite".to_string(),
        "-dCompatibilityLevel=1.4".to_string(),
        format!("-dPDFSETTINGS={}", config.quality.gs_setting()),
        "-dEmbedAllFonts=false".to_string(),
        "-dAutoFilterColorImages=false".to_string(),
        "-dColorImageFilter=/DCTEncode".to_string(),
        "-dAutoFilterGrayImages=false".to_string(),
        "-dGrayImageFilter=/DCTEncode".to_string(),
        "-dMonoImageFilter=/CCITTFaxEncode".to_string(),
        "-dSubsetFonts=true".to_string(),
        "-dCompressFonts=true".to_string(),
        "-dFastWebView=false".to_string(),
        "-dDetectDuplicateImages=true".to_string(),
        "-dColorImageDownsampleType=/Bicubic".to_string(),
        "-dNOPAUSE".to_string(),
        "-dQUIET".to_string(),
        "-dBATCH".to_string(),
        format!("-sOutputFile={}", intermediate.display()),
        input.display().to_string(),
    ]
}

/// Run one external tool to completion, bounded by a timeout.
///
/// Non-zero exit, spawn failure and timeout all map to
/// [`FileError::ToolFailed`] so the caller skips just this file.
async fn run_tool(program: &str, args: &[String], timeout_secs: u64) -> Result<(), FileError> {
    let child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| FileError::ToolFailed {
            tool: program.to_string(),
            detail: format!("failed to start: {e}"),
        })?;

    let output = match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(FileError::ToolFailed {
                tool: program.to_string(),
                detail: format!("failed to wait for process: {e}"),
            });
        }
        Err(_) => {
            // Timeout: the child was consumed by wait_with_output and is
            // killed on drop.
            return Err(FileError::ToolFailed {
                tool: program.to_string(),
                detail: format!("timed out after {timeout_secs}s"),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FileError::ToolFailed {
            tool: program.to_string(),
            detail: format!(
                "exit status {}: {}",
                output
                    .status
                    .code()
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                stderr.trim()
            ),
        });
    }

    Ok(())
}
