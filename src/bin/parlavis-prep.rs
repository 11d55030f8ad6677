//! CLI binary for parlavis-prep.
//!
//! A thin shim over the library crate that maps subcommand flags to the
//! batch functions and prints a run summary. Per-file failures never change
//! the exit code; only a structurally invalid run (unknown corpus, missing
//! source directory) aborts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use parlavis_prep::{
    create_thumbnails, optimize_pdfs, parse_files, rename_files, BatchProgress, BatchReport,
    Corpus, FileError, OptimizeConfig, ProgressCallback, QualityPreset, ThumbnailConfig,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar across the batch, a log line per skip.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>4}/{len} files  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl BatchProgress for CliProgress {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_files} files…"))
        ));
    }

    fn on_file_done(&self, file: &Path) {
        self.bar.println(format!(
            "  {} {}",
            green("✓"),
            dim(&file.display().to_string())
        ));
        self.bar.inc(1);
    }

    fn on_file_skipped(&self, file: &Path, error: &FileError) {
        // Truncate very long reasons to keep output tidy.
        let msg = error.to_string();
        let msg = if msg.len() > 100 {
            format!("{}\u{2026}", &msg[..99])
        } else {
            msg
        };
        self.bar.println(format!(
            "  {} {}  {}",
            red("✗"),
            file.display(),
            red(&msg)
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _report: &BatchReport) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Rename a dzk delivery into canonical names
  parlavis-prep rename -c dzk -s raw/dzk -d prepared/dzk

  # First-page thumbnails for every PDF
  parlavis-prep thumbnail -s prepared/dzk -d thumbnails/dzk

  # Web-optimize with the default ebook preset
  parlavis-prep optimize -s prepared/dzk -d web/dzk

  # Highest quality, Ghostscript outside PATH
  parlavis-prep optimize -s prepared/dzk -d web/dzk -q prepress -g /opt/gs/bin/gs

  # Extract JSON session records from TEI transcripts, files 100-199
  parlavis-prep parse -c yuparl -s tei/yuparl -d json/yuparl -f 100 -t 200

EXTERNAL TOOLS:
  thumbnail  needs a pdfium shared library (set PDFIUM_LIB_PATH if not found)
  optimize   needs Ghostscript (-g to point at the executable) and qpdf on PATH

Per-file errors are logged and skipped; the process still exits 0 so long
batches survive individual bad scans. Re-run with -v for debug logs.
"#;

/// Prepare PDF and thumbnail data for ParlaVis.
#[derive(Parser, Debug)]
#[command(
    name = "parlavis-prep",
    version,
    about = "Prepare archival parliamentary PDFs for ParlaVis",
    long_about = "Prepare archival parliamentary PDF documents for the ParlaVis viewing system: \
canonical renaming per corpus, first-page thumbnails, web optimization via Ghostscript and qpdf, \
and TEI-to-JSON session extraction.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PARLAVIS_PREP_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true, env = "PARLAVIS_PREP_QUIET")]
    quiet: bool,

    /// Disable the progress bar.
    #[arg(long, global = true, env = "PARLAVIS_PREP_NO_PROGRESS")]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename files into the ParlaVis canonical convention.
    Rename {
        /// Corpus to prepare.
        #[arg(short, long, value_enum)]
        corpus: CorpusArg,
        /// Source directory containing raw data.
        #[arg(short, long)]
        source: PathBuf,
        /// Destination directory for renamed data.
        #[arg(short, long)]
        destination: PathBuf,
    },
    /// Generate first-page PNG thumbnails for each PDF.
    Thumbnail {
        /// Source directory containing PDF files.
        #[arg(short, long)]
        source: PathBuf,
        /// Destination directory for thumbnails.
        #[arg(short, long)]
        destination: PathBuf,
        /// Maximum rendered dimension in pixels.
        #[arg(long, default_value_t = 2000)]
        max_pixels: u32,
    },
    /// Optimize PDF files for web use (compress, subset fonts, linearize).
    Optimize {
        /// Source directory containing PDF files.
        #[arg(short, long)]
        source: PathBuf,
        /// Destination directory for optimized PDFs.
        #[arg(short, long)]
        destination: PathBuf,
        /// Quality of optimized PDFs.
        #[arg(short, long, value_enum, default_value = "ebook")]
        quality: QualityArg,
        /// Path to the Ghostscript executable (if not in system PATH).
        #[arg(short = 'g', long, default_value = "gs", env = "PARLAVIS_PREP_GS")]
        ghostscript_path: String,
        /// Per-tool timeout in seconds.
        #[arg(long, default_value_t = 300)]
        tool_timeout: u64,
    },
    /// Generate JSON session records from TEI XML files.
    Parse {
        /// Corpus to parse.
        #[arg(short, long, value_enum)]
        corpus: CorpusArg,
        /// Source directory containing XML files.
        #[arg(short, long)]
        source: PathBuf,
        /// Destination directory for JSON files.
        #[arg(short, long)]
        destination: PathBuf,
        /// Starting index into the sorted file list.
        #[arg(short = 'f', long, default_value_t = 0)]
        from_index: usize,
        /// Ending index (exclusive); -1 means to the end.
        #[arg(short = 't', long, default_value_t = -1, allow_negative_numbers = true)]
        to_index: i64,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CorpusArg {
    Dzk,
    Yuparl,
}

impl From<CorpusArg> for Corpus {
    fn from(v: CorpusArg) -> Self {
        match v {
            CorpusArg::Dzk => Corpus::Dzk,
            CorpusArg::Yuparl => Corpus::Yuparl,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum QualityArg {
    Screen,
    Ebook,
    Printer,
    Prepress,
}

impl From<QualityArg> for QualityPreset {
    fn from(v: QualityArg) -> Self {
        match v {
            QualityArg::Screen => QualityPreset::Screen,
            QualityArg::Ebook => QualityPreset::Ebook,
            QualityArg::Printer => QualityPreset::Printer,
            QualityArg::Prepress => QualityPreset::Prepress,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active; the
    // bar provides the per-file feedback that matters at the terminal.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgress::new() as Arc<dyn BatchProgress>)
    } else {
        None
    };

    let (label, report) = match cli.command {
        Commands::Rename {
            corpus,
            source,
            destination,
        } => (
            "renamed",
            rename_files(&source, &destination, corpus.into(), progress)
                .await
                .context("Rename failed")?,
        ),
        Commands::Thumbnail {
            source,
            destination,
            max_pixels,
        } => {
            let config = ThumbnailConfig { max_pixels };
            (
                "thumbnailed",
                create_thumbnails(&source, &destination, &config, progress)
                    .await
                    .context("Thumbnail generation failed")?,
            )
        }
        Commands::Optimize {
            source,
            destination,
            quality,
            ghostscript_path,
            tool_timeout,
        } => {
            let config = OptimizeConfig {
                quality: quality.into(),
                ghostscript_path,
                tool_timeout_secs: tool_timeout,
            };
            (
                "optimized",
                optimize_pdfs(&source, &destination, &config, progress)
                    .await
                    .context("Optimization failed")?,
            )
        }
        Commands::Parse {
            corpus,
            source,
            destination,
            from_index,
            to_index,
        } => {
            let to = if to_index < 0 {
                None
            } else {
                Some(to_index as usize)
            };
            (
                "parsed",
                parse_files(&source, &destination, corpus.into(), from_index, to, progress)
                    .await
                    .context("Parse failed")?,
            )
        }
    };

    // ── Summary ──────────────────────────────────────────────────────────
    if !cli.quiet {
        let total = report.processed + report.skipped();
        if report.skipped() == 0 {
            eprintln!(
                "{} {} files {label} in {}ms",
                green("✔"),
                bold(&report.processed.to_string()),
                report.total_duration_ms,
            );
        } else {
            eprintln!(
                "{} {}/{} files {label}  ({} skipped)  {}ms",
                if report.processed == 0 {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&report.processed.to_string()),
                total,
                red(&report.skipped().to_string()),
                report.total_duration_ms,
            );
            for failure in &report.failures {
                eprintln!(
                    "   {} {}",
                    dim(&failure.file.display().to_string()),
                    failure.error
                );
            }
        }
    }

    // Per-file failures are deliberate non-errors: long archival batches run
    // unattended and individual bad scans are fixed up afterwards.
    Ok(())
}
