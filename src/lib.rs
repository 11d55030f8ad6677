//! # parlavis-prep
//!
//! Prepare archival parliamentary PDF documents for the ParlaVis viewing
//! system.
//!
//! Scanned session records arrive under decades of inconsistent naming
//! conventions. ParlaVis needs one canonical scheme per corpus, a first-page
//! thumbnail per document, and PDFs that stream well in a web viewer. This
//! crate does all three as batch, single-pass, best-effort operations: a
//! failing file is logged and skipped, never fatal to the run.
//!
//! ## Operations
//!
//! ```text
//! rename     legacy stem ──canonicalize──▶ copy as DZK_… / yu1Parl_…
//! thumbnail  PDF page 1 ──pdfium──▶ PNG
//! optimize   PDF ──ghostscript──▶ temp ──qpdf --linearize──▶ web-ready PDF
//! parse      TEI XML session ──▶ JSON session record
//! ```
//!
//! The only nontrivial logic is the per-corpus filename canonicalizer in
//! [`corpus`]; everything else is orchestration around external
//! collaborators (pdfium, Ghostscript, qpdf).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parlavis_prep::{rename_files, Corpus};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = rename_files(
//!         Path::new("raw/dzk"),
//!         Path::new("prepared/dzk"),
//!         Corpus::Dzk,
//!         None,
//!     )
//!     .await?;
//!     println!("{} renamed, {} skipped", report.processed, report.skipped());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `parlavis-prep` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod corpus;
pub mod error;
pub mod optimize;
pub mod parse;
pub mod progress;
pub mod rename;
pub mod report;
pub mod scan;
pub mod thumbnail;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{OptimizeConfig, QualityPreset, ThumbnailConfig};
pub use corpus::{canonicalizer, Canonicalize, Corpus};
pub use error::{FileError, PrepError};
pub use optimize::{optimize_pdf, optimize_pdfs};
pub use parse::{parse_files, SessionRecord, Utterance};
pub use progress::{BatchProgress, ProgressCallback};
pub use rename::rename_files;
pub use report::{BatchReport, FileFailure};
pub use scan::scan_files;
pub use thumbnail::create_thumbnails;
