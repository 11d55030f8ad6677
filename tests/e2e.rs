//! End-to-end tests for the external-collaborator operations.
//!
//! Thumbnail needs a pdfium shared library; optimize needs Ghostscript and
//! qpdf on the machine. Both are gated behind the `E2E_ENABLED` environment
//! variable so they do not run in CI unless explicitly requested.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test e2e -- --nocapture

use parlavis_prep::{
    create_thumbnails, optimize_pdfs, parse_files, Corpus, OptimizeConfig, ThumbnailConfig,
};
use std::fs;
use std::path::PathBuf;

/// Skip this test unless E2E_ENABLED is set.
macro_rules! e2e_skip_unless_enabled {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

/// A minimal one-page PDF, enough for pdfium and Ghostscript to open.
fn write_minimal_pdf(path: &PathBuf) {
    let body = b"%PDF-1.4\n\
1 0 obj<</Type/Catalog/Pages 2 0 R>>endobj\n\
2 0 obj<</Type/Pages/Kids[3 0 R]/Count 1>>endobj\n\
3 0 obj<</Type/Page/Parent 2 0 R/MediaBox[0 0 595 842]>>endobj\n\
xref\n0 4\n\
0000000000 65535 f \n\
0000000009 00000 n \n\
0000000052 00000 n \n\
0000000101 00000 n \n\
trailer<</Size 4/Root 1 0 R>>\nstartxref\n164\n%%EOF\n";
    fs::write(path, body).unwrap();
}

#[tokio::test]
async fn thumbnail_renders_first_page_to_png() {
    e2e_skip_unless_enabled!();

    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_minimal_pdf(&source.path().join("DZK_1883-01-15_3_7.pdf"));

    let report = create_thumbnails(
        source.path(),
        dest.path(),
        &ThumbnailConfig::default(),
        None,
    )
    .await
    .expect("thumbnail batch should not be fatal");

    assert_eq!(report.processed, 1, "failures: {:?}", report.failures);
    assert!(dest.path().join("DZK_1883-01-15_3_7.png").is_file());
}

#[tokio::test]
async fn optimize_produces_output_and_removes_intermediate() {
    e2e_skip_unless_enabled!();

    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_minimal_pdf(&source.path().join("session.pdf"));

    let report = optimize_pdfs(
        source.path(),
        dest.path(),
        &OptimizeConfig::default(),
        None,
    )
    .await
    .expect("optimize batch should not be fatal");

    assert_eq!(report.processed, 1, "failures: {:?}", report.failures);
    assert!(dest.path().join("session.pdf").is_file());

    // No `.tmp.pdf` intermediate may survive, success or not.
    let leftovers: Vec<_> = fs::read_dir(dest.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp.pdf"))
        .collect();
    assert!(leftovers.is_empty(), "intermediate survived: {leftovers:?}");
}

#[tokio::test]
async fn optimize_skips_corrupt_pdf_and_cleans_up() {
    e2e_skip_unless_enabled!();

    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    fs::write(source.path().join("broken.pdf"), b"not a pdf at all").unwrap();

    let report = optimize_pdfs(
        source.path(),
        dest.path(),
        &OptimizeConfig::default(),
        None,
    )
    .await
    .expect("a corrupt file must not be fatal to the batch");

    assert_eq!(report.processed, 0);
    assert_eq!(report.skipped(), 1);

    let leftovers: Vec<_> = fs::read_dir(dest.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp.pdf"))
        .collect();
    assert!(leftovers.is_empty(), "intermediate survived: {leftovers:?}");
}

// ── Parse (no external tools, runs unconditionally) ──────────────────────────

const TEI_SESSION: &str = r##"<TEI xmlns="http://www.tei-c.org/ns/1.0" xml:id="s1">
  <teiHeader><fileDesc><titleStmt><title>Seja</title></titleStmt></fileDesc></teiHeader>
  <text><body>
    <u who="#Govornik" xml:id="u1"><seg>Otvarjam sejo.</seg></u>
  </body></text>
</TEI>"##;

#[tokio::test]
async fn parse_window_slices_sorted_file_list() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    for name in ["a.xml", "b.xml", "c.xml"] {
        fs::write(source.path().join(name), TEI_SESSION).unwrap();
    }

    let report = parse_files(source.path(), dest.path(), Corpus::Dzk, 1, Some(2), None)
        .await
        .unwrap();

    assert_eq!(report.processed, 1);
    assert!(!dest.path().join("a.json").exists());
    assert!(dest.path().join("b.json").is_file());
    assert!(!dest.path().join("c.json").exists());

    let json = fs::read_to_string(dest.path().join("b.json")).unwrap();
    assert!(json.contains("Otvarjam sejo."));
    assert!(json.contains("\"corpus\": \"dzk\""));
}

#[tokio::test]
async fn parse_skips_malformed_xml_and_continues() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    fs::write(source.path().join("bad.xml"), "<TEI><u></x></TEI>").unwrap();
    fs::write(source.path().join("good.xml"), TEI_SESSION).unwrap();

    let report = parse_files(source.path(), dest.path(), Corpus::Yuparl, 0, None, None)
        .await
        .unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped(), 1);
    assert!(dest.path().join("good.json").is_file());
    assert!(!dest.path().join("bad.json").exists());
}
