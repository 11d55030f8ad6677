//! Canonicalization behaviour through the public dispatch API.
//!
//! Exercises the documented grammar properties for both corpora the way a
//! caller would use them: look the canonicalizer up by corpus once, then
//! feed it stems.

use parlavis_prep::{canonicalizer, Corpus, FileError};

#[test]
fn dzk_hyphen_form_end_to_end() {
    let c = canonicalizer(Corpus::Dzk);
    assert_eq!(
        c.canonicalize("DezelniZborKranjski-18830115-3-7").unwrap(),
        "DZK_1883-01-15_3_7"
    );
}

#[test]
fn dzk_p_marker_form_end_to_end() {
    let c = canonicalizer(Corpus::Dzk);
    assert_eq!(
        c.canonicalize("DezelniZborKranjski-18830115-3p7").unwrap(),
        "DZK_1883-01-15_3_7"
    );
}

#[test]
fn yuparl_session_types_resolve() {
    let c = canonicalizer(Corpus::Yuparl);
    assert_eq!(
        c.canonicalize("18820101-NarodnaSkupstina-5").unwrap(),
        "yu1Parl_1882-01-01_NS_5"
    );
    assert_eq!(
        c.canonicalize("1882010102-NarodnaSkupstina-5").unwrap(),
        "yu1Parl_1882-01-01-02_NS_5"
    );
    assert_eq!(
        c.canonicalize("18820101-Senat-3prethodna").unwrap(),
        "yu1Parl_1882-01-01_SE_3-prethodna"
    );
}

#[test]
fn unrecognized_session_type_reports_not_crashes() {
    let c = canonicalizer(Corpus::Yuparl);
    let err = c.canonicalize("18820101-Sabor-5").unwrap_err();
    assert!(matches!(err, FileError::UnknownSessionType { .. }));
}

#[test]
fn garbage_stem_fails_for_both_corpora() {
    for corpus in [Corpus::Dzk, Corpus::Yuparl] {
        let err = canonicalizer(corpus).canonicalize("random_file_123").unwrap_err();
        match err {
            FileError::PatternMismatch {
                corpus: c, stem, ..
            } => {
                assert_eq!(c, corpus);
                assert_eq!(stem, "random_file_123");
            }
            other => panic!("expected PatternMismatch for {corpus}, got {other:?}"),
        }
    }
}

#[test]
fn canonicalization_is_deterministic() {
    let stems = [
        (Corpus::Dzk, "DezelniZborKranjski-18990303-9-1"),
        (Corpus::Dzk, "not-a-match"),
        (Corpus::Yuparl, "19240315-ZakonodajniOdbor-5p2"),
        (Corpus::Yuparl, "18820101-Sabor-5"),
    ];
    for (corpus, stem) in stems {
        let c = canonicalizer(corpus);
        let first = c.canonicalize(stem).map_err(|e| e.to_string());
        let second = c.canonicalize(stem).map_err(|e| e.to_string());
        assert_eq!(first, second, "non-deterministic for '{stem}'");
    }
}
