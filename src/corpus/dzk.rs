//! dzk grammar: Carniolan regional assembly session scans.
//!
//! Legacy stems carry a literal assembly prefix, an 8-digit date, a volume
//! and a page/item number:
//!
//! ```text
//! DezelniZborKranjski-18830115-3-7     (hyphen form)
//! DezelniZborKranjski-18830115-3p7     (p-marker form)
//! ```
//!
//! The `p`-marker form appeared in later deliveries of the corpus: the volume
//! segment carries the number after a literal `p` instead of a trailing
//! hyphen segment. Both forms reduce to the same three fields (date, volume,
//! number) by replacing the `p` with `-` before splitting, so
//! `…-3p7` and `…-3-7` name the same session. Year, month and day are taken
//! from the date field at fixed character offsets 0–4 / 4–6 / 6–8.
//!
//! Canonical output: `DZK_{year}-{month}-{day}_{volume}_{number}`.

use crate::corpus::{Canonicalize, Corpus};
use crate::error::FileError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Literal prefix identifying the assembly in legacy stems.
const LEGACY_PREFIX: &str = "DezelniZborKranjski";

/// Both accepted forms: `PREFIX-YYYYMMDD-V-N` and `PREFIX-YYYYMMDD-VpN`.
static STEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^DezelniZborKranjski-(\d{8})-(\d{1,2})(?:-|p)(\d{1,2})$").unwrap()
});

/// Canonicalizer for the dzk corpus.
#[derive(Debug, Default)]
pub struct DzkCanonicalizer;

impl DzkCanonicalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Canonicalize for DzkCanonicalizer {
    fn corpus(&self) -> Corpus {
        Corpus::Dzk
    }

    fn canonicalize(&self, stem: &str) -> Result<String, FileError> {
        let caps = STEM_RE.captures(stem).ok_or_else(|| FileError::PatternMismatch {
            corpus: Corpus::Dzk,
            stem: stem.to_string(),
            detail: format!(
                "expected '{LEGACY_PREFIX}-YYYYMMDD-V-N' or '{LEGACY_PREFIX}-YYYYMMDD-VpN'"
            ),
        })?;

        let date = &caps[1];
        let volume = &caps[2];
        let number = &caps[3];

        let year = &date[0..4];
        let month = &date[4..6];
        let day = &date[6..8];

        Ok(format!("DZK_{year}-{month}-{day}_{volume}_{number}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(stem: &str) -> Result<String, FileError> {
        DzkCanonicalizer::new().canonicalize(stem)
    }

    #[test]
    fn hyphen_form() {
        assert_eq!(
            canon("DezelniZborKranjski-18830115-3-7").unwrap(),
            "DZK_1883-01-15_3_7"
        );
    }

    #[test]
    fn hyphen_form_two_digit_fields() {
        assert_eq!(
            canon("DezelniZborKranjski-19011224-12-34").unwrap(),
            "DZK_1901-12-24_12_34"
        );
    }

    #[test]
    fn p_marker_form_reduces_to_same_fields() {
        // `3p7` normalises to `3-7`: volume 3, number 7.
        assert_eq!(
            canon("DezelniZborKranjski-18830115-3p7").unwrap(),
            "DZK_1883-01-15_3_7"
        );
        assert_eq!(
            canon("DezelniZborKranjski-18830115-3p7").unwrap(),
            canon("DezelniZborKranjski-18830115-3-7").unwrap()
        );
    }

    #[test]
    fn rejects_wrong_prefix() {
        let err = canon("DezelniZbor-18830115-3-7").unwrap_err();
        assert!(matches!(err, FileError::PatternMismatch { .. }));
    }

    #[test]
    fn rejects_short_date() {
        assert!(canon("DezelniZborKranjski-1883015-3-7").is_err());
    }

    #[test]
    fn rejects_missing_number_segment() {
        assert!(canon("DezelniZborKranjski-18830115-3").is_err());
    }

    #[test]
    fn rejects_extra_segments() {
        assert!(canon("DezelniZborKranjski-18830115-3-7-2").is_err());
    }

    #[test]
    fn rejects_unrelated_stem() {
        let err = canon("random_file_123").unwrap_err();
        match err {
            FileError::PatternMismatch { corpus, stem, .. } => {
                assert_eq!(corpus, Corpus::Dzk);
                assert_eq!(stem, "random_file_123");
            }
            other => panic!("expected PatternMismatch, got {other:?}"),
        }
    }

    #[test]
    fn deterministic() {
        let a = canon("DezelniZborKranjski-18990303-9-1").unwrap();
        let b = canon("DezelniZborKranjski-18990303-9-1").unwrap();
        assert_eq!(a, b);
    }
}
