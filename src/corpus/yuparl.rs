//! yuparl grammar: Yugoslav-era parliamentary session scans.
//!
//! Legacy stems are three hyphen-separated fields:
//!
//! ```text
//! 18820101-NarodnaSkupstina-5            (single-day session)
//! 1882010102-NarodnaSkupstina-5          (two-day session, second day 02)
//! 18820101-Senat-3prethodna              (continuation of session 3)
//! 18820101-Senat-5p2                     (session 5, part 2)
//! ```
//!
//! The date field is 8 or 10 digits; a 10-digit date denotes a session
//! spanning two consecutive days, the trailing two digits being the second
//! day. The session-type field names the issuing body and must be present in
//! the corpus vocabulary; an unrecognised name is a reported failure, never
//! a silent pass-through. The number field is a plain session number, a
//! `prethodna`-marked continuation, or a `p`-marked part number.
//!
//! Canonical output: `yu1Parl_{date}_{sessionTypeCode}_{number}` where the
//! date is `YYYY-MM-DD`, extended to `YYYY-MM-DD-DD2` for two-day sessions.

use crate::corpus::{Canonicalize, Corpus};
use crate::error::FileError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Overall stem shape: date, session-type name, number field.
///
/// The number alternation admits plain integers, `prethodna` continuations
/// (marker before or after the integer) and `p`-separated part numbers.
static STEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{8}|\d{10})-([A-Za-z]+)-(\d+prethodna|prethodna\d+|\d+p\d+|\d+)$").unwrap()
});

/// Long-form institutional names and their canonical short codes.
fn default_vocabulary() -> &'static [(&'static str, &'static str)] {
    &[
        ("PrivremenoNarodnoPredstavnistvo", "PP"),
        ("NarodnoPretstavnistvo", "NP"),
        ("ZakonodajniOdbor", "ZO"),
        ("Senat", "SE"),
        ("NarodnaSkupstina", "NS"),
    ]
}

/// Canonicalizer for the yuparl corpus.
///
/// The session-type vocabulary is supplied at construction and never mutated
/// afterwards; [`YuparlCanonicalizer::with_vocabulary`] exists so a future
/// corpus variant can extend the table without touching the grammar.
#[derive(Debug)]
pub struct YuparlCanonicalizer {
    session_types: HashMap<&'static str, &'static str>,
}

impl Default for YuparlCanonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl YuparlCanonicalizer {
    /// Build a canonicalizer with the standard yu1Parl vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(default_vocabulary())
    }

    /// Build a canonicalizer with an explicit vocabulary table.
    pub fn with_vocabulary(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            session_types: entries.iter().copied().collect(),
        }
    }

    /// Apply the sub-numbering rules to the raw number field.
    ///
    /// `prethodna` marks a continuation session: a hyphen is inserted before
    /// the marker when digits precede it. A bare `p` separates a part number
    /// and becomes a hyphen. Plain integers pass through unchanged.
    fn format_number(raw: &str) -> String {
        if let Some(pos) = raw.find("prethodna") {
            if pos > 0 {
                return format!("{}-{}", &raw[..pos], &raw[pos..]);
            }
            return raw.to_string();
        }
        if raw.contains('p') {
            return raw.replacen('p', "-", 1);
        }
        raw.to_string()
    }
}

impl Canonicalize for YuparlCanonicalizer {
    fn corpus(&self) -> Corpus {
        Corpus::Yuparl
    }

    fn canonicalize(&self, stem: &str) -> Result<String, FileError> {
        let caps = STEM_RE.captures(stem).ok_or_else(|| FileError::PatternMismatch {
            corpus: Corpus::Yuparl,
            stem: stem.to_string(),
            detail: "expected 'YYYYMMDD[DD]-SessionType-N' with an optional \
                     'prethodna' or 'p' sub-number"
                .to_string(),
        })?;

        let date_field = &caps[1];
        let session_name = &caps[2];
        let number_field = &caps[3];

        let year = &date_field[0..4];
        let month = &date_field[4..6];
        let day = &date_field[6..8];
        let date = if date_field.len() == 10 {
            // Two-day session: trailing digits are the second day.
            let day2 = &date_field[8..10];
            format!("{year}-{month}-{day}-{day2}")
        } else {
            format!("{year}-{month}-{day}")
        };

        let code = self.session_types.get(session_name).ok_or_else(|| {
            FileError::UnknownSessionType {
                corpus: Corpus::Yuparl,
                stem: stem.to_string(),
                name: session_name.to_string(),
            }
        })?;

        let number = Self::format_number(number_field);

        Ok(format!("yu1Parl_{date}_{code}_{number}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(stem: &str) -> Result<String, FileError> {
        YuparlCanonicalizer::new().canonicalize(stem)
    }

    #[test]
    fn single_day_session() {
        assert_eq!(
            canon("18820101-NarodnaSkupstina-5").unwrap(),
            "yu1Parl_1882-01-01_NS_5"
        );
    }

    #[test]
    fn two_day_session_appends_second_day() {
        assert_eq!(
            canon("1882010102-NarodnaSkupstina-5").unwrap(),
            "yu1Parl_1882-01-01-02_NS_5"
        );
    }

    #[test]
    fn prethodna_suffix_gets_hyphen_before_marker() {
        assert_eq!(
            canon("18820101-Senat-3prethodna").unwrap(),
            "yu1Parl_1882-01-01_SE_3-prethodna"
        );
    }

    #[test]
    fn prethodna_prefix_passes_through() {
        // No digits precede the marker, so no hyphen is inserted.
        assert_eq!(
            canon("18820101-Senat-prethodna3").unwrap(),
            "yu1Parl_1882-01-01_SE_prethodna3"
        );
    }

    #[test]
    fn p_part_number_becomes_hyphen() {
        assert_eq!(
            canon("19240315-ZakonodajniOdbor-5p2").unwrap(),
            "yu1Parl_1924-03-15_ZO_5-2"
        );
    }

    #[test]
    fn full_vocabulary_resolves() {
        let cases = [
            ("PrivremenoNarodnoPredstavnistvo", "PP"),
            ("NarodnoPretstavnistvo", "NP"),
            ("ZakonodajniOdbor", "ZO"),
            ("Senat", "SE"),
            ("NarodnaSkupstina", "NS"),
        ];
        for (name, code) in cases {
            let stem = format!("19200606-{name}-1");
            assert_eq!(
                canon(&stem).unwrap(),
                format!("yu1Parl_1920-06-06_{code}_1")
            );
        }
    }

    #[test]
    fn unknown_session_type_is_reported_not_passed_through() {
        let err = canon("18820101-Sabor-5").unwrap_err();
        match err {
            FileError::UnknownSessionType { name, .. } => assert_eq!(name, "Sabor"),
            other => panic!("expected UnknownSessionType, got {other:?}"),
        }
    }

    #[test]
    fn rejects_nine_digit_date() {
        assert!(matches!(
            canon("188201011-NarodnaSkupstina-5").unwrap_err(),
            FileError::PatternMismatch { .. }
        ));
    }

    #[test]
    fn rejects_missing_number() {
        assert!(canon("18820101-NarodnaSkupstina").is_err());
    }

    #[test]
    fn rejects_unrelated_stem() {
        assert!(matches!(
            canon("random_file_123").unwrap_err(),
            FileError::PatternMismatch { .. }
        ));
    }

    #[test]
    fn custom_vocabulary_is_honoured() {
        let c = YuparlCanonicalizer::with_vocabulary(&[("Sabor", "SA")]);
        assert_eq!(
            c.canonicalize("19390826-Sabor-1").unwrap(),
            "yu1Parl_1939-08-26_SA_1"
        );
        // The standard names are absent from the custom table.
        assert!(c.canonicalize("18820101-Senat-1").is_err());
    }

    #[test]
    fn deterministic_failure_classification() {
        let a = canon("18820101-Sabor-5").unwrap_err();
        let b = canon("18820101-Sabor-5").unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }
}
