//! Corpus identifiers and the filename-canonicalization seam.
//!
//! Every supported corpus pairs one legacy filename grammar with one canonical
//! naming scheme. Rather than branching on a string identifier inside the
//! batch loops, each grammar implements [`Canonicalize`] and is selected once
//! per run through [`canonicalizer`]. Adding a corpus means adding a module
//! with a grammar (and, where needed, a vocabulary table) plus one dispatch
//! arm here; existing grammars are never touched.
//!
//! Canonicalization is a pure, deterministic function of `(corpus, stem)`:
//! the same inputs always return the same output or the same failure kind,
//! with no side effects and no file-system access.

use crate::error::{FileError, PrepError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod dzk;
pub mod yuparl;

pub use dzk::DzkCanonicalizer;
pub use yuparl::YuparlCanonicalizer;

/// A named collection of archival documents sharing one legacy filename
/// grammar and one canonical naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corpus {
    /// Carniolan regional assembly (Deželni zbor kranjski).
    Dzk,
    /// Yugoslav-era parliamentary bodies (yu1Parl).
    Yuparl,
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corpus::Dzk => f.write_str("dzk"),
            Corpus::Yuparl => f.write_str("yuparl"),
        }
    }
}

impl FromStr for Corpus {
    type Err = PrepError;

    /// Resolve a corpus identifier string.
    ///
    /// An unknown identifier is a run-configuration error and aborts the
    /// batch, unlike per-file grammar mismatches.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dzk" => Ok(Corpus::Dzk),
            "yuparl" => Ok(Corpus::Yuparl),
            other => Err(PrepError::UnsupportedCorpus {
                corpus: other.to_string(),
            }),
        }
    }
}

/// Translate one legacy filename stem into one canonical filename stem.
///
/// Implementations hold any static configuration (vocabulary tables) built at
/// construction time and must be shareable across threads: the batch loops
/// are sequential, but nothing in the contract prevents concurrent callers.
pub trait Canonicalize: Send + Sync {
    /// The corpus whose grammar this canonicalizer implements.
    fn corpus(&self) -> Corpus;

    /// Map a legacy stem to its canonical stem, or report why it does not
    /// match the corpus grammar.
    fn canonicalize(&self, stem: &str) -> Result<String, FileError>;
}

static DZK: Lazy<DzkCanonicalizer> = Lazy::new(DzkCanonicalizer::new);
static YUPARL: Lazy<YuparlCanonicalizer> = Lazy::new(YuparlCanonicalizer::new);

/// Look up the canonicalizer for a corpus.
///
/// The returned reference is `'static`: grammars are compiled and vocabulary
/// tables built once, on first use.
pub fn canonicalizer(corpus: Corpus) -> &'static dyn Canonicalize {
    match corpus {
        Corpus::Dzk => &*DZK,
        Corpus::Yuparl => &*YUPARL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_from_str_known() {
        assert_eq!("dzk".parse::<Corpus>().unwrap(), Corpus::Dzk);
        assert_eq!("yuparl".parse::<Corpus>().unwrap(), Corpus::Yuparl);
        assert_eq!(" DZK ".parse::<Corpus>().unwrap(), Corpus::Dzk);
    }

    #[test]
    fn corpus_from_str_unknown_is_fatal() {
        let err = "sabor".parse::<Corpus>().unwrap_err();
        assert!(matches!(err, PrepError::UnsupportedCorpus { .. }));
    }

    #[test]
    fn dispatch_returns_matching_corpus() {
        assert_eq!(canonicalizer(Corpus::Dzk).corpus(), Corpus::Dzk);
        assert_eq!(canonicalizer(Corpus::Yuparl).corpus(), Corpus::Yuparl);
    }

    #[test]
    fn corpus_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Corpus::Dzk).unwrap(), "\"dzk\"");
        assert_eq!(
            serde_json::to_string(&Corpus::Yuparl).unwrap(),
            "\"yuparl\""
        );
    }
}
